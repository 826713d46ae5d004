//! Yield scheduler: the staking reward-accrual engine.
//!
//! Pools pay `reward_rate_bps` per accrual period on staked principal, scaled
//! by a bonus multiplier that depends on the pool's schedule type:
//!
//! `pending = amount × rate_bps × elapsed × multiplier_bps / (10⁴ × 10⁴ × period)`
//!
//! This crate handles:
//! - Pool registry: creation, funding, activation, protocol stats
//! - Bonus schedules and effective-multiplier selection
//! - Stake ledger: stake, unstake (with cooldown), claim, compound
//! - Human-readable status reports and snapshot persistence
//!
//! All state lives in one [`LedgerState`]; every operation either commits a
//! consistent set of writes and returns its events, or fails leaving the
//! state untouched.

pub mod bonus;
pub mod engine;
pub mod error;
pub mod event;
pub mod ledger;
pub mod pool;
pub mod registry;
pub mod report;
pub mod stake;
pub mod state;

pub use bonus::{effective_multiplier, BonusSchedule};
pub use engine::YieldScheduler;
pub use error::{SchedulerError, StakeShortfall};
pub use event::{Outcome, SchedulerEvent};
pub use ledger::accrued_rewards;
pub use pool::{NewPool, Pool, PoolId};
pub use registry::ProtocolStats;
pub use stake::Stake;
pub use state::LedgerState;
