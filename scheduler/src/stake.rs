//! Per-(pool, staker) stake records.

use serde::{Deserialize, Serialize};
use yield_types::Timestamp;

/// A staker's position in one pool.
///
/// Lifecycle: created on first stake; `amount` only grows through stake and
/// compound and only shrinks through unstake. The record is kept after a full
/// unstake so `total_earned` history and the cooldown anchor survive.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stake {
    /// Current principal.
    pub amount: u128,
    /// Time of the most recent unstake, the cooldown anchor.
    /// `None` until the first unstake.
    pub stake_time: Option<Timestamp>,
    /// Pending rewards accrue from here.
    pub last_accrual_time: Timestamp,
    /// Rewards ever claimed or compounded (never decreases).
    pub total_earned: u128,
    /// When the record was first created.
    pub created_at: Timestamp,
}

impl Stake {
    pub fn new(now: Timestamp) -> Self {
        Self {
            amount: 0,
            stake_time: None,
            last_accrual_time: now,
            total_earned: 0,
            created_at: now,
        }
    }

    /// Seconds left before another unstake is allowed; zero when free.
    pub fn cooldown_remaining(&self, cooldown_period: u64, now: Timestamp) -> u64 {
        match self.stake_time {
            Some(last) if cooldown_period > 0 => {
                cooldown_period.saturating_sub(last.elapsed_since(now))
            }
            _ => 0,
        }
    }
}
