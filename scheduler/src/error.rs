//! Scheduler errors.
//!
//! Every failing operation aborts with one of these and leaves the ledger
//! unchanged.

use crate::pool::PoolId;
use std::fmt;
use thiserror::Error;
use yield_types::Principal;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchedulerError {
    #[error("caller {0} is not the protocol admin")]
    NotAuthorized(Principal),

    #[error("pool {0} not found")]
    PoolNotFound(PoolId),

    #[error("insufficient stake: {0}")]
    InsufficientStake(StakeShortfall),

    #[error("unstake cooldown active: {remaining_secs}s remaining")]
    CooldownActive { remaining_secs: u64 },

    #[error("no rewards to settle")]
    NoRewards,

    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("arithmetic overflow in ledger computation")]
    Overflow,

    #[error("snapshot error: {0}")]
    Snapshot(String),
}

impl SchedulerError {
    /// Stable numeric code that clients match on.
    pub fn code(&self) -> u32 {
        match self {
            Self::NotAuthorized(_) => 8001,
            Self::PoolNotFound(_) => 8002,
            Self::InsufficientStake(_) => 8003,
            Self::CooldownActive { .. } => 8004,
            Self::NoRewards => 8005,
            Self::InvalidAmount(_) => 8006,
            Self::Overflow => 8007,
            Self::Snapshot(_) => 8008,
        }
    }
}

/// Why a stake or unstake amount was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StakeShortfall {
    /// Stake below the pool's minimum single-stake amount.
    BelowMinimum { amount: u128, min_stake: u128 },
    /// Unstake larger than the current principal.
    ExceedsStaked { requested: u128, staked: u128 },
    /// The caller has never staked in this pool.
    NoStake,
    /// Unstake of nothing.
    ZeroAmount,
}

impl fmt::Display for StakeShortfall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BelowMinimum { amount, min_stake } => {
                write!(f, "{amount} is below the pool minimum of {min_stake}")
            }
            Self::ExceedsStaked { requested, staked } => {
                write!(f, "requested {requested} but only {staked} is staked")
            }
            Self::NoStake => f.write_str("no stake in this pool"),
            Self::ZeroAmount => f.write_str("amount must be non-zero"),
        }
    }
}
