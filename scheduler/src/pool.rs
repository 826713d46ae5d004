//! Staking pool records.

use serde::{Deserialize, Serialize};
use yield_types::{Bps, ScheduleType, Timestamp};

/// Sequential pool identifier; the first pool is `1`.
pub type PoolId = u64;

/// One staking product.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pool {
    pub id: PoolId,
    pub name: String,
    /// Reward per accrual period, in basis points of principal.
    pub reward_rate_bps: Bps,
    pub schedule_type: ScheduleType,
    /// Minimum single-stake amount.
    pub min_stake: u128,
    /// Seconds a staker must wait after an unstake before unstaking again.
    pub cooldown_period: u64,
    /// Funds available to pay rewards.
    pub rewards_balance: u128,
    /// Sum of every staker's principal in this pool.
    pub total_staked: u128,
    /// Inactive pools refuse all staker operations as if they did not exist.
    pub active: bool,
    pub created_at: Timestamp,
}

/// Arguments for creating a pool.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPool {
    pub name: String,
    pub reward_rate_bps: Bps,
    pub schedule_type: ScheduleType,
    pub min_stake: u128,
    pub cooldown_period: u64,
    pub initial_rewards: u128,
}

impl NewPool {
    /// A linear pool with no minimum, no cooldown and no initial rewards.
    pub fn linear(name: impl Into<String>, reward_rate_bps: Bps) -> Self {
        Self {
            name: name.into(),
            reward_rate_bps,
            schedule_type: ScheduleType::Linear,
            min_stake: 0,
            cooldown_period: 0,
            initial_rewards: 0,
        }
    }

    pub fn with_schedule(mut self, schedule_type: ScheduleType) -> Self {
        self.schedule_type = schedule_type;
        self
    }

    pub fn with_min_stake(mut self, min_stake: u128) -> Self {
        self.min_stake = min_stake;
        self
    }

    pub fn with_cooldown(mut self, cooldown_period: u64) -> Self {
        self.cooldown_period = cooldown_period;
        self
    }

    pub fn with_initial_rewards(mut self, initial_rewards: u128) -> Self {
        self.initial_rewards = initial_rewards;
        self
    }
}

impl Pool {
    pub(crate) fn from_new(id: PoolId, new: NewPool, now: Timestamp) -> Self {
        Self {
            id,
            name: new.name,
            reward_rate_bps: new.reward_rate_bps,
            schedule_type: new.schedule_type,
            min_stake: new.min_stake,
            cooldown_period: new.cooldown_period,
            rewards_balance: new.initial_rewards,
            total_staked: 0,
            active: true,
            created_at: now,
        }
    }
}
