//! Events returned by state-changing operations.
//!
//! The engine never delivers events itself. Each successful state-changing
//! call returns exactly one event alongside its value; the surrounding runtime
//! forwards them to whatever indexer or relay is listening.

use crate::pool::PoolId;
use serde::Serialize;
use yield_types::{Bps, Principal};

/// A structured record of one committed state transition.
///
/// Serialises as a flat object tagged by `event`, with kebab-case keys:
/// `{"event":"staked","pool-id":1,"staker":"ST…","amount":10,"total-amount":10}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "kebab-case", rename_all_fields = "kebab-case")]
pub enum SchedulerEvent {
    PoolCreated {
        pool_id: PoolId,
        creator: Principal,
        name: String,
        schedule_type: u8,
        reward_rate: Bps,
        initial_rewards: u128,
    },
    PoolFunded {
        pool_id: PoolId,
        funder: Principal,
        amount: u128,
        rewards_balance: u128,
    },
    PoolStatusChanged {
        pool_id: PoolId,
        admin: Principal,
        active: bool,
    },
    BonusScheduleAdded {
        pool_id: PoolId,
        index: u64,
        name: String,
        multiplier: Bps,
        min_stake: u128,
    },
    Staked {
        pool_id: PoolId,
        staker: Principal,
        amount: u128,
        total_amount: u128,
    },
    Unstaked {
        pool_id: PoolId,
        staker: Principal,
        amount: u128,
        remaining: u128,
    },
    RewardsClaimed {
        pool_id: PoolId,
        staker: Principal,
        amount: u128,
        total_earned: u128,
    },
    Compounded {
        pool_id: PoolId,
        staker: Principal,
        amount: u128,
        new_total: u128,
    },
}

impl SchedulerEvent {
    /// The `event` tag this record serialises with.
    pub fn name(&self) -> &'static str {
        match self {
            Self::PoolCreated { .. } => "pool-created",
            Self::PoolFunded { .. } => "pool-funded",
            Self::PoolStatusChanged { .. } => "pool-status-changed",
            Self::BonusScheduleAdded { .. } => "bonus-schedule-added",
            Self::Staked { .. } => "staked",
            Self::Unstaked { .. } => "unstaked",
            Self::RewardsClaimed { .. } => "rewards-claimed",
            Self::Compounded { .. } => "compounded",
        }
    }

    pub fn pool_id(&self) -> PoolId {
        match self {
            Self::PoolCreated { pool_id, .. }
            | Self::PoolFunded { pool_id, .. }
            | Self::PoolStatusChanged { pool_id, .. }
            | Self::BonusScheduleAdded { pool_id, .. }
            | Self::Staked { pool_id, .. }
            | Self::Unstaked { pool_id, .. }
            | Self::RewardsClaimed { pool_id, .. }
            | Self::Compounded { pool_id, .. } => *pool_id,
        }
    }
}

/// The result of a committed operation together with the events it emitted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Outcome<T> {
    pub value: T,
    pub events: Vec<SchedulerEvent>,
}

impl<T> Outcome<T> {
    pub fn new(value: T, event: SchedulerEvent) -> Self {
        Self {
            value,
            events: vec![event],
        }
    }

    pub fn into_value(self) -> T {
        self.value
    }
}
