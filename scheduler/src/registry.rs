//! Pool registry: creation, funding, activation and protocol-wide totals.

use crate::error::SchedulerError;
use crate::event::{Outcome, SchedulerEvent};
use crate::pool::{NewPool, Pool, PoolId};
use crate::state::LedgerState;
use serde::Serialize;
use yield_types::{Principal, Timestamp};

/// Aggregate view over every pool, computed on read.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ProtocolStats {
    pub total_pools: u64,
    pub active_pools: u64,
    pub total_staked: u128,
    pub total_rewards_balance: u128,
}

impl LedgerState {
    /// Create a pool (admin only). Returns the new sequential id.
    pub fn create_pool(
        &mut self,
        caller: &Principal,
        new: NewPool,
        now: Timestamp,
    ) -> Result<Outcome<PoolId>, SchedulerError> {
        self.require_admin(caller)?;
        if new.reward_rate_bps == 0 {
            return Err(SchedulerError::InvalidAmount(
                "reward rate must be greater than zero".into(),
            ));
        }
        self.validate_name(&new.name)?;

        let id = self.next_pool_id;
        let next = id.checked_add(1).ok_or(SchedulerError::Overflow)?;

        let event = SchedulerEvent::PoolCreated {
            pool_id: id,
            creator: caller.clone(),
            name: new.name.clone(),
            schedule_type: new.schedule_type.code(),
            reward_rate: new.reward_rate_bps,
            initial_rewards: new.initial_rewards,
        };
        self.pools.insert(id, Pool::from_new(id, new, now));
        self.next_pool_id = next;
        Ok(Outcome::new(id, event))
    }

    /// Add funds to a pool's reward balance. Anyone may fund, including
    /// inactive pools.
    pub fn fund_rewards_pool(
        &mut self,
        caller: &Principal,
        pool_id: PoolId,
        amount: u128,
    ) -> Result<Outcome<bool>, SchedulerError> {
        if amount == 0 {
            return Err(SchedulerError::InvalidAmount(
                "funding amount must be non-zero".into(),
            ));
        }
        let pool = self
            .pools
            .get_mut(&pool_id)
            .ok_or(SchedulerError::PoolNotFound(pool_id))?;
        let balance = pool
            .rewards_balance
            .checked_add(amount)
            .ok_or(SchedulerError::Overflow)?;
        pool.rewards_balance = balance;

        Ok(Outcome::new(
            true,
            SchedulerEvent::PoolFunded {
                pool_id,
                funder: caller.clone(),
                amount,
                rewards_balance: balance,
            },
        ))
    }

    /// Activate or deactivate a pool (admin only).
    pub fn set_pool_active(
        &mut self,
        caller: &Principal,
        pool_id: PoolId,
        active: bool,
    ) -> Result<Outcome<bool>, SchedulerError> {
        self.require_admin(caller)?;
        let pool = self
            .pools
            .get_mut(&pool_id)
            .ok_or(SchedulerError::PoolNotFound(pool_id))?;
        pool.active = active;

        Ok(Outcome::new(
            true,
            SchedulerEvent::PoolStatusChanged {
                pool_id,
                admin: caller.clone(),
                active,
            },
        ))
    }

    pub fn protocol_stats(&self) -> ProtocolStats {
        self.pools
            .values()
            .fold(ProtocolStats::default(), |mut stats, pool| {
                stats.total_pools += 1;
                if pool.active {
                    stats.active_pools += 1;
                }
                stats.total_staked = stats.total_staked.saturating_add(pool.total_staked);
                stats.total_rewards_balance = stats
                    .total_rewards_balance
                    .saturating_add(pool.rewards_balance);
                stats
            })
    }

    pub(crate) fn validate_name(&self, name: &str) -> Result<(), SchedulerError> {
        if name.trim().is_empty() {
            return Err(SchedulerError::InvalidAmount("name must not be empty".into()));
        }
        if name.len() > self.params.max_name_len {
            return Err(SchedulerError::InvalidAmount(format!(
                "name is {} bytes, limit is {}",
                name.len(),
                self.params.max_name_len
            )));
        }
        Ok(())
    }
}
