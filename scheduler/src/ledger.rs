//! Stake ledger and reward accrual.
//!
//! Per (pool, staker): NoStake → Staked → (Cooldown) → Staked/NoStake.
//! Every operation here requires an active pool.

use crate::error::{SchedulerError, StakeShortfall};
use crate::event::{Outcome, SchedulerEvent};
use crate::pool::{Pool, PoolId};
use crate::stake::Stake;
use crate::state::LedgerState;
use yield_types::{Bps, Principal, Timestamp, BPS_DENOMINATOR};

/// Rewards accrued by `amount` over `elapsed` seconds.
///
/// `amount × rate_bps × elapsed × multiplier_bps / (10⁴ × 10⁴ × period)`.
/// Intermediate products saturate at `u128::MAX` instead of overflowing.
pub fn accrued_rewards(
    amount: u128,
    rate_bps: Bps,
    elapsed: u64,
    multiplier_bps: Bps,
    period_secs: u64,
) -> u128 {
    let numerator = amount
        .saturating_mul(u128::from(rate_bps))
        .saturating_mul(u128::from(elapsed))
        .saturating_mul(u128::from(multiplier_bps));
    let denominator = BPS_DENOMINATOR * BPS_DENOMINATOR * u128::from(period_secs.max(1));
    numerator / denominator
}

/// What a claim or compound would pay out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Settlement {
    pending: u128,
    payout: u128,
}

impl LedgerState {
    /// Deposit `amount` into a pool.
    ///
    /// A top-up re-bases accrual to `now`: rewards accrued before the top-up
    /// and not yet claimed or compounded are not carried over.
    pub fn stake(
        &mut self,
        caller: &Principal,
        pool_id: PoolId,
        amount: u128,
        now: Timestamp,
    ) -> Result<Outcome<bool>, SchedulerError> {
        let pool = self
            .pools
            .get_mut(&pool_id)
            .filter(|p| p.active)
            .ok_or(SchedulerError::PoolNotFound(pool_id))?;
        if amount == 0 || amount < pool.min_stake {
            return Err(SchedulerError::InsufficientStake(StakeShortfall::BelowMinimum {
                amount,
                min_stake: pool.min_stake,
            }));
        }

        let key = (pool_id, caller.clone());
        let current = self.stakes.get(&key).map_or(0, |s| s.amount);
        let new_amount = current.checked_add(amount).ok_or(SchedulerError::Overflow)?;
        let new_total = pool
            .total_staked
            .checked_add(amount)
            .ok_or(SchedulerError::Overflow)?;

        let stake = self.stakes.entry(key).or_insert_with(|| Stake::new(now));
        stake.amount = new_amount;
        stake.last_accrual_time = now;
        pool.total_staked = new_total;

        Ok(Outcome::new(
            true,
            SchedulerEvent::Staked {
                pool_id,
                staker: caller.clone(),
                amount,
                total_amount: new_amount,
            },
        ))
    }

    /// Withdraw `amount` of principal.
    ///
    /// With a non-zero cooldown, an unstake within `cooldown_period` of the
    /// caller's previous unstake fails with `CooldownActive`. The first
    /// unstake is never blocked.
    pub fn unstake(
        &mut self,
        caller: &Principal,
        pool_id: PoolId,
        amount: u128,
        now: Timestamp,
    ) -> Result<Outcome<bool>, SchedulerError> {
        let pool = self
            .pools
            .get_mut(&pool_id)
            .filter(|p| p.active)
            .ok_or(SchedulerError::PoolNotFound(pool_id))?;
        let stake = self
            .stakes
            .get_mut(&(pool_id, caller.clone()))
            .ok_or(SchedulerError::InsufficientStake(StakeShortfall::NoStake))?;
        if amount == 0 {
            return Err(SchedulerError::InsufficientStake(StakeShortfall::ZeroAmount));
        }
        if amount > stake.amount {
            return Err(SchedulerError::InsufficientStake(StakeShortfall::ExceedsStaked {
                requested: amount,
                staked: stake.amount,
            }));
        }
        let remaining_secs = stake.cooldown_remaining(pool.cooldown_period, now);
        if remaining_secs > 0 {
            return Err(SchedulerError::CooldownActive { remaining_secs });
        }
        let new_total = pool
            .total_staked
            .checked_sub(amount)
            .ok_or(SchedulerError::Overflow)?;

        let remaining = stake.amount - amount;
        stake.amount = remaining;
        stake.stake_time = Some(now);
        pool.total_staked = new_total;

        Ok(Outcome::new(
            true,
            SchedulerEvent::Unstaked {
                pool_id,
                staker: caller.clone(),
                amount,
                remaining,
            },
        ))
    }

    /// Rewards `staker` could settle at `now`. Zero without a stake.
    pub fn pending_rewards(
        &self,
        pool_id: PoolId,
        staker: &Principal,
        now: Timestamp,
    ) -> Result<u128, SchedulerError> {
        let pool = self.active_pool(pool_id)?;
        Ok(self
            .stake_of(pool_id, staker)
            .map_or(0, |stake| self.accrued_for(pool, stake, now)))
    }

    /// Pay pending rewards out of the pool.
    ///
    /// The payout is capped at the pool's `rewards_balance`; accrual re-bases
    /// to `now` either way, so any shortfall is forfeited.
    pub fn claim_rewards(
        &mut self,
        caller: &Principal,
        pool_id: PoolId,
        now: Timestamp,
    ) -> Result<Outcome<u128>, SchedulerError> {
        let Settlement { payout, .. } = self.settlement(caller, pool_id, now)?;
        let key = (pool_id, caller.clone());
        let (pool, stake) = self.settlement_records(&key)?;

        let total_earned = stake
            .total_earned
            .checked_add(payout)
            .ok_or(SchedulerError::Overflow)?;

        pool.rewards_balance -= payout;
        stake.total_earned = total_earned;
        stake.last_accrual_time = now;

        Ok(Outcome::new(
            payout,
            SchedulerEvent::RewardsClaimed {
                pool_id,
                staker: caller.clone(),
                amount: payout,
                total_earned,
            },
        ))
    }

    /// Turn pending rewards into principal. Same accrual and cap as
    /// [`LedgerState::claim_rewards`]; the pool's reward balance funds the
    /// growth of `total_staked`.
    pub fn compound(
        &mut self,
        caller: &Principal,
        pool_id: PoolId,
        now: Timestamp,
    ) -> Result<Outcome<u128>, SchedulerError> {
        let Settlement { payout, .. } = self.settlement(caller, pool_id, now)?;
        let key = (pool_id, caller.clone());
        let (pool, stake) = self.settlement_records(&key)?;

        let total_earned = stake
            .total_earned
            .checked_add(payout)
            .ok_or(SchedulerError::Overflow)?;
        let new_amount = stake
            .amount
            .checked_add(payout)
            .ok_or(SchedulerError::Overflow)?;
        let new_total = pool
            .total_staked
            .checked_add(payout)
            .ok_or(SchedulerError::Overflow)?;

        pool.rewards_balance -= payout;
        pool.total_staked = new_total;
        stake.amount = new_amount;
        stake.total_earned = total_earned;
        stake.last_accrual_time = now;

        Ok(Outcome::new(
            payout,
            SchedulerEvent::Compounded {
                pool_id,
                staker: caller.clone(),
                amount: payout,
                new_total: new_amount,
            },
        ))
    }

    pub(crate) fn accrued_for(&self, pool: &Pool, stake: &Stake, now: Timestamp) -> u128 {
        let multiplier = self.multiplier_for(pool, stake.amount, now);
        accrued_rewards(
            stake.amount,
            pool.reward_rate_bps,
            stake.last_accrual_time.elapsed_since(now),
            multiplier,
            self.params.accrual_period_secs,
        )
    }

    fn settlement(
        &self,
        caller: &Principal,
        pool_id: PoolId,
        now: Timestamp,
    ) -> Result<Settlement, SchedulerError> {
        let pool = self.active_pool(pool_id)?;
        let stake = self
            .stake_of(pool_id, caller)
            .ok_or(SchedulerError::InsufficientStake(StakeShortfall::NoStake))?;
        let pending = self.accrued_for(pool, stake, now);
        if pending == 0 {
            return Err(SchedulerError::NoRewards);
        }
        let payout = pending.min(pool.rewards_balance);
        if payout == 0 {
            tracing::warn!(pool_id, pending, "reward pool is empty");
            return Err(SchedulerError::NoRewards);
        }
        if payout < pending {
            tracing::warn!(
                pool_id,
                pending,
                payout,
                "reward pool underfunded, payout capped at balance"
            );
        }
        Ok(Settlement { pending, payout })
    }

    fn settlement_records(
        &mut self,
        key: &(PoolId, Principal),
    ) -> Result<(&mut Pool, &mut Stake), SchedulerError> {
        let pool = self
            .pools
            .get_mut(&key.0)
            .ok_or(SchedulerError::PoolNotFound(key.0))?;
        let stake = self
            .stakes
            .get_mut(key)
            .ok_or(SchedulerError::InsufficientStake(StakeShortfall::NoStake))?;
        Ok((pool, stake))
    }
}
