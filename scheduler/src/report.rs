//! Human-readable pool and stake reports.

use crate::error::SchedulerError;
use crate::pool::PoolId;
use crate::state::LedgerState;
use std::fmt::Write;
use yield_types::bps::{format_multiplier, format_percent};
use yield_types::{Principal, Timestamp};
use yield_utils::format_duration;

impl LedgerState {
    /// Multi-line summary of a pool. Inactive pools are reported too.
    pub fn pool_status(&self, pool_id: PoolId, now: Timestamp) -> Result<String, SchedulerError> {
        let pool = self
            .pool(pool_id)
            .ok_or(SchedulerError::PoolNotFound(pool_id))?;
        let multiplier = self.multiplier_for(pool, pool.total_staked, now);

        let mut out = String::new();
        // Writing to a String cannot fail.
        let _ = writeln!(out, "Pool #{}: {}", pool.id, pool.name);
        let _ = writeln!(
            out,
            "  Status: {}",
            if pool.active { "active" } else { "inactive" }
        );
        let _ = writeln!(
            out,
            "  Reward rate: {} per {}",
            format_percent(pool.reward_rate_bps),
            format_duration(self.params.accrual_period_secs)
        );
        let _ = writeln!(out, "  Schedule: {}", pool.schedule_type);
        let _ = writeln!(out, "  Current multiplier: {}", format_multiplier(multiplier));
        let _ = writeln!(out, "  Bonus schedules: {}", self.schedules(pool_id).len());
        let _ = writeln!(out, "  Total staked: {}", pool.total_staked);
        let _ = writeln!(out, "  Rewards balance: {}", pool.rewards_balance);
        let _ = writeln!(out, "  Minimum stake: {}", pool.min_stake);
        let _ = write!(out, "  Cooldown: {}", format_duration(pool.cooldown_period));
        Ok(out)
    }

    /// Multi-line summary of one staker's position in a pool.
    pub fn stake_info(
        &self,
        pool_id: PoolId,
        staker: &Principal,
        now: Timestamp,
    ) -> Result<String, SchedulerError> {
        let pool = self
            .pool(pool_id)
            .ok_or(SchedulerError::PoolNotFound(pool_id))?;

        let mut out = String::new();
        let _ = writeln!(out, "Stake of {} in pool #{} ({})", staker, pool.id, pool.name);
        let Some(stake) = self.stake_of(pool_id, staker) else {
            let _ = write!(out, "  No stake");
            return Ok(out);
        };

        let pending = if pool.active {
            self.accrued_for(pool, stake, now)
        } else {
            0
        };
        let multiplier = self.multiplier_for(pool, stake.amount, now);
        let cooldown = stake.cooldown_remaining(pool.cooldown_period, now);

        let _ = writeln!(out, "  Amount: {}", stake.amount);
        let _ = writeln!(out, "  Pending rewards: {}", pending);
        let _ = writeln!(out, "  Total earned: {}", stake.total_earned);
        let _ = writeln!(out, "  Multiplier: {}", format_multiplier(multiplier));
        let _ = writeln!(
            out,
            "  Accruing for: {}",
            format_duration(stake.last_accrual_time.elapsed_since(now))
        );
        if cooldown == 0 {
            let _ = write!(out, "  Cooldown: ready");
        } else {
            let _ = write!(out, "  Cooldown: {} remaining", format_duration(cooldown));
        }
        Ok(out)
    }
}
