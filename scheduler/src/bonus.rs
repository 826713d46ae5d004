//! Bonus schedules and effective-multiplier selection.
//!
//! Schedules are append-only per pool. How they are read depends on the
//! pool's [`ScheduleType`]; when several schedules match, the most recently
//! appended one wins (for tiers: the highest matching threshold, then the
//! most recently appended).

use crate::error::SchedulerError;
use crate::event::{Outcome, SchedulerEvent};
use crate::pool::{Pool, PoolId};
use crate::state::LedgerState;
use serde::{Deserialize, Serialize};
use yield_types::{Bps, Principal, ScheduleType, SchedulerParams, Timestamp, MULTIPLIER_BASELINE_BPS};

/// A multiplier window (or, for tiered pools, a stake tier).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BonusSchedule {
    pub name: String,
    /// 10_000 = 1×.
    pub multiplier_bps: Bps,
    pub start_time: Timestamp,
    /// Window length in seconds.
    pub duration: u64,
    /// Tier threshold, read only by tiered pools. Zero for time windows.
    #[serde(default)]
    pub min_stake: u128,
}

impl BonusSchedule {
    /// Whether `now` falls inside `[start_time, start_time + duration)`.
    pub fn covers(&self, now: Timestamp) -> bool {
        now >= self.start_time && !self.start_time.has_expired(self.duration, now)
    }

    /// Linear decay from `multiplier_bps` at `start_time` down to 1× at
    /// `start_time + duration`, never below 1×.
    pub fn decayed_multiplier(&self, now: Timestamp) -> Bps {
        let elapsed = self.start_time.elapsed_since(now);
        if self.duration == 0 || elapsed >= self.duration {
            return MULTIPLIER_BASELINE_BPS;
        }
        let peak = self.multiplier_bps.max(MULTIPLIER_BASELINE_BPS);
        let bonus = u128::from(peak - MULTIPLIER_BASELINE_BPS);
        let left = u128::from(self.duration - elapsed);
        let scaled = bonus * left / u128::from(self.duration);
        // scaled <= bonus, which fits in Bps.
        MULTIPLIER_BASELINE_BPS + scaled as Bps
    }
}

/// The multiplier a pool applies at `now` to a position of `staked`.
///
/// - Linear: always 1×.
/// - BonusWeekend: 1× on weekdays; on weekends the latest schedule covering
///   `now`, falling back to `params.weekend_multiplier_bps`.
/// - Tiered: the tier with the highest `min_stake <= staked`; 1× if none.
///   Records with a non-zero `duration` count only while they cover `now`.
/// - Decay: the latest schedule that has started, decayed to `now`; 1× if none.
pub fn effective_multiplier(
    schedule_type: ScheduleType,
    schedules: &[BonusSchedule],
    staked: u128,
    now: Timestamp,
    params: &SchedulerParams,
) -> Bps {
    match schedule_type {
        ScheduleType::Linear => MULTIPLIER_BASELINE_BPS,
        ScheduleType::BonusWeekend => {
            if !now.is_weekend() {
                return MULTIPLIER_BASELINE_BPS;
            }
            schedules
                .iter()
                .rev()
                .find(|s| s.covers(now))
                .map(|s| s.multiplier_bps)
                .unwrap_or(params.weekend_multiplier_bps)
        }
        ScheduleType::Tiered => schedules
            .iter()
            .enumerate()
            .filter(|(_, s)| s.min_stake <= staked)
            .filter(|(_, s)| s.duration == 0 || s.covers(now))
            .max_by_key(|(index, s)| (s.min_stake, *index))
            .map(|(_, s)| s.multiplier_bps)
            .unwrap_or(MULTIPLIER_BASELINE_BPS),
        ScheduleType::Decay => schedules
            .iter()
            .rev()
            .find(|s| s.start_time <= now)
            .map(|s| s.decayed_multiplier(now))
            .unwrap_or(MULTIPLIER_BASELINE_BPS),
    }
}

impl LedgerState {
    /// Append a time-window schedule to a pool (admin only). Returns its
    /// 0-based index. Overlaps with existing schedules are allowed.
    pub fn add_bonus_schedule(
        &mut self,
        caller: &Principal,
        pool_id: PoolId,
        schedule: BonusSchedule,
    ) -> Result<Outcome<u64>, SchedulerError> {
        self.require_admin(caller)?;
        if !self.pools.contains_key(&pool_id) {
            return Err(SchedulerError::PoolNotFound(pool_id));
        }
        if schedule.multiplier_bps == 0 {
            return Err(SchedulerError::InvalidAmount(
                "multiplier must be greater than zero".into(),
            ));
        }
        self.validate_name(&schedule.name)?;

        let list = self.schedules.entry(pool_id).or_default();
        let index = list.len() as u64;
        let event = SchedulerEvent::BonusScheduleAdded {
            pool_id,
            index,
            name: schedule.name.clone(),
            multiplier: schedule.multiplier_bps,
            min_stake: schedule.min_stake,
        };
        list.push(schedule);
        Ok(Outcome::new(index, event))
    }

    /// Append a stake tier: positions of at least `min_stake` earn
    /// `multiplier_bps`. Only tiered pools accept tiers.
    pub fn add_stake_tier(
        &mut self,
        caller: &Principal,
        pool_id: PoolId,
        name: String,
        multiplier_bps: Bps,
        min_stake: u128,
        now: Timestamp,
    ) -> Result<Outcome<u64>, SchedulerError> {
        self.require_admin(caller)?;
        let pool = self
            .pools
            .get(&pool_id)
            .ok_or(SchedulerError::PoolNotFound(pool_id))?;
        if pool.schedule_type != ScheduleType::Tiered {
            return Err(SchedulerError::InvalidAmount(format!(
                "stake tiers need a tiered pool, pool #{pool_id} is {}",
                pool.schedule_type
            )));
        }
        self.add_bonus_schedule(
            caller,
            pool_id,
            BonusSchedule {
                name,
                multiplier_bps,
                start_time: now,
                duration: 0,
                min_stake,
            },
        )
    }

    /// Pool-level multiplier at `now`; tiered pools are evaluated against
    /// the pool's total stake.
    pub fn current_multiplier(&self, pool_id: PoolId, now: Timestamp) -> Result<Bps, SchedulerError> {
        let pool = self.active_pool(pool_id)?;
        Ok(self.multiplier_for(pool, pool.total_staked, now))
    }

    /// The multiplier that applies to one staker's position at `now`.
    pub fn staker_multiplier(
        &self,
        pool_id: PoolId,
        staker: &Principal,
        now: Timestamp,
    ) -> Result<Bps, SchedulerError> {
        let pool = self.active_pool(pool_id)?;
        let staked = self.stake_of(pool_id, staker).map_or(0, |s| s.amount);
        Ok(self.multiplier_for(pool, staked, now))
    }

    pub(crate) fn multiplier_for(&self, pool: &Pool, staked: u128, now: Timestamp) -> Bps {
        effective_multiplier(
            pool.schedule_type,
            self.schedules(pool.id),
            staked,
            now,
            &self.params,
        )
    }
}
