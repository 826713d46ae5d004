//! The scheduler facade: ledger state plus an injected clock.

use crate::bonus::BonusSchedule;
use crate::error::SchedulerError;
use crate::event::Outcome;
use crate::pool::{NewPool, Pool, PoolId};
use crate::registry::ProtocolStats;
use crate::stake::Stake;
use crate::state::LedgerState;
use yield_types::{Bps, Clock, Principal, SchedulerParams, Timestamp};

/// The yield scheduler.
///
/// Every call reads the clock once and runs against that single instant.
/// State-changing calls log committed transitions at `info` and rejections
/// at `debug`; the returned [`Outcome`] carries the emitted event.
pub struct YieldScheduler<C: Clock> {
    state: LedgerState,
    clock: C,
}

impl<C: Clock> YieldScheduler<C> {
    pub fn new(admin: Principal, params: SchedulerParams, clock: C) -> Self {
        Self::from_state(LedgerState::new(admin, params), clock)
    }

    /// Resume from previously persisted state.
    pub fn from_state(state: LedgerState, clock: C) -> Self {
        Self { state, clock }
    }

    pub fn state(&self) -> &LedgerState {
        &self.state
    }

    pub fn into_state(self) -> LedgerState {
        self.state
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    // --- state transitions ---

    pub fn create_pool(
        &mut self,
        caller: &Principal,
        new: NewPool,
    ) -> Result<Outcome<PoolId>, SchedulerError> {
        let now = self.clock.now();
        let result = self.state.create_pool(caller, new, now);
        logged("create_pool", caller, result)
    }

    pub fn fund_rewards_pool(
        &mut self,
        caller: &Principal,
        pool_id: PoolId,
        amount: u128,
    ) -> Result<Outcome<bool>, SchedulerError> {
        let result = self.state.fund_rewards_pool(caller, pool_id, amount);
        logged("fund_rewards_pool", caller, result)
    }

    pub fn set_pool_active(
        &mut self,
        caller: &Principal,
        pool_id: PoolId,
        active: bool,
    ) -> Result<Outcome<bool>, SchedulerError> {
        let result = self.state.set_pool_active(caller, pool_id, active);
        logged("set_pool_active", caller, result)
    }

    pub fn add_bonus_schedule(
        &mut self,
        caller: &Principal,
        pool_id: PoolId,
        name: impl Into<String>,
        multiplier_bps: Bps,
        start_time: Timestamp,
        duration: u64,
    ) -> Result<Outcome<u64>, SchedulerError> {
        let schedule = BonusSchedule {
            name: name.into(),
            multiplier_bps,
            start_time,
            duration,
            min_stake: 0,
        };
        let result = self.state.add_bonus_schedule(caller, pool_id, schedule);
        logged("add_bonus_schedule", caller, result)
    }

    pub fn add_stake_tier(
        &mut self,
        caller: &Principal,
        pool_id: PoolId,
        name: impl Into<String>,
        multiplier_bps: Bps,
        min_stake: u128,
    ) -> Result<Outcome<u64>, SchedulerError> {
        let now = self.clock.now();
        let result = self
            .state
            .add_stake_tier(caller, pool_id, name.into(), multiplier_bps, min_stake, now);
        logged("add_stake_tier", caller, result)
    }

    pub fn stake(
        &mut self,
        caller: &Principal,
        pool_id: PoolId,
        amount: u128,
    ) -> Result<Outcome<bool>, SchedulerError> {
        let now = self.clock.now();
        let result = self.state.stake(caller, pool_id, amount, now);
        logged("stake", caller, result)
    }

    pub fn unstake(
        &mut self,
        caller: &Principal,
        pool_id: PoolId,
        amount: u128,
    ) -> Result<Outcome<bool>, SchedulerError> {
        let now = self.clock.now();
        let result = self.state.unstake(caller, pool_id, amount, now);
        logged("unstake", caller, result)
    }

    pub fn claim_rewards(
        &mut self,
        caller: &Principal,
        pool_id: PoolId,
    ) -> Result<Outcome<u128>, SchedulerError> {
        let now = self.clock.now();
        let result = self.state.claim_rewards(caller, pool_id, now);
        logged("claim_rewards", caller, result)
    }

    pub fn compound(
        &mut self,
        caller: &Principal,
        pool_id: PoolId,
    ) -> Result<Outcome<u128>, SchedulerError> {
        let now = self.clock.now();
        let result = self.state.compound(caller, pool_id, now);
        logged("compound", caller, result)
    }

    // --- queries ---

    pub fn get_current_time(&self) -> Timestamp {
        self.clock.now()
    }

    pub fn get_protocol_stats(&self) -> ProtocolStats {
        self.state.protocol_stats()
    }

    pub fn get_pool(&self, pool_id: PoolId) -> Option<&Pool> {
        self.state.pool(pool_id)
    }

    pub fn get_stake(&self, pool_id: PoolId, staker: &Principal) -> Option<&Stake> {
        self.state.stake_of(pool_id, staker)
    }

    pub fn get_schedules(&self, pool_id: PoolId) -> &[BonusSchedule] {
        self.state.schedules(pool_id)
    }

    pub fn calculate_pending_rewards(
        &self,
        pool_id: PoolId,
        staker: &Principal,
    ) -> Result<u128, SchedulerError> {
        self.state.pending_rewards(pool_id, staker, self.clock.now())
    }

    pub fn get_current_multiplier(&self, pool_id: PoolId) -> Result<Bps, SchedulerError> {
        self.state.current_multiplier(pool_id, self.clock.now())
    }

    pub fn is_weekend(&self) -> bool {
        self.clock.now().is_weekend()
    }

    /// `0 = Sunday` through `6 = Saturday`.
    pub fn get_day_of_week(&self) -> u8 {
        self.clock.now().day_of_week()
    }

    pub fn generate_pool_status(&self, pool_id: PoolId) -> Result<String, SchedulerError> {
        self.state.pool_status(pool_id, self.clock.now())
    }

    pub fn generate_stake_info(
        &self,
        pool_id: PoolId,
        staker: &Principal,
    ) -> Result<String, SchedulerError> {
        self.state.stake_info(pool_id, staker, self.clock.now())
    }
}

fn logged<T>(
    op: &'static str,
    caller: &Principal,
    result: Result<Outcome<T>, SchedulerError>,
) -> Result<Outcome<T>, SchedulerError> {
    match &result {
        Ok(outcome) => {
            for event in &outcome.events {
                tracing::info!(
                    op,
                    caller = %caller,
                    pool_id = event.pool_id(),
                    event = event.name(),
                    "committed"
                );
            }
        }
        Err(e) => {
            tracing::debug!(op, caller = %caller, code = e.code(), error = %e, "rejected");
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::SchedulerEvent;
    use yield_nullables::NullClock;
    use yield_types::{ScheduleType, SECONDS_PER_DAY};

    // 2024-01-08 00:00 UTC, a Monday.
    const MONDAY: u64 = 1_704_672_000;

    fn admin() -> Principal {
        Principal::new("deployer")
    }

    fn user() -> Principal {
        Principal::new("wallet_1")
    }

    fn scheduler(clock: &NullClock) -> YieldScheduler<&NullClock> {
        YieldScheduler::new(admin(), SchedulerParams::default(), clock)
    }

    #[test]
    fn day_queries_follow_the_clock() {
        let clock = NullClock::new(MONDAY);
        let sched = scheduler(&clock);
        assert_eq!(sched.get_day_of_week(), 1);
        assert!(!sched.is_weekend());

        clock.advance_days(5);
        assert_eq!(sched.get_day_of_week(), 6);
        assert!(sched.is_weekend());
        assert_eq!(sched.get_current_time(), Timestamp::new(MONDAY + 5 * SECONDS_PER_DAY));
    }

    #[test]
    fn pool_creation_uses_clock_time() {
        let clock = NullClock::new(MONDAY + 42);
        let mut sched = scheduler(&clock);
        let id = sched
            .create_pool(&admin(), NewPool::linear("Clocked", 100))
            .unwrap()
            .into_value();
        assert_eq!(sched.get_pool(id).unwrap().created_at, Timestamp::new(MONDAY + 42));
    }

    #[test]
    fn stake_accrue_claim_through_facade() {
        let clock = NullClock::new(MONDAY);
        let mut sched = scheduler(&clock);
        sched
            .create_pool(
                &admin(),
                NewPool::linear("Facade", 1_000).with_initial_rewards(100_000_000),
            )
            .unwrap();
        sched.stake(&user(), 1, 10_000_000).unwrap();

        clock.advance_days(1);
        assert_eq!(sched.calculate_pending_rewards(1, &user()).unwrap(), 1_000_000);
        let claimed = sched.claim_rewards(&user(), 1).unwrap();
        assert_eq!(claimed.value, 1_000_000);
        assert!(matches!(
            claimed.events.as_slice(),
            [SchedulerEvent::RewardsClaimed { amount: 1_000_000, .. }]
        ));
        assert_eq!(sched.get_stake(1, &user()).unwrap().total_earned, 1_000_000);
        assert_eq!(sched.get_protocol_stats().total_rewards_balance, 99_000_000);
    }

    #[test]
    fn schedules_and_multiplier_through_facade() {
        let clock = NullClock::new(MONDAY);
        let mut sched = scheduler(&clock);
        sched
            .create_pool(
                &admin(),
                NewPool::linear("Tiers", 100).with_schedule(ScheduleType::Tiered),
            )
            .unwrap();
        sched.add_stake_tier(&admin(), 1, "Silver", 12_000, 1_000).unwrap();
        let index = sched
            .add_bonus_schedule(&admin(), 1, "Window", 15_000, Timestamp::new(MONDAY), 3_600)
            .unwrap()
            .value;
        assert_eq!(index, 1);
        assert_eq!(sched.get_schedules(1).len(), 2);
        assert_eq!(sched.get_schedules(1)[0].start_time, Timestamp::new(MONDAY));

        // The window has min_stake 0 and was appended later, but Silver's
        // higher threshold wins once it is reached.
        assert_eq!(sched.get_current_multiplier(1).unwrap(), 15_000);
        sched.stake(&user(), 1, 1_000).unwrap();
        assert_eq!(sched.get_current_multiplier(1).unwrap(), 12_000);
    }

    #[test]
    fn failures_leave_state_untouched() {
        let clock = NullClock::new(MONDAY);
        let mut sched = scheduler(&clock);
        sched
            .create_pool(&admin(), NewPool::linear("Guarded", 100).with_min_stake(10))
            .unwrap();
        let before = sched.state().clone();

        assert!(sched.create_pool(&user(), NewPool::linear("Nope", 100)).is_err());
        assert!(sched.stake(&user(), 1, 5).is_err());
        assert!(sched.unstake(&user(), 1, 5).is_err());
        assert!(sched.claim_rewards(&user(), 1).is_err());
        assert!(sched.set_pool_active(&user(), 1, false).is_err());
        assert_eq!(sched.state(), &before);
    }

    #[test]
    fn reports_through_facade() {
        let clock = NullClock::new(MONDAY);
        let mut sched = scheduler(&clock);
        sched
            .create_pool(&admin(), NewPool::linear("Reported", 100))
            .unwrap();
        assert!(sched.generate_pool_status(1).unwrap().contains("Reported"));
        assert!(sched
            .generate_stake_info(1, &user())
            .unwrap()
            .contains("No stake"));
    }

    #[test]
    fn state_survives_a_snapshot_round_trip() {
        let clock = NullClock::new(MONDAY);
        let mut sched = scheduler(&clock);
        sched
            .create_pool(&admin(), NewPool::linear("Persisted", 100))
            .unwrap();
        let bytes = sched.state().to_snapshot().unwrap();

        let restored = YieldScheduler::from_state(LedgerState::from_snapshot(&bytes).unwrap(), &clock);
        assert_eq!(restored.get_pool(1).unwrap().name, "Persisted");
        assert_eq!(sched.into_state(), restored.into_state());
    }
}
