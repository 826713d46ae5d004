//! End-to-end scenarios against the scheduler facade with a controlled clock.

use yield_nullables::NullClock;
use yield_scheduler::{
    NewPool, SchedulerError, SchedulerEvent, StakeShortfall, YieldScheduler,
};
use yield_types::{Principal, ScheduleType, SchedulerParams, Timestamp, SECONDS_PER_DAY};

// 2024-01-08 00:00 UTC, a Monday.
const MONDAY: u64 = 1_704_672_000;

fn deployer() -> Principal {
    Principal::new("deployer")
}

fn wallet(n: u8) -> Principal {
    Principal::new(format!("wallet_{n}"))
}

fn setup(clock: &NullClock) -> YieldScheduler<&NullClock> {
    YieldScheduler::new(deployer(), SchedulerParams::default(), clock)
}

fn stx_pool() -> NewPool {
    NewPool::linear("STX Staking Pool", 100)
        .with_min_stake(1_000_000)
        .with_cooldown(86_400)
        .with_initial_rewards(100_000_000)
}

#[test]
fn admin_creates_first_pool_with_id_one() {
    let clock = NullClock::new(MONDAY);
    let mut sched = setup(&clock);
    let outcome = sched.create_pool(&deployer(), stx_pool()).unwrap();
    assert_eq!(outcome.value, 1);

    let pool = sched.get_pool(1).unwrap();
    assert_eq!(pool.reward_rate_bps, 100);
    assert_eq!(pool.schedule_type, ScheduleType::Linear);
    assert_eq!(pool.min_stake, 1_000_000);
    assert_eq!(pool.cooldown_period, 86_400);
    assert_eq!(pool.rewards_balance, 100_000_000);
}

#[test]
fn non_admin_create_fails_without_consuming_an_id() {
    let clock = NullClock::new(MONDAY);
    let mut sched = setup(&clock);
    let err = sched.create_pool(&wallet(1), stx_pool()).unwrap_err();
    assert!(matches!(err, SchedulerError::NotAuthorized(_)));
    assert_eq!(sched.get_protocol_stats().total_pools, 0);

    assert_eq!(sched.create_pool(&deployer(), stx_pool()).unwrap().value, 1);
}

#[test]
fn zero_reward_rate_is_rejected() {
    let clock = NullClock::new(MONDAY);
    let mut sched = setup(&clock);
    let err = sched
        .create_pool(&deployer(), NewPool::linear("Zero Rate Pool", 0))
        .unwrap_err();
    assert!(matches!(err, SchedulerError::InvalidAmount(_)));
}

#[test]
fn stake_below_pool_minimum_is_rejected() {
    let clock = NullClock::new(MONDAY);
    let mut sched = setup(&clock);
    sched
        .create_pool(
            &deployer(),
            NewPool::linear("Min Stake Pool", 100).with_min_stake(10_000_000),
        )
        .unwrap();
    let err = sched.stake(&wallet(1), 1, 5_000_000).unwrap_err();
    assert!(matches!(
        err,
        SchedulerError::InsufficientStake(StakeShortfall::BelowMinimum { .. })
    ));
}

#[test]
fn immediate_claim_after_stake_has_no_rewards() {
    let clock = NullClock::new(MONDAY);
    let mut sched = setup(&clock);
    sched
        .create_pool(
            &deployer(),
            NewPool::linear("No Rewards Pool", 100).with_initial_rewards(100_000_000),
        )
        .unwrap();
    sched.stake(&wallet(1), 1, 10_000_000).unwrap();
    assert_eq!(
        sched.claim_rewards(&wallet(1), 1).unwrap_err(),
        SchedulerError::NoRewards
    );
}

#[test]
fn unstake_more_than_staked_is_rejected() {
    let clock = NullClock::new(MONDAY);
    let mut sched = setup(&clock);
    sched.create_pool(&deployer(), stx_pool()).unwrap();
    sched.stake(&wallet(1), 1, 10_000_000).unwrap();
    let err = sched.unstake(&wallet(1), 1, 20_000_000).unwrap_err();
    assert_eq!(
        err,
        SchedulerError::InsufficientStake(StakeShortfall::ExceedsStaked {
            requested: 20_000_000,
            staked: 10_000_000,
        })
    );
}

#[test]
fn second_unstake_waits_for_cooldown() {
    let clock = NullClock::new(MONDAY);
    let mut sched = setup(&clock);
    sched.create_pool(&deployer(), stx_pool()).unwrap();
    sched.stake(&wallet(1), 1, 10_000_000).unwrap();
    sched.unstake(&wallet(1), 1, 2_000_000).unwrap();

    clock.advance(86_399);
    assert_eq!(
        sched.unstake(&wallet(1), 1, 2_000_000).unwrap_err(),
        SchedulerError::CooldownActive { remaining_secs: 1 }
    );

    clock.advance(1);
    sched.unstake(&wallet(1), 1, 2_000_000).unwrap();
    assert_eq!(sched.get_stake(1, &wallet(1)).unwrap().amount, 6_000_000);
}

#[test]
fn every_failure_leaves_a_byte_identical_snapshot() {
    let clock = NullClock::new(MONDAY);
    let mut sched = setup(&clock);
    sched.create_pool(&deployer(), stx_pool()).unwrap();
    sched.stake(&wallet(1), 1, 10_000_000).unwrap();
    sched.unstake(&wallet(1), 1, 1_000_000).unwrap();
    let before = sched.state().to_snapshot().unwrap();

    let failures: Vec<SchedulerError> = vec![
        sched.create_pool(&wallet(1), stx_pool()).unwrap_err(),
        sched.create_pool(&deployer(), NewPool::linear("", 100)).unwrap_err(),
        sched.fund_rewards_pool(&wallet(2), 9, 10).unwrap_err(),
        sched.fund_rewards_pool(&wallet(2), 1, 0).unwrap_err(),
        sched.set_pool_active(&wallet(1), 1, false).unwrap_err(),
        sched
            .add_bonus_schedule(&deployer(), 1, "Bad", 0, Timestamp::new(MONDAY), 10)
            .unwrap_err(),
        sched.add_stake_tier(&wallet(1), 1, "Gold", 15_000, 1).unwrap_err(),
        sched.stake(&wallet(2), 1, 999_999).unwrap_err(),
        sched.stake(&wallet(2), 2, 10_000_000).unwrap_err(),
        sched.unstake(&wallet(1), 1, 1_000_000).unwrap_err(),
        sched.unstake(&wallet(1), 1, 0).unwrap_err(),
        sched.unstake(&wallet(2), 1, 1).unwrap_err(),
        sched.claim_rewards(&wallet(1), 1).unwrap_err(),
        sched.compound(&wallet(1), 1).unwrap_err(),
        sched.claim_rewards(&wallet(2), 1).unwrap_err(),
    ];
    assert_eq!(failures.len(), 15);
    assert_eq!(sched.state().to_snapshot().unwrap(), before);
}

#[test]
fn every_success_emits_exactly_one_event() {
    let clock = NullClock::new(MONDAY);
    let mut sched = setup(&clock);
    let d = deployer();
    let u = wallet(1);

    let names = [
        sched
            .create_pool(&d, stx_pool().with_schedule(ScheduleType::Tiered))
            .unwrap()
            .events,
        sched.fund_rewards_pool(&u, 1, 5_000_000).unwrap().events,
        sched
            .add_bonus_schedule(&d, 1, "Launch", 15_000, Timestamp::new(MONDAY), 3_600)
            .unwrap()
            .events,
        sched.add_stake_tier(&d, 1, "Gold", 20_000, 50_000_000).unwrap().events,
        sched.stake(&u, 1, 10_000_000).unwrap().events,
        {
            clock.advance_days(1);
            sched.claim_rewards(&u, 1).unwrap().events
        },
        {
            clock.advance_days(1);
            sched.compound(&u, 1).unwrap().events
        },
        sched.unstake(&u, 1, 1_000_000).unwrap().events,
        sched.set_pool_active(&d, 1, false).unwrap().events,
    ]
    .map(|events| {
        assert_eq!(events.len(), 1);
        events[0].name()
    });

    assert_eq!(
        names,
        [
            "pool-created",
            "pool-funded",
            "bonus-schedule-added",
            "bonus-schedule-added",
            "staked",
            "rewards-claimed",
            "compounded",
            "unstaked",
            "pool-status-changed",
        ]
    );
}

#[test]
fn weekend_pool_doubles_accrual_on_weekends() {
    let clock = NullClock::new(MONDAY);
    let mut sched = setup(&clock);
    sched
        .create_pool(
            &deployer(),
            NewPool::linear("Weekend Pool", 1_000)
                .with_schedule(ScheduleType::BonusWeekend)
                .with_initial_rewards(1_000_000_000),
        )
        .unwrap();
    assert_eq!(sched.get_current_multiplier(1).unwrap(), 10_000);

    sched.stake(&wallet(1), 1, 86_400_000).unwrap();
    clock.advance(3_600);
    let weekday = sched.calculate_pending_rewards(1, &wallet(1)).unwrap();

    // Saturday: re-base with a claim, then accrue the same hour.
    clock.set(MONDAY + 5 * SECONDS_PER_DAY);
    assert!(sched.is_weekend());
    assert_eq!(sched.get_current_multiplier(1).unwrap(), 20_000);
    sched.claim_rewards(&wallet(1), 1).unwrap();
    clock.advance(3_600);
    let weekend = sched.calculate_pending_rewards(1, &wallet(1)).unwrap();
    assert_eq!(weekday, 360_000);
    assert_eq!(weekend, weekday * 2);
}

#[test]
fn repeated_stakes_accumulate() {
    let clock = NullClock::new(MONDAY);
    let mut sched = setup(&clock);
    sched.create_pool(&deployer(), stx_pool()).unwrap();
    sched.stake(&wallet(1), 1, 10_000_000).unwrap();
    sched.stake(&wallet(1), 1, 5_000_000).unwrap();
    sched.stake(&wallet(2), 1, 2_000_000).unwrap();

    assert_eq!(sched.get_stake(1, &wallet(1)).unwrap().amount, 15_000_000);
    assert_eq!(sched.get_pool(1).unwrap().total_staked, 17_000_000);
    assert_eq!(sched.get_protocol_stats().total_staked, 17_000_000);
}

#[test]
fn compounding_daily_beats_claiming_daily() {
    let clock = NullClock::new(MONDAY);
    let mut sched = setup(&clock);
    let pool = NewPool::linear("Compound Pool", 500).with_initial_rewards(1_000_000_000);
    sched.create_pool(&deployer(), pool.clone()).unwrap();
    sched.create_pool(&deployer(), pool).unwrap();
    sched.stake(&wallet(1), 1, 100_000_000).unwrap();
    sched.stake(&wallet(1), 2, 100_000_000).unwrap();

    for _ in 0..10 {
        clock.advance_days(1);
        sched.compound(&wallet(1), 1).unwrap();
        sched.claim_rewards(&wallet(1), 2).unwrap();
    }

    let compounded = sched.get_stake(1, &wallet(1)).unwrap();
    let claimed = sched.get_stake(2, &wallet(1)).unwrap();
    assert_eq!(claimed.amount, 100_000_000);
    assert_eq!(claimed.total_earned, 50_000_000);
    assert_eq!(compounded.amount, 100_000_000 + compounded.total_earned);
    assert!(compounded.total_earned > claimed.total_earned);
}

#[test]
fn deactivated_pool_hides_from_stakers_until_reactivated() {
    let clock = NullClock::new(MONDAY);
    let mut sched = setup(&clock);
    sched.create_pool(&deployer(), stx_pool()).unwrap();
    sched.stake(&wallet(1), 1, 10_000_000).unwrap();
    sched.set_pool_active(&deployer(), 1, false).unwrap();
    clock.advance_days(1);

    assert_eq!(
        sched.calculate_pending_rewards(1, &wallet(1)).unwrap_err(),
        SchedulerError::PoolNotFound(1)
    );
    assert!(sched.generate_pool_status(1).unwrap().contains("inactive"));
    // Funding still works while inactive.
    sched.fund_rewards_pool(&wallet(2), 1, 1).unwrap();

    sched.set_pool_active(&deployer(), 1, true).unwrap();
    assert_eq!(sched.calculate_pending_rewards(1, &wallet(1)).unwrap(), 100_000);
}

#[test]
fn events_render_as_kebab_case_json() {
    let clock = NullClock::new(MONDAY);
    let mut sched = setup(&clock);
    let events = sched.create_pool(&deployer(), stx_pool()).unwrap().events;
    let json = serde_json::to_value(&events[0]).unwrap();
    assert_eq!(json["event"], "pool-created");
    assert_eq!(json["pool-id"], 1);
    assert_eq!(json["creator"], "deployer");
    assert_eq!(json["schedule-type"], 0);
    assert_eq!(json["reward-rate"], 100);
    assert_eq!(json["initial-rewards"], 100_000_000u64);
    assert!(matches!(events[0], SchedulerEvent::PoolCreated { .. }));
}
