//! yield-cli: command-line front end for the yield scheduler.
//!
//! Each invocation loads the ledger snapshot, runs one operation or query,
//! prints the result as JSON on stdout and, for state-changing commands,
//! writes the snapshot back.

mod config;
mod store;

use clap::{Parser, Subcommand};
use config::CliConfig;
use serde::Serialize;
use std::path::PathBuf;
use yield_nullables::NullClock;
use yield_scheduler::{LedgerState, NewPool, Outcome, SchedulerError, SchedulerEvent, YieldScheduler};
use yield_types::{Bps, Clock, Principal, ScheduleType, SystemClock, Timestamp};
use yield_utils::LogFormat;

#[derive(Parser)]
#[command(name = "yield-cli", about = "Yield scheduler: staking pools and reward accrual")]
struct Cli {
    /// Path to a TOML configuration file. File settings are the base;
    /// flags and env vars override them.
    #[arg(long, env = "YIELD_CONFIG")]
    config: Option<PathBuf>,

    /// Ledger snapshot file.
    #[arg(long, env = "YIELD_STATE_FILE")]
    state: Option<PathBuf>,

    /// Principal issuing the command. Defaults to the ledger's admin.
    #[arg(long, env = "YIELD_CALLER")]
    caller: Option<String>,

    /// Run at this Unix time instead of the wall clock.
    #[arg(long, env = "YIELD_AT")]
    at: Option<u64>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "YIELD_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, env = "YIELD_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the effective configuration as TOML.
    Config,

    /// Create a pool (admin only).
    CreatePool {
        name: String,
        /// Reward per accrual period, in basis points.
        reward_rate: Bps,
        /// linear, bonus-weekend, tiered, decay (or 0-3).
        #[arg(long, default_value = "linear")]
        schedule: ScheduleType,
        #[arg(long, default_value_t = 0)]
        min_stake: u128,
        /// Seconds between unstakes.
        #[arg(long, default_value_t = 0)]
        cooldown: u64,
        #[arg(long, default_value_t = 0)]
        initial_rewards: u128,
    },

    /// Add to a pool's reward balance.
    Fund { pool_id: u64, amount: u128 },

    /// Activate or deactivate a pool (admin only).
    SetPoolActive {
        pool_id: u64,
        #[arg(action = clap::ArgAction::Set)]
        active: bool,
    },

    /// Append a time-window bonus schedule (admin only).
    AddBonusSchedule {
        pool_id: u64,
        name: String,
        /// 10000 = 1x.
        multiplier: Bps,
        /// Unix time the window opens.
        start: u64,
        /// Window length in seconds.
        duration: u64,
    },

    /// Append a stake tier to a tiered pool (admin only).
    AddStakeTier {
        pool_id: u64,
        name: String,
        multiplier: Bps,
        min_stake: u128,
    },

    Stake { pool_id: u64, amount: u128 },

    Unstake { pool_id: u64, amount: u128 },

    Claim { pool_id: u64 },

    Compound { pool_id: u64 },

    /// Current logical time.
    Time,

    Stats,

    Pool { pool_id: u64 },

    /// A stake record; defaults to the caller's.
    GetStake { pool_id: u64, staker: Option<String> },

    Schedules { pool_id: u64 },

    /// Rewards claimable right now; defaults to the caller's.
    Pending { pool_id: u64, staker: Option<String> },

    Multiplier { pool_id: u64 },

    IsWeekend,

    /// 0 = Sunday … 6 = Saturday.
    DayOfWeek,

    PoolStatus { pool_id: u64 },

    StakeInfo { pool_id: u64, staker: Option<String> },
}

impl Command {
    fn mutates(&self) -> bool {
        matches!(
            self,
            Self::CreatePool { .. }
                | Self::Fund { .. }
                | Self::SetPoolActive { .. }
                | Self::AddBonusSchedule { .. }
                | Self::AddStakeTier { .. }
                | Self::Stake { .. }
                | Self::Unstake { .. }
                | Self::Claim { .. }
                | Self::Compound { .. }
        )
    }
}

/// A committed operation as printed on stdout.
#[derive(Serialize)]
struct Committed<'a, T: Serialize> {
    value: T,
    events: &'a [SchedulerEvent],
}

#[derive(Serialize)]
struct Rejected {
    error: String,
    code: u32,
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn committed<T: Serialize>(outcome: Outcome<T>) -> anyhow::Result<()> {
    print_json(&Committed {
        value: outcome.value,
        events: &outcome.events,
    })
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match cli.config {
        Some(ref path) => CliConfig::from_toml_file(path)?,
        None => CliConfig::default(),
    };
    if let Some(state) = cli.state.clone() {
        config.state_file = state;
    }
    if let Some(level) = cli.log_level.clone() {
        config.log_level = level;
    }
    if let Some(format) = cli.log_format {
        config.log_format = format;
    }
    yield_utils::init_logging(config.log_format, &config.log_level);

    let result = match cli.at {
        Some(secs) => run(&cli, &config, NullClock::new(secs)),
        None => run(&cli, &config, SystemClock),
    };

    if let Err(e) = result {
        if let Some(rejected) = e.downcast_ref::<SchedulerError>() {
            print_json(&Rejected {
                error: rejected.to_string(),
                code: rejected.code(),
            })?;
            std::process::exit(1);
        }
        return Err(e);
    }
    Ok(())
}

fn run<C: Clock>(cli: &Cli, config: &CliConfig, clock: C) -> anyhow::Result<()> {
    let admin = Principal::parse(&config.admin)?;
    let state = store::load_or_init(&config.state_file, &admin, &config.params)?;
    let caller = default_caller(cli.caller.as_deref(), &state)?;
    let staker_or_caller = |staker: &Option<String>| -> anyhow::Result<Principal> {
        match staker {
            Some(raw) => Ok(Principal::parse(raw)?),
            None => Ok(caller.clone()),
        }
    };

    let mut sched = YieldScheduler::from_state(state, clock);

    match &cli.command {
        Command::Config => print!("{}", config.to_toml_string()?),
        Command::CreatePool {
            name,
            reward_rate,
            schedule,
            min_stake,
            cooldown,
            initial_rewards,
        } => {
            let new = NewPool::linear(name.clone(), *reward_rate)
                .with_schedule(*schedule)
                .with_min_stake(*min_stake)
                .with_cooldown(*cooldown)
                .with_initial_rewards(*initial_rewards);
            committed(sched.create_pool(&caller, new)?)?;
        }
        Command::Fund { pool_id, amount } => {
            committed(sched.fund_rewards_pool(&caller, *pool_id, *amount)?)?;
        }
        Command::SetPoolActive { pool_id, active } => {
            committed(sched.set_pool_active(&caller, *pool_id, *active)?)?;
        }
        Command::AddBonusSchedule {
            pool_id,
            name,
            multiplier,
            start,
            duration,
        } => {
            committed(sched.add_bonus_schedule(
                &caller,
                *pool_id,
                name.clone(),
                *multiplier,
                Timestamp::new(*start),
                *duration,
            )?)?;
        }
        Command::AddStakeTier {
            pool_id,
            name,
            multiplier,
            min_stake,
        } => {
            committed(sched.add_stake_tier(&caller, *pool_id, name.clone(), *multiplier, *min_stake)?)?;
        }
        Command::Stake { pool_id, amount } => {
            committed(sched.stake(&caller, *pool_id, *amount)?)?;
        }
        Command::Unstake { pool_id, amount } => {
            committed(sched.unstake(&caller, *pool_id, *amount)?)?;
        }
        Command::Claim { pool_id } => {
            committed(sched.claim_rewards(&caller, *pool_id)?)?;
        }
        Command::Compound { pool_id } => {
            committed(sched.compound(&caller, *pool_id)?)?;
        }
        Command::Time => print_json(&sched.get_current_time().as_secs())?,
        Command::Stats => print_json(&sched.get_protocol_stats())?,
        Command::Pool { pool_id } => print_json(&sched.get_pool(*pool_id))?,
        Command::GetStake { pool_id, staker } => {
            let staker = staker_or_caller(staker)?;
            print_json(&sched.get_stake(*pool_id, &staker))?;
        }
        Command::Schedules { pool_id } => print_json(sched.get_schedules(*pool_id))?,
        Command::Pending { pool_id, staker } => {
            let staker = staker_or_caller(staker)?;
            print_json(&sched.calculate_pending_rewards(*pool_id, &staker)?)?;
        }
        Command::Multiplier { pool_id } => {
            print_json(&sched.get_current_multiplier(*pool_id)?)?;
        }
        Command::IsWeekend => print_json(&sched.is_weekend())?,
        Command::DayOfWeek => print_json(&sched.get_day_of_week())?,
        Command::PoolStatus { pool_id } => {
            println!("{}", sched.generate_pool_status(*pool_id)?);
        }
        Command::StakeInfo { pool_id, staker } => {
            let staker = staker_or_caller(staker)?;
            println!("{}", sched.generate_stake_info(*pool_id, &staker)?);
        }
    }

    if cli.command.mutates() {
        store::save(&config.state_file, sched.state())?;
    }
    Ok(())
}

/// `--caller` when given, otherwise the admin recorded in the ledger.
fn default_caller(raw: Option<&str>, state: &LedgerState) -> anyhow::Result<Principal> {
    match raw {
        Some(raw) => Ok(Principal::parse(raw)?),
        None => Ok(state.admin.clone()),
    }
}
