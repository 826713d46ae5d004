//! Scheduler parameters: the tunable constants behind reward accrual.

use crate::bps::{Bps, MULTIPLIER_BASELINE_BPS};
use crate::error::TypesError;
use crate::time::SECONDS_PER_DAY;
use serde::{Deserialize, Serialize};

/// Parameters shared by every pool in a ledger.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulerParams {
    /// Length (seconds) of the period a pool's `reward_rate_bps` applies to.
    /// A stake of `A` in a pool with rate `r` earns `A * r / 10_000` per period
    /// at 1×. Default: one day.
    #[serde(default = "default_accrual_period_secs")]
    pub accrual_period_secs: u64,

    /// Multiplier applied on weekends by `BonusWeekend` pools when no
    /// explicit bonus schedule covers the current time. Default: 2×.
    #[serde(default = "default_weekend_multiplier_bps")]
    pub weekend_multiplier_bps: Bps,

    /// Maximum pool and schedule name length in bytes.
    #[serde(default = "default_max_name_len")]
    pub max_name_len: usize,
}

fn default_accrual_period_secs() -> u64 {
    SECONDS_PER_DAY
}

fn default_weekend_multiplier_bps() -> Bps {
    20_000
}

fn default_max_name_len() -> usize {
    64
}

impl SchedulerParams {
    /// Hourly accrual, for local experimentation where waiting a day per
    /// period is impractical.
    pub fn fast_defaults() -> Self {
        Self {
            accrual_period_secs: 3600,
            ..Self::default()
        }
    }

    /// Reject parameter sets the accrual math cannot use.
    pub fn validate(&self) -> Result<(), TypesError> {
        if self.accrual_period_secs == 0 {
            return Err(TypesError::InvalidParams(
                "accrual_period_secs must be positive".into(),
            ));
        }
        if self.weekend_multiplier_bps < MULTIPLIER_BASELINE_BPS {
            return Err(TypesError::InvalidParams(format!(
                "weekend_multiplier_bps {} is below the 1x baseline",
                self.weekend_multiplier_bps
            )));
        }
        if self.max_name_len == 0 {
            return Err(TypesError::InvalidParams(
                "max_name_len must be positive".into(),
            ));
        }
        Ok(())
    }
}

impl Default for SchedulerParams {
    fn default() -> Self {
        Self {
            accrual_period_secs: default_accrual_period_secs(),
            weekend_multiplier_bps: default_weekend_multiplier_bps(),
            max_name_len: default_max_name_len(),
        }
    }
}
