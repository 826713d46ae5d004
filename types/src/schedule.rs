//! Bonus-schedule types a pool can be created with.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::TypesError;

/// How a pool's effective multiplier is derived.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScheduleType {
    /// Constant 1×.
    Linear,
    /// Bonus multiplier on Saturdays and Sundays.
    BonusWeekend,
    /// Step function of the staked amount.
    Tiered,
    /// Elevated multiplier that decays back to 1× over a schedule's duration.
    Decay,
}

impl ScheduleType {
    /// Wire code used by callers and in emitted events.
    pub fn code(&self) -> u8 {
        match self {
            Self::Linear => 0,
            Self::BonusWeekend => 1,
            Self::Tiered => 2,
            Self::Decay => 3,
        }
    }

    pub fn from_code(code: u8) -> Result<Self, TypesError> {
        match code {
            0 => Ok(Self::Linear),
            1 => Ok(Self::BonusWeekend),
            2 => Ok(Self::Tiered),
            3 => Ok(Self::Decay),
            other => Err(TypesError::UnknownScheduleType(other)),
        }
    }

    /// Human-readable name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::BonusWeekend => "bonus-weekend",
            Self::Tiered => "tiered",
            Self::Decay => "decay",
        }
    }
}

impl fmt::Display for ScheduleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ScheduleType {
    type Err = TypesError;

    /// Accepts either the numeric code or the name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(code) = s.parse::<u8>() {
            return Self::from_code(code);
        }
        match s.to_lowercase().as_str() {
            "linear" => Ok(Self::Linear),
            "bonus-weekend" | "weekend" => Ok(Self::BonusWeekend),
            "tiered" => Ok(Self::Tiered),
            "decay" => Ok(Self::Decay),
            _ => Err(TypesError::UnknownScheduleName(s.to_string())),
        }
    }
}
