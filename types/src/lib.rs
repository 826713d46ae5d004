//! Fundamental types for the yield scheduler.
//!
//! This crate defines the types shared across every other crate in the workspace:
//! principals, timestamps and the clock abstraction, basis-point helpers,
//! schedule types, and the tunable scheduler parameters.

pub mod address;
pub mod bps;
pub mod error;
pub mod params;
pub mod schedule;
pub mod time;

pub use address::Principal;
pub use bps::{Bps, BPS_DENOMINATOR, MULTIPLIER_BASELINE_BPS};
pub use error::TypesError;
pub use params::SchedulerParams;
pub use schedule::ScheduleType;
pub use time::{Clock, SystemClock, Timestamp, SECONDS_PER_DAY};
