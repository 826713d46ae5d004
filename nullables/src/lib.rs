//! Nullable infrastructure for deterministic testing.
//!
//! Inspired by the "A-frame architecture" pattern from RsNano. The scheduler's
//! only external input is time, read through the `Clock` trait in
//! `yield-types`; [`NullClock`] is the controllable stand-in used by tests and
//! by `yield-cli --at`.

pub mod clock;

pub use clock::NullClock;
