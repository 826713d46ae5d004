//! Basis-point arithmetic.
//!
//! Rates and multipliers are integers where `10_000` is 100% (or 1×), so all
//! reward math stays in integers.

/// A value in basis points.
pub type Bps = u32;

/// `10_000` basis points = 100%.
pub const BPS_DENOMINATOR: u128 = 10_000;

/// The neutral multiplier (1×).
pub const MULTIPLIER_BASELINE_BPS: Bps = 10_000;

/// Render basis points as a percentage with two decimals, e.g. `525 -> "5.25%"`.
pub fn format_percent(bps: Bps) -> String {
    format!("{}.{:02}%", bps / 100, bps % 100)
}

/// Render a multiplier in basis points as a factor, e.g. `15_000 -> "1.50x"`.
pub fn format_multiplier(bps: Bps) -> String {
    format!("{}.{:02}x", bps / 10_000, (bps % 10_000) / 100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_formatting() {
        assert_eq!(format_percent(100), "1.00%");
        assert_eq!(format_percent(525), "5.25%");
        assert_eq!(format_percent(10_000), "100.00%");
        assert_eq!(format_percent(7), "0.07%");
    }

    #[test]
    fn multiplier_formatting() {
        assert_eq!(format_multiplier(MULTIPLIER_BASELINE_BPS), "1.00x");
        assert_eq!(format_multiplier(20_000), "2.00x");
        assert_eq!(format_multiplier(12_345), "1.23x");
    }
}
