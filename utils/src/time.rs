//! Duration formatting for reports and logs.

const UNITS: [(u64, &str); 4] = [(86_400, "d"), (3_600, "h"), (60, "m"), (1, "s")];

/// Render a duration with its two most significant non-zero units,
/// e.g. `90_061 -> "1d 1h"`, `86_400 -> "1d"`, `61 -> "1m 1s"`.
pub fn format_duration(secs: u64) -> String {
    if secs == 0 {
        return "0s".to_string();
    }
    let mut rest = secs;
    let parts: Vec<String> = UNITS
        .iter()
        .filter_map(|&(size, suffix)| {
            let n = rest / size;
            rest %= size;
            (n > 0).then(|| format!("{n}{suffix}"))
        })
        .take(2)
        .collect();
    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_and_small_values() {
        assert_eq!(format_duration(0), "0s");
        assert_eq!(format_duration(59), "59s");
        assert_eq!(format_duration(61), "1m 1s");
    }

    #[test]
    fn drops_zero_units() {
        assert_eq!(format_duration(3_600), "1h");
        assert_eq!(format_duration(86_400), "1d");
        assert_eq!(format_duration(2 * 86_400 + 30), "2d 30s");
    }

    #[test]
    fn keeps_two_most_significant_units() {
        assert_eq!(format_duration(3_661), "1h 1m");
        assert_eq!(format_duration(90_061), "1d 1h");
        assert_eq!(format_duration(169_200), "1d 23h");
    }
}
