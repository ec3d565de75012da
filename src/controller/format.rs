//! Display formatting for remaining time

use std::time::Duration;

/// Render remaining time as zero-padded `MM:SS`.
///
/// Partial seconds are truncated, so 59 999 ms shows as `00:59`.
pub fn format_time(remaining: Duration) -> String {
    let millis = remaining.as_millis();
    let minutes = millis / 60_000;
    let seconds = (millis % 60_000) / 1000;
    format!("{:02}:{:02}", minutes, seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fmt_ms(ms: u64) -> String {
        format_time(Duration::from_millis(ms))
    }

    #[test]
    fn formats_presets() {
        assert_eq!(fmt_ms(60_000), "01:00");
        assert_eq!(fmt_ms(120_000), "02:00");
        assert_eq!(fmt_ms(180_000), "03:00");
    }

    #[test]
    fn zero_pads_minutes_and_seconds() {
        assert_eq!(fmt_ms(0), "00:00");
        assert_eq!(fmt_ms(1000), "00:01");
        assert_eq!(fmt_ms(61_000), "01:01");
        assert_eq!(fmt_ms(599_000), "09:59");
    }

    #[test]
    fn truncates_partial_seconds() {
        assert_eq!(fmt_ms(999), "00:00");
        assert_eq!(fmt_ms(59_999), "00:59");
    }
}
