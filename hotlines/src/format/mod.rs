//! Human-readable rendering of counts and durations
//!
//! Durations are milliseconds. Column helpers right-align to the widths
//! tracked in [`ColumnWidths`] and render "never measured" lines as a
//! centered placeholder so they stand apart from lines that cost zero.

pub mod width;

pub use width::ColumnWidths;

use crate::domain::LineStat;

/// Shown instead of numbers for lines without data
pub const PLACEHOLDER: &str = "·";

/// Appended after every rendered column
pub const COLUMN_SEPARATOR: &str = " | ";

/// Severity thresholds in milliseconds (both exclusive, so exactly 100ms is
/// neither medium nor high)
const HIGH_THRESHOLD_MS: f64 = 100.0;
const MEDIUM_THRESHOLD_MS: f64 = 10.0;

/// Presentation-only classification of a duration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeverityTier {
    #[default]
    None,
    Medium,
    High,
}

impl SeverityTier {
    /// Text marker used in reports: `[X]` high, `[!]` medium, `[-]` otherwise
    #[must_use]
    pub fn marker(self) -> &'static str {
        match self {
            SeverityTier::High => "[X]",
            SeverityTier::Medium => "[!]",
            SeverityTier::None => "[-]",
        }
    }
}

/// Classify a duration: above 100ms is high, strictly between 10ms and
/// 100ms is medium
#[must_use]
pub fn severity_tier(time_ms: f64) -> SeverityTier {
    if time_ms > HIGH_THRESHOLD_MS {
        SeverityTier::High
    } else if time_ms > MEDIUM_THRESHOLD_MS && time_ms < HIGH_THRESHOLD_MS {
        SeverityTier::Medium
    } else {
        SeverityTier::None
    }
}

/// Format a duration: `"1.5s"` from one second up, `"7ms"` below
#[must_use]
pub fn format_duration(ms: f64) -> String {
    if ms >= 1000.0 {
        format!("{:.1}s", ms / 1000.0)
    } else {
        format!("{ms:.0}ms")
    }
}

/// Right-aligned count column for a line, or the placeholder without data
#[must_use]
pub fn format_count(stat: Option<LineStat>, widths: &ColumnWidths) -> String {
    match stat.filter(|s| !s.is_empty()) {
        Some(stat) => column(&stat.count.to_string(), widths.count()),
        None => placeholder_column(widths.count()),
    }
}

/// Right-aligned duration column for a line, or the placeholder without data
#[must_use]
pub fn format_duration_column(stat: Option<LineStat>, widths: &ColumnWidths) -> String {
    match stat.filter(|s| !s.is_empty()) {
        Some(stat) => column(&format_duration(stat.time), widths.duration()),
        None => placeholder_column(widths.duration()),
    }
}

fn column(text: &str, width: usize) -> String {
    format!("{text:>width$}{COLUMN_SEPARATOR}")
}

fn placeholder_column(width: usize) -> String {
    format!("{PLACEHOLDER:^width$}{COLUMN_SEPARATOR}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration_boundaries() {
        assert_eq!(format_duration(999.0), "999ms");
        assert_eq!(format_duration(1000.0), "1.0s");
        assert_eq!(format_duration(1500.0), "1.5s");
        assert_eq!(format_duration(7.0), "7ms");
        assert_eq!(format_duration(0.0), "0ms");
        assert_eq!(format_duration(61_340.0), "61.3s");
    }

    #[test]
    fn test_format_duration_rounds_sub_millisecond() {
        assert_eq!(format_duration(0.3), "0ms");
        assert_eq!(format_duration(12.7), "13ms");
    }

    #[test]
    fn test_severity_tiers() {
        assert_eq!(severity_tier(100.0), SeverityTier::None);
        assert_eq!(severity_tier(101.0), SeverityTier::High);
        assert_eq!(severity_tier(11.0), SeverityTier::Medium);
        assert_eq!(severity_tier(10.0), SeverityTier::None);
        assert_eq!(severity_tier(0.0), SeverityTier::None);
    }

    #[test]
    fn test_severity_boundaries_are_exclusive() {
        assert_eq!(severity_tier(100.0), SeverityTier::None);
        assert_eq!(severity_tier(100.5), SeverityTier::High);
        assert_eq!(severity_tier(99.9), SeverityTier::Medium);
        assert_eq!(severity_tier(10.5), SeverityTier::Medium);
        assert_eq!(severity_tier(10.0), SeverityTier::None);
    }

    #[test]
    fn test_count_column_right_aligns() {
        let mut widths = ColumnWidths::new();
        widths.observe(1234, "5ms");
        assert_eq!(format_count(Some(LineStat::new(7, 1.0)), &widths), "   7 | ");
        assert_eq!(format_count(Some(LineStat::new(1234, 1.0)), &widths), "1234 | ");
    }

    #[test]
    fn test_duration_column_right_aligns() {
        let mut widths = ColumnWidths::new();
        widths.observe(1, "120ms");
        assert_eq!(format_duration_column(Some(LineStat::new(1, 7.0)), &widths), "  7ms | ");
        assert_eq!(format_duration_column(Some(LineStat::new(1, 1500.0)), &widths), " 1.5s | ");
    }

    #[test]
    fn test_no_data_renders_placeholder() {
        let mut widths = ColumnWidths::new();
        widths.observe(100, "12ms");

        let empty = Some(LineStat::default());
        assert_eq!(format_count(empty, &widths), " ·  | ");
        assert_eq!(format_duration_column(empty, &widths), " ·   | ");
        assert_eq!(format_count(None, &widths), " ·  | ");
        assert!(!format_count(empty, &widths).contains('0'));
        assert!(!format_duration_column(None, &widths).contains('0'));
    }

    #[test]
    fn test_measured_zero_time_is_not_placeholder() {
        let widths = ColumnWidths::new();
        let stat = Some(LineStat::new(3, 0.0));
        assert_eq!(format_count(stat, &widths), "3 | ");
        assert_eq!(format_duration_column(stat, &widths), "0ms | ");
    }

    #[test]
    fn test_severity_markers() {
        assert_eq!(SeverityTier::High.marker(), "[X]");
        assert_eq!(SeverityTier::Medium.marker(), "[!]");
        assert_eq!(SeverityTier::None.marker(), "[-]");
    }
}
