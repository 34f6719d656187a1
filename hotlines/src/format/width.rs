//! Column width tracking for aligned count/duration columns

/// Narrowest count column
pub const MIN_COUNT_WIDTH: usize = 1;

/// Narrowest duration column, wide enough for `"0ms"`
pub const MIN_DURATION_WIDTH: usize = 3;

/// Running maxima of rendered count and duration widths.
///
/// Widths only grow while data is observed. A full reload starts again from
/// the floor values via [`ColumnWidths::reset`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnWidths {
    count: usize,
    duration: usize,
}

impl Default for ColumnWidths {
    fn default() -> Self {
        Self { count: MIN_COUNT_WIDTH, duration: MIN_DURATION_WIDTH }
    }
}

impl ColumnWidths {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Grow the maxima to fit one reading
    pub fn observe(&mut self, count: u64, formatted_duration: &str) {
        self.count = self.count.max(count.to_string().chars().count());
        self.duration = self.duration.max(formatted_duration.chars().count());
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }

    #[must_use]
    pub fn duration(&self) -> usize {
        self.duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_floor() {
        let widths = ColumnWidths::new();
        assert_eq!(widths.count(), 1);
        assert_eq!(widths.duration(), 3);
    }

    #[test]
    fn test_observe_grows_monotonically() {
        let mut widths = ColumnWidths::new();
        widths.observe(12345, "1.5s");
        assert_eq!(widths.count(), 5);
        assert_eq!(widths.duration(), 4);

        // Smaller readings never shrink the columns
        widths.observe(7, "7ms");
        assert_eq!(widths.count(), 5);
        assert_eq!(widths.duration(), 4);

        widths.observe(1, "999ms");
        assert_eq!(widths.duration(), 5);
    }

    #[test]
    fn test_reset_restores_floor() {
        let mut widths = ColumnWidths::new();
        widths.observe(1_000_000, "123.4s");
        widths.reset();
        assert_eq!(widths, ColumnWidths::default());
    }
}
