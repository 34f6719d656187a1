//! Domain types providing compile-time safety and self-documentation
//!
//! These wrappers keep file-name matching and line statistics explicit in
//! function signatures instead of passing bare strings and tuples around.

use std::fmt;
use std::ops::{Add, AddAssign};

/// Line number within a source file (1-based).
pub type LineNumber = u32;

/// Execution statistics for one source line.
///
/// `time` is elapsed wall time in milliseconds. A stat with both fields at
/// zero means "never measured" and is rendered differently from a line that
/// was measured and cost nothing.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LineStat {
    pub count: u64,
    pub time: f64,
}

impl LineStat {
    #[must_use]
    pub fn new(count: u64, time: f64) -> Self {
        Self { count, time }
    }

    /// Returns true if this stat carries no measurement at all
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn is_empty(self) -> bool {
        self.count == 0 && self.time == 0.0
    }
}

/// Counts saturate at `u64::MAX` instead of overflowing.
impl Add for LineStat {
    type Output = LineStat;

    fn add(mut self, rhs: LineStat) -> LineStat {
        self += rhs;
        self
    }
}

impl AddAssign for LineStat {
    fn add_assign(&mut self, rhs: LineStat) {
        self.count = self.count.saturating_add(rhs.count);
        self.time += rhs.time;
    }
}

/// Lower-cased base file name used to match profiled files with the file
/// currently being displayed.
///
/// Directories are ignored, so `/a/util.py` and `/b/Util.py` are the same
/// file as far as lookups are concerned.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NormalizedName(String);

impl NormalizedName {
    /// Normalize a file key or path (either `/` or `\` separated)
    #[must_use]
    pub fn from_path(path: &str) -> Self {
        Self(base_name(path).to_lowercase())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NormalizedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for NormalizedName {
    fn from(path: &str) -> Self {
        NormalizedName::from_path(path)
    }
}

/// Final path component, keeping its original case
#[must_use]
pub fn base_name(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

/// A user-managed profiling data source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataSource {
    pub location: String,
    pub enabled: bool,
}

impl DataSource {
    /// Create an enabled source
    #[must_use]
    pub fn new(location: impl Into<String>) -> Self {
        Self { location: location.into(), enabled: true }
    }

    /// Create a source that is listed but does not participate in aggregation
    #[must_use]
    pub fn disabled(location: impl Into<String>) -> Self {
        Self { location: location.into(), enabled: false }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = if self.enabled { "on" } else { "off" };
        write!(f, "{} [{state}]", self.location)
    }
}
