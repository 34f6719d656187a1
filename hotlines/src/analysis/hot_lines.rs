//! Hot line ranking.
//!
//! Lines are ranked by elapsed time, never by count: a line executed a
//! million times in no measurable time is not hot.
//!
//! # Modes
//!
//! - **`rank_hot_lines()`** - one snapshot, per-function granularity, top 50
//! - **`rank_current_file_hot_lines()`** - all loaded snapshots restricted to
//!   one normalized file name, lines summed across functions and snapshots,
//!   top 30
//!
//! Both flatten, filter, sort and truncate from scratch on every call and
//! have no side effects.

use std::collections::HashMap;

use crate::domain::{base_name, LineNumber, LineStat, NormalizedName};
use crate::snapshot::Snapshot;

/// Longest list returned by [`rank_hot_lines`]
pub const MAX_HOT_LINES: usize = 50;

/// Longest list returned by [`rank_current_file_hot_lines`]
pub const MAX_CURRENT_FILE_HOT_LINES: usize = 30;

/// A ranked line, denormalized for display.
#[derive(Debug, Clone, PartialEq)]
pub struct HotLineEntry {
    /// Absolute path from the profile (`#path`), or the file key without one
    pub source_path: String,

    /// Base name of `source_path`, original case
    pub file_base_name: String,

    pub line: LineNumber,

    /// Function the stats were attributed to.
    ///
    /// In the current-file view a line reported by several functions keeps
    /// the first label encountered; the stats are still summed.
    pub function_name: String,

    pub count: u64,

    /// Elapsed time in milliseconds
    pub time: f64,
}

impl HotLineEntry {
    fn new(source_path: &str, function_name: &str, line: LineNumber, stat: LineStat) -> Self {
        Self {
            source_path: source_path.to_string(),
            file_base_name: base_name(source_path).to_string(),
            line,
            function_name: function_name.to_string(),
            count: stat.count,
            time: stat.time,
        }
    }

    #[must_use]
    pub fn stat(&self) -> LineStat {
        LineStat::new(self.count, self.time)
    }

    fn add_stat(&mut self, stat: LineStat) {
        let total = self.stat() + stat;
        self.count = total.count;
        self.time = total.time;
    }
}

/// Rank the hottest lines of a single snapshot.
///
/// Every `(function, line)` reading with nonzero time becomes one entry.
/// Ties keep snapshot order (files, then functions, then lines).
#[must_use]
pub fn rank_hot_lines(snapshot: &Snapshot) -> Vec<HotLineEntry> {
    let mut entries = Vec::new();

    for (file_key, record) in &snapshot.files {
        let path = record.display_path(file_key);
        for (function_name, function) in &record.functions {
            for (&line, &stat) in function {
                if stat.time > 0.0 {
                    entries.push(HotLineEntry::new(path, function_name, line, stat));
                }
            }
        }
    }

    top_by_time(entries, MAX_HOT_LINES)
}

/// Rank the hottest lines of one file across every loaded snapshot.
///
/// Stats for the same line are summed across functions and snapshots.
/// Entries are filtered on the summed time.
#[must_use]
pub fn rank_current_file_hot_lines<'a>(
    snapshots: impl IntoIterator<Item = &'a Snapshot>,
    name: &NormalizedName,
) -> Vec<HotLineEntry> {
    let mut entries: Vec<HotLineEntry> = Vec::new();
    // line → position in `entries`, keeps first-seen order for ties
    let mut positions: HashMap<LineNumber, usize> = HashMap::new();

    for snapshot in snapshots {
        for (file_key, record) in &snapshot.files {
            if NormalizedName::from_path(file_key) != *name {
                continue;
            }
            let path = record.display_path(file_key);
            for (function_name, function) in &record.functions {
                for (&line, &stat) in function {
                    match positions.get(&line) {
                        Some(&pos) => entries[pos].add_stat(stat),
                        None => {
                            positions.insert(line, entries.len());
                            entries.push(HotLineEntry::new(path, function_name, line, stat));
                        }
                    }
                }
            }
        }
    }

    entries.retain(|entry| entry.time > 0.0);
    top_by_time(entries, MAX_CURRENT_FILE_HOT_LINES)
}

/// Stable sort by descending time, then keep the first `limit`
fn top_by_time(mut entries: Vec<HotLineEntry>, limit: usize) -> Vec<HotLineEntry> {
    entries.sort_by(|a, b| b.time.total_cmp(&a.time));
    entries.truncate(limit);
    entries
}
