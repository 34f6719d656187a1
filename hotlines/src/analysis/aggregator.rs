//! Per-file aggregation of a snapshot.
//!
//! Every file record in a snapshot is folded into a single line map keyed by
//! its normalized (lower-cased base) name. Functions and same-named files are
//! summed together, so the result does not depend on iteration order.
//!
//! ```text
//! Snapshot                                 AggregatedFileIndex
//! "src/A.py" ─ f: {3: (5, 12ms)} ──┐
//!                                  ├──►  "a.py" ─ {3: (7, 15ms)}
//! "lib/a.py" ─ g: {3: (2,  3ms)} ──┘
//! ```

use std::collections::{BTreeMap, HashMap};

use log::debug;

use crate::domain::{LineNumber, LineStat, NormalizedName};
use crate::format::{format_duration, ColumnWidths};
use crate::snapshot::Snapshot;

/// Merged stats for every line of one file
pub type LineMap = BTreeMap<LineNumber, LineStat>;

/// Normalized file name → merged line stats
pub type AggregatedFileIndex = HashMap<NormalizedName, LineMap>;

/// Fold a snapshot into per-file line maps.
///
/// Each individual reading is fed to `widths` before merging, so columns fit
/// the widest single reading seen during the load.
pub fn aggregate(snapshot: &Snapshot, widths: &mut ColumnWidths) -> AggregatedFileIndex {
    let mut index = AggregatedFileIndex::new();

    for (file_key, record) in &snapshot.files {
        let name = NormalizedName::from_path(file_key);
        let lines = index.entry(name).or_default();

        for function in record.functions.values() {
            for (&line, &stat) in function {
                widths.observe(stat.count, &format_duration(stat.time));
                merge_line(lines, line, stat);
            }
        }

        debug!("aggregated {file_key} ({} functions)", record.functions.len());
    }

    index
}

/// Add `stat` into the running total for `line`
pub fn merge_line(lines: &mut LineMap, line: LineNumber, stat: LineStat) {
    *lines.entry(line).or_default() += stat;
}
