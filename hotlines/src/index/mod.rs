//! Multi-source line index
//!
//! Holds one aggregated file index per enabled data source, positionally
//! aligned with the enabled-source list, plus the column widths observed while
//! building it. An index is immutable once built: every change to the set or
//! content of sources produces a brand new index.
//!
//! ## Data Flow
//!
//! ```text
//! DataSource[] ──► load (per source) ──► Snapshot ──► aggregate() ──► LoadedSource
//!                      │                                  │
//!                      └─► SourceDiagnostic               └─► ColumnWidths
//! ```

pub mod context;
pub mod worker;

pub use context::ProfileContext;
pub use worker::{RebuildOutcome, RebuildWorker};

use std::sync::Arc;

use log::{info, warn};

use crate::analysis::{
    aggregate, rank_current_file_hot_lines, rank_hot_lines, AggregatedFileIndex, HotLineEntry,
    LineMap,
};
use crate::domain::{
    DataSource, LineNumber, LineStat, NormalizedName, SourceDiagnostic, SourceError,
};
use crate::format::ColumnWidths;
use crate::snapshot::Snapshot;

/// Turns a source location into a parsed snapshot
pub type Loader = Arc<dyn Fn(&str) -> Result<Snapshot, SourceError> + Send + Sync>;

/// Loader reading profile documents from the local filesystem
#[must_use]
pub fn file_loader() -> Loader {
    Arc::new(|location: &str| Snapshot::from_file(location))
}

/// One enabled source after a rebuild
#[derive(Debug)]
pub struct LoadedSource {
    pub location: String,
    /// `None` if the source failed to load
    pub snapshot: Option<Snapshot>,
    /// Empty if the source failed to load
    pub files: AggregatedFileIndex,
}

/// Aggregated view over every enabled source.
#[derive(Debug, Default)]
pub struct MultiSourceIndex {
    sources: Vec<LoadedSource>,
    widths: ColumnWidths,
}

impl MultiSourceIndex {
    /// Load and aggregate every enabled source.
    ///
    /// A source that fails to load keeps its slot with no data and yields a
    /// diagnostic; its siblings load normally.
    pub fn build<F>(sources: &[DataSource], load: F) -> (Self, Vec<SourceDiagnostic>)
    where
        F: Fn(&str) -> Result<Snapshot, SourceError>,
    {
        let mut index = MultiSourceIndex::default();
        let mut diagnostics = Vec::new();

        for source in sources.iter().filter(|s| s.enabled) {
            let source_index = index.sources.len();
            let loaded = match load(&source.location) {
                Ok(snapshot) => {
                    let files = aggregate(&snapshot, &mut index.widths);
                    LoadedSource {
                        location: source.location.clone(),
                        snapshot: Some(snapshot),
                        files,
                    }
                }
                Err(error) => {
                    warn!("skipping profile source: {error}");
                    diagnostics.push(SourceDiagnostic { source_index, error });
                    LoadedSource {
                        location: source.location.clone(),
                        snapshot: None,
                        files: AggregatedFileIndex::new(),
                    }
                }
            };
            index.sources.push(loaded);
        }

        info!(
            "rebuilt line index: {} of {} enabled sources loaded",
            index.loaded_count(),
            index.sources.len()
        );
        (index, diagnostics)
    }

    /// Number of enabled sources, loaded or not
    #[must_use]
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Number of sources that parsed successfully
    #[must_use]
    pub fn loaded_count(&self) -> usize {
        self.sources.iter().filter(|s| s.snapshot.is_some()).count()
    }

    #[must_use]
    pub fn sources(&self) -> &[LoadedSource] {
        &self.sources
    }

    #[must_use]
    pub fn widths(&self) -> &ColumnWidths {
        &self.widths
    }

    #[must_use]
    pub fn snapshot(&self, source_index: usize) -> Option<&Snapshot> {
        self.sources.get(source_index)?.snapshot.as_ref()
    }

    /// All successfully loaded snapshots, in source order
    pub fn snapshots(&self) -> impl Iterator<Item = &Snapshot> {
        self.sources.iter().filter_map(|s| s.snapshot.as_ref())
    }

    /// Merged line map of one file in one source
    #[must_use]
    pub fn file_stats(&self, source_index: usize, name: &NormalizedName) -> Option<&LineMap> {
        self.sources.get(source_index)?.files.get(name)
    }

    /// Merged stats of one line in one source; `None` means no data
    #[must_use]
    pub fn line_stat(
        &self,
        source_index: usize,
        name: &NormalizedName,
        line: LineNumber,
    ) -> Option<LineStat> {
        self.file_stats(source_index, name)?.get(&line).copied()
    }

    /// Stats of one line summed across every source that has data for it
    #[must_use]
    pub fn combined_line_stat(&self, name: &NormalizedName, line: LineNumber) -> Option<LineStat> {
        (0..self.sources.len())
            .filter_map(|i| self.line_stat(i, name, line))
            .reduce(|total, stat| total + stat)
    }

    /// Top lines of one source; empty for unknown or failed sources
    #[must_use]
    pub fn rank_hot_lines(&self, source_index: usize) -> Vec<HotLineEntry> {
        self.snapshot(source_index).map(rank_hot_lines).unwrap_or_default()
    }

    /// Top lines of one file across every loaded source
    #[must_use]
    pub fn rank_current_file_hot_lines(&self, name: &NormalizedName) -> Vec<HotLineEntry> {
        rank_current_file_hot_lines(self.snapshots(), name)
    }
}
