//! Process-wide profiling state.
//!
//! `ProfileContext` owns the list of data sources, the live index built from
//! them and the diagnostics of the last rebuild. It is passed by reference to
//! whatever needs read access; there are no ambient globals.
//!
//! Every source management operation (`add_source`, `remove_source`,
//! `set_enabled`) triggers a full rebuild. The live index is replaced as a
//! whole, never patched in place.
//!
//! Each rebuild, synchronous or queued on a [`RebuildWorker`], is issued a
//! new generation number. [`ProfileContext::apply`] only installs outcomes
//! newer than the live index, so a background result requested before a
//! synchronous rebuild cannot revert it.

use std::sync::Arc;

use anyhow::Result;
use log::debug;

use super::{file_loader, Loader, MultiSourceIndex, RebuildOutcome, RebuildWorker};
use crate::analysis::HotLineEntry;
use crate::domain::{DataSource, LineNumber, LineStat, NormalizedName, SourceDiagnostic};
use crate::format::ColumnWidths;

pub struct ProfileContext {
    sources: Vec<DataSource>,
    index: Arc<MultiSourceIndex>,
    diagnostics: Vec<SourceDiagnostic>,
    loader: Loader,
    /// Last generation handed out
    issued: u64,
    /// Generation of the live index
    generation: u64,
}

impl ProfileContext {
    /// Create a context reading sources from disk. Nothing is loaded until
    /// the first [`rebuild`](Self::rebuild).
    #[must_use]
    pub fn new(sources: Vec<DataSource>) -> Self {
        Self::with_loader(sources, file_loader())
    }

    #[must_use]
    pub fn with_loader(sources: Vec<DataSource>, loader: Loader) -> Self {
        Self {
            sources,
            index: Arc::default(),
            diagnostics: Vec::new(),
            loader,
            issued: 0,
            generation: 0,
        }
    }

    fn next_generation(&mut self) -> u64 {
        self.issued += 1;
        self.issued
    }

    /// Drop the live index, its widths and diagnostics; sources are kept
    pub fn reset(&mut self) {
        self.index = Arc::default();
        self.diagnostics.clear();
        self.generation = self.next_generation();
    }

    /// Re-parse every enabled source and replace the live index
    pub fn rebuild(&mut self) -> &[SourceDiagnostic] {
        self.generation = self.next_generation();
        let loader = &self.loader;
        let (index, diagnostics) =
            MultiSourceIndex::build(&self.sources, |location: &str| loader(location));
        self.index = Arc::new(index);
        self.diagnostics = diagnostics;
        &self.diagnostics
    }

    /// Queue a rebuild of the current sources on `worker`
    ///
    /// # Errors
    /// Returns an error if the worker thread has stopped
    pub fn request_rebuild(&mut self, worker: &RebuildWorker) -> Result<()> {
        let generation = self.next_generation();
        worker.request(generation, self.sources.clone())
    }

    /// Install the result of a background rebuild.
    ///
    /// Returns `false` and keeps the live index if the outcome is not newer
    /// than it.
    pub fn apply(&mut self, outcome: RebuildOutcome) -> bool {
        if outcome.generation <= self.generation {
            debug!(
                "ignoring stale rebuild generation {} (live {})",
                outcome.generation, self.generation
            );
            return false;
        }
        debug!("applying rebuild generation {}", outcome.generation);
        self.generation = outcome.generation;
        self.index = outcome.index;
        self.diagnostics = outcome.diagnostics;
        true
    }

    /// Append a source and rebuild
    pub fn add_source(&mut self, source: DataSource) -> &[SourceDiagnostic] {
        self.sources.push(source);
        self.rebuild()
    }

    /// Remove the source at `location` (if listed) and rebuild
    pub fn remove_source(&mut self, location: &str) -> &[SourceDiagnostic] {
        self.sources.retain(|s| s.location != location);
        self.rebuild()
    }

    /// Toggle participation of the source at `location` and rebuild
    pub fn set_enabled(&mut self, location: &str, enabled: bool) -> &[SourceDiagnostic] {
        for source in self.sources.iter_mut().filter(|s| s.location == location) {
            source.enabled = enabled;
        }
        self.rebuild()
    }

    #[must_use]
    pub fn sources(&self) -> &[DataSource] {
        &self.sources
    }

    /// Diagnostics of the last rebuild
    #[must_use]
    pub fn diagnostics(&self) -> &[SourceDiagnostic] {
        &self.diagnostics
    }

    /// Shared handle to the live index
    #[must_use]
    pub fn index(&self) -> Arc<MultiSourceIndex> {
        Arc::clone(&self.index)
    }

    #[must_use]
    pub fn widths(&self) -> &ColumnWidths {
        self.index.widths()
    }

    #[must_use]
    pub fn line_stat(
        &self,
        source_index: usize,
        name: &NormalizedName,
        line: LineNumber,
    ) -> Option<LineStat> {
        self.index.line_stat(source_index, name, line)
    }

    #[must_use]
    pub fn rank_hot_lines(&self, source_index: usize) -> Vec<HotLineEntry> {
        self.index.rank_hot_lines(source_index)
    }

    #[must_use]
    pub fn rank_current_file_hot_lines(&self, name: &NormalizedName) -> Vec<HotLineEntry> {
        self.index.rank_current_file_hot_lines(name)
    }
}

impl std::fmt::Debug for ProfileContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProfileContext")
            .field("sources", &self.sources)
            .field("index", &self.index)
            .field("diagnostics", &self.diagnostics)
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SourceError;
    use crate::snapshot::Snapshot;
    use std::time::Duration;

    fn loader() -> Loader {
        Arc::new(|location: &str| match location {
            "one" => Snapshot::parse(
                location,
                r#"{"a.py": {"f": {"3": {"count": 5, "time": 12}}}}"#,
            ),
            "two" => Snapshot::parse(
                location,
                r#"{"a.py": {"g": {"3": {"count": 2, "time": 3}}}}"#,
            ),
            _ => Err(SourceError::malformed(location, "unknown fixture")),
        })
    }

    fn context(sources: Vec<DataSource>) -> ProfileContext {
        let mut ctx = ProfileContext::with_loader(sources, loader());
        ctx.rebuild();
        ctx
    }

    #[test]
    fn test_rebuild_loads_enabled_sources() {
        let ctx = context(vec![DataSource::new("one"), DataSource::new("two")]);
        let name = NormalizedName::from("a.py");

        assert_eq!(ctx.index().len(), 2);
        assert_eq!(ctx.line_stat(0, &name, 3), Some(LineStat::new(5, 12.0)));
        assert_eq!(ctx.rank_current_file_hot_lines(&name)[0].stat(), LineStat::new(7, 15.0));
    }

    #[test]
    fn test_disabling_source_removes_contribution() {
        let mut ctx = context(vec![DataSource::new("one"), DataSource::new("two")]);
        let name = NormalizedName::from("a.py");

        ctx.set_enabled("one", false);

        assert_eq!(ctx.index().len(), 1);
        assert_eq!(ctx.line_stat(0, &name, 3), Some(LineStat::new(2, 3.0)));
        let ranked = ctx.rank_current_file_hot_lines(&name);
        assert_eq!(ranked[0].stat(), LineStat::new(2, 3.0));
        assert_eq!(ranked[0].function_name, "g");
        assert!(ctx.sources().iter().any(|s| s.location == "one" && !s.enabled));
    }

    #[test]
    fn test_add_and_remove_source_rebuild() {
        let mut ctx = context(vec![DataSource::new("one")]);
        let name = NormalizedName::from("a.py");

        let diagnostics = ctx.add_source(DataSource::new("bogus"));
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].source_index, 1);
        assert_eq!(ctx.line_stat(0, &name, 3), Some(LineStat::new(5, 12.0)));

        assert!(ctx.remove_source("bogus").is_empty());
        assert!(ctx.diagnostics().is_empty());
        assert_eq!(ctx.index().len(), 1);
    }

    #[test]
    fn test_reset_clears_index_and_widths() {
        let mut ctx = context(vec![DataSource::new("one")]);
        assert_eq!(ctx.widths().duration(), 4);

        ctx.reset();

        assert!(ctx.index().is_empty());
        assert_eq!(*ctx.widths(), ColumnWidths::default());
        assert_eq!(ctx.sources().len(), 1);
        assert!(ctx.rank_hot_lines(0).is_empty());
    }

    #[test]
    fn test_readers_keep_old_index_across_rebuild() {
        let mut ctx = context(vec![DataSource::new("one")]);
        let before = ctx.index();

        ctx.add_source(DataSource::new("two"));

        assert_eq!(before.len(), 1);
        assert_eq!(ctx.index().len(), 2);
    }

    #[test]
    fn test_background_outcome_is_applied() {
        let mut ctx = context(vec![DataSource::new("one")]);
        let worker = RebuildWorker::spawn(loader()).unwrap();

        ctx.sources.push(DataSource::new("two"));
        ctx.request_rebuild(&worker).unwrap();
        let outcome = worker.recv_timeout(Duration::from_secs(5)).expect("rebuild finished");

        assert!(ctx.apply(outcome));
        assert_eq!(ctx.index().len(), 2);
    }

    #[test]
    fn test_stale_outcome_does_not_revert_sync_rebuild() {
        let mut ctx = context(vec![DataSource::new("one"), DataSource::new("two")]);
        let worker = RebuildWorker::spawn(loader()).unwrap();

        ctx.request_rebuild(&worker).unwrap();
        let stale = worker.recv_timeout(Duration::from_secs(5)).expect("rebuild finished");
        ctx.set_enabled("two", false);

        assert!(!ctx.apply(stale));
        assert_eq!(ctx.index().len(), 1);
        let name = NormalizedName::from("a.py");
        assert_eq!(ctx.line_stat(0, &name, 3), Some(LineStat::new(5, 12.0)));
    }
}
