//! Background index rebuilds.
//!
//! `RebuildWorker` owns a dedicated thread that loads sources off the caller's
//! thread. Requests queued while a rebuild runs are coalesced: only the most
//! recent source list is built next. Each completed rebuild is published as a
//! whole `Arc<MultiSourceIndex>`, so readers never observe a partial index.
//!
//! Every request carries the generation it was issued under (see
//! [`ProfileContext::request_rebuild`](super::ProfileContext::request_rebuild)),
//! and the outcome echoes it back so stale results can be told apart.
//!
//! ```text
//! request(gen, sources) ──► [requests] ──► worker thread ──► [outcomes] ──► try_latest()
//!                                          (coalesce, build)
//! ```

use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use anyhow::{Context, Result};
use crossbeam_channel::{unbounded, Receiver, Sender};
use log::{debug, info};

use super::{Loader, MultiSourceIndex};
use crate::domain::{DataSource, SourceDiagnostic};

/// A completed rebuild, ready to be installed with
/// [`ProfileContext::apply`](super::ProfileContext::apply)
#[derive(Debug)]
pub struct RebuildOutcome {
    /// Generation of the request this index was built for
    pub generation: u64,
    pub index: Arc<MultiSourceIndex>,
    pub diagnostics: Vec<SourceDiagnostic>,
}

/// Sources to build, tagged with the generation they were issued under
#[derive(Debug, Clone, PartialEq)]
struct RebuildRequest {
    generation: u64,
    sources: Vec<DataSource>,
}

pub struct RebuildWorker {
    requests: Option<Sender<RebuildRequest>>,
    outcomes: Receiver<RebuildOutcome>,
    handle: Option<JoinHandle<()>>,
}

impl RebuildWorker {
    /// Spawn the worker thread
    ///
    /// # Errors
    /// Returns an error if the thread cannot be spawned
    pub fn spawn(loader: Loader) -> Result<Self> {
        let (request_tx, request_rx) = unbounded::<RebuildRequest>();
        let (outcome_tx, outcome_rx) = unbounded::<RebuildOutcome>();

        let handle = std::thread::Builder::new()
            .name("hotlines-rebuild".to_string())
            .spawn(move || run(&request_rx, &outcome_tx, &loader))
            .context("Failed to spawn rebuild worker")?;

        Ok(Self { requests: Some(request_tx), outcomes: outcome_rx, handle: Some(handle) })
    }

    /// Queue a rebuild of `sources`, tagged with `generation`
    ///
    /// # Errors
    /// Returns an error if the worker thread has stopped
    pub fn request(&self, generation: u64, sources: Vec<DataSource>) -> Result<()> {
        self.requests
            .as_ref()
            .context("Rebuild worker is shut down")?
            .send(RebuildRequest { generation, sources })
            .context("Rebuild worker stopped")
    }

    /// Most recent completed rebuild, discarding older ones, if any
    #[must_use]
    pub fn try_latest(&self) -> Option<RebuildOutcome> {
        self.outcomes.try_iter().last()
    }

    /// Wait up to `timeout` for the next completed rebuild
    #[must_use]
    pub fn recv_timeout(&self, timeout: Duration) -> Option<RebuildOutcome> {
        self.outcomes.recv_timeout(timeout).ok()
    }
}

impl Drop for RebuildWorker {
    fn drop(&mut self) {
        // Closing the request channel ends the worker loop
        self.requests.take();
        if let Some(handle) = self.handle.take() {
            handle.join().ok();
        }
    }
}

fn run(requests: &Receiver<RebuildRequest>, outcomes: &Sender<RebuildOutcome>, loader: &Loader) {
    let mut completed = 0;

    while let Ok(first) = requests.recv() {
        let (request, skipped) = coalesce(first, requests);
        if skipped > 0 {
            debug!("coalesced {skipped} queued rebuild requests");
        }

        let (index, diagnostics) =
            MultiSourceIndex::build(&request.sources, |location: &str| loader(location));
        completed += 1;

        let outcome =
            RebuildOutcome { generation: request.generation, index: Arc::new(index), diagnostics };
        if outcomes.send(outcome).is_err() {
            break;
        }
    }

    info!("rebuild worker exiting after {completed} rebuilds");
}

/// Drain queued requests, keeping only the newest. Returns it with the
/// number of requests it superseded.
fn coalesce(
    first: RebuildRequest,
    requests: &Receiver<RebuildRequest>,
) -> (RebuildRequest, usize) {
    let mut latest = first;
    let mut skipped = 0;
    for newer in requests.try_iter() {
        latest = newer;
        skipped += 1;
    }
    (latest, skipped)
}
