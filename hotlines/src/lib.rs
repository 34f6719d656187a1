//! # hotlines - Line Profile Aggregation and Ranking
//!
//! hotlines merges per-line execution profiles (call counts and elapsed time,
//! keyed by source file, function and line) from any number of independently
//! recorded snapshots and ranks the hottest lines, either per snapshot or for
//! one file across every snapshot.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                  Profile snapshots (JSON)                       │
//! │        file ─► function ─► line ─► { count, time }              │
//! └───────────────────────┬─────────────────────────────────────────┘
//!                         │ one document per data source
//!                         ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    hotlines (This Crate)                        │
//! │                                                                 │
//! │  ┌──────────────┐   ┌──────────────┐   ┌──────────────┐        │
//! │  │   Snapshot   │──▶│  Aggregator  │──▶│ Multi-Source │        │
//! │  │    Parser    │   │  (per file)  │   │    Index     │        │
//! │  └──────────────┘   └──────┬───────┘   └──────┬───────┘        │
//! │                            │                  │                 │
//! │                            ▼                  ▼                 │
//! │                     ┌──────────────┐   ┌──────────────┐        │
//! │                     │ Column Width │   │   Hot-Line   │        │
//! │                     │   Tracking   │   │    Ranker    │        │
//! │                     └──────┬───────┘   └──────┬───────┘        │
//! │                            └────────┬─────────┘                 │
//! │                                     ▼                           │
//! │                              ┌──────────────┐                   │
//! │                              │ Format/Report│                   │
//! │                              └──────────────┘                   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Structure
//!
//! - [`snapshot`]: Parse and validate one profile document into a `Snapshot`
//! - [`analysis`]: Per-file aggregation and hot line ranking (pure functions)
//! - [`index`]: Per-source aggregated indexes, the `ProfileContext` that owns
//!   them, and the background `RebuildWorker`
//! - [`format`]: Duration/count rendering, severity tiers, column widths
//! - [`report`]: Plain-text hot line tables and annotated file listings
//! - [`cli`]: Command-line argument parsing
//! - [`domain`]: Core domain types (`LineStat`, `NormalizedName`, `DataSource`)
//!   and errors
//!
//! ## Key Concepts
//!
//! - **Normalized name**: lower-cased base file name. Files are matched by it
//!   alone, so `/a/util.py` and `/b/Util.py` count as the same file.
//! - **Hot line**: a line with nonzero recorded time, ranked by time.
//! - **No data**: a line with zero count and zero time, rendered as a
//!   placeholder rather than `0`.
//!
//! ## Typical Usage
//!
//! ```bash
//! # Top 50 lines of each snapshot
//! hotlines before.json after.json
//!
//! # Top 30 lines of one file, summed across snapshots, with an annotated listing
//! hotlines before.json after.json --file src/app.py --annotate
//! ```

pub mod analysis;
pub mod cli;
pub mod domain;
pub mod format;
pub mod index;
pub mod report;
pub mod snapshot;
