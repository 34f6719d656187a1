//! CLI argument definitions

use clap::Parser;
use std::path::PathBuf;

use crate::domain::DataSource;

#[derive(Parser, Debug)]
#[command(
    name = "hotlines",
    about = "Rank the hottest source lines across line-profiler snapshots",
    after_help = "\
EXAMPLES:
    hotlines run1.json run2.json                 Top lines of each snapshot
    hotlines run1.json run2.json --file app.py   Top lines of app.py across snapshots
    hotlines *.json --file app.py --annotate     Print app.py with per-snapshot columns
    hotlines run1.json --disable run1.json       Keep a snapshot listed but ignore it"
)]
pub struct Args {
    /// Profile snapshots to load (JSON)
    #[arg(value_name = "SOURCE")]
    pub sources: Vec<String>,

    /// List a source but leave it out of aggregation (repeatable)
    #[arg(long, value_name = "SOURCE")]
    pub disable: Vec<String>,

    /// Rank the lines of this file across all enabled sources
    #[arg(short, long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Only rank the N-th enabled source (0-based)
    #[arg(short, long, value_name = "N", conflicts_with = "file")]
    pub source: Option<usize>,

    /// Print the file with per-source count and time columns
    #[arg(long, requires = "file")]
    pub annotate: bool,

    /// Re-rank whenever a source changes on disk (Ctrl+C to stop)
    #[arg(short, long)]
    pub watch: bool,

    /// Polling interval for --watch, in milliseconds
    #[arg(long, value_name = "MS", default_value = "1000")]
    pub interval: u64,

    /// Suppress non-essential output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Ordered source list; sources named by `--disable` are kept but off.
    ///
    /// A `--disable` location that is not listed positionally is appended.
    #[must_use]
    pub fn data_sources(&self) -> Vec<DataSource> {
        let mut sources: Vec<DataSource> = self
            .sources
            .iter()
            .map(|location| DataSource {
                location: location.clone(),
                enabled: !self.disable.contains(location),
            })
            .collect();

        for location in &self.disable {
            if !sources.iter().any(|s| &s.location == location) {
                sources.push(DataSource::disabled(location.clone()));
            }
        }

        sources
    }
}
