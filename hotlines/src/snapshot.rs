//! Profile snapshot data model and parser
//!
//! A snapshot is one fully parsed profiling data source. The on-disk format is
//! a JSON document keyed by file, then by function, then by line:
//!
//! ```text
//! {
//!   "a.py": {
//!     "#path": "/home/me/proj/a.py",
//!     "main": { "3": { "count": 5, "time": 12.0 } }
//!   }
//! }
//! ```
//!
//! Parsing validates the whole document before anything is returned. A source
//! with any shape or type violation is rejected as a unit.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

use crate::domain::{LineNumber, LineStat, SourceError};

/// Reserved key holding the file's absolute path inside a file record
pub const PATH_KEY: &str = "#path";

/// Per-line stats attributed to one function
pub type FunctionRecord = BTreeMap<LineNumber, LineStat>;

/// All functions profiled in one file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FileRecord {
    /// Absolute path as reported by the producer (`#path`)
    pub path: Option<String>,
    pub functions: BTreeMap<String, FunctionRecord>,
}

impl FileRecord {
    /// Path to show for this file, falling back to its key
    #[must_use]
    pub fn display_path<'a>(&'a self, key: &'a str) -> &'a str {
        self.path.as_deref().unwrap_or(key)
    }
}

/// One parsed profiling data source, keyed by the producer's file key
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub files: BTreeMap<String, FileRecord>,
}

/// Line stat as it appears in the document
#[derive(Deserialize)]
struct RawLineStat {
    count: u64,
    time: f64,
}

impl Snapshot {
    /// Read and parse a profile document from disk
    ///
    /// # Errors
    /// Returns `SourceError::Unreadable` if the file cannot be read and
    /// `SourceError::Malformed` if its content is not a valid profile.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let path = path.as_ref();
        let location = path.display().to_string();
        let content = std::fs::read_to_string(path)
            .map_err(|source| SourceError::Unreadable { location: location.clone(), source })?;
        Self::parse(&location, &content)
    }

    /// Parse a profile document; `location` is only used in error messages
    ///
    /// # Errors
    /// Returns `SourceError::Malformed` on any shape or type violation.
    pub fn parse(location: &str, content: &str) -> Result<Self, SourceError> {
        let document: BTreeMap<String, BTreeMap<String, serde_json::Value>> =
            serde_json::from_str(content)
                .map_err(|e| SourceError::malformed(location, e.to_string()))?;

        let mut files = BTreeMap::new();
        for (file_key, entries) in document {
            let record = parse_file_record(location, &file_key, entries)?;
            files.insert(file_key, record);
        }

        Ok(Snapshot { files })
    }

    /// Number of (function, line) readings in the snapshot
    #[must_use]
    pub fn reading_count(&self) -> usize {
        self.files
            .values()
            .flat_map(|file| file.functions.values())
            .map(BTreeMap::len)
            .sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

fn parse_file_record(
    location: &str,
    file_key: &str,
    entries: BTreeMap<String, serde_json::Value>,
) -> Result<FileRecord, SourceError> {
    let mut record = FileRecord::default();

    for (key, value) in entries {
        if key == PATH_KEY {
            let path = value.as_str().ok_or_else(|| {
                SourceError::malformed(location, format!("{file_key}: {PATH_KEY} must be a string"))
            })?;
            record.path = Some(path.to_string());
            continue;
        }

        let raw: BTreeMap<String, RawLineStat> = serde_json::from_value(value)
            .map_err(|e| SourceError::malformed(location, format!("{file_key}/{key}: {e}")))?;

        let mut function = FunctionRecord::new();
        for (line_key, stat) in raw {
            let line = parse_line_number(&line_key).ok_or_else(|| {
                SourceError::malformed(
                    location,
                    format!("{file_key}/{key}: invalid line number {line_key:?}"),
                )
            })?;
            if stat.time < 0.0 {
                return Err(SourceError::malformed(
                    location,
                    format!("{file_key}/{key}:{line}: negative time {}", stat.time),
                ));
            }
            function.insert(line, LineStat::new(stat.count, stat.time));
        }
        record.functions.insert(key, function);
    }

    Ok(record)
}

fn parse_line_number(key: &str) -> Option<LineNumber> {
    key.parse::<LineNumber>().ok().filter(|&line| line > 0)
}
