//! Analysis logic for profiling data
//!
//! This module contains pure business logic for merging and ranking line
//! statistics, separated from the report presentation layer.

pub mod aggregator;
pub mod hot_lines;

pub use aggregator::{aggregate, AggregatedFileIndex, LineMap};
pub use hot_lines::{
    rank_current_file_hot_lines, rank_hot_lines, HotLineEntry, MAX_CURRENT_FILE_HOT_LINES,
    MAX_HOT_LINES,
};
