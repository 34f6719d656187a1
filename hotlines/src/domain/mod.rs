//! Domain model for hotlines
//!
//! This module contains core domain types and errors that provide:
//! - Case-insensitive file matching via `NormalizedName`
//! - Additive per-line statistics via `LineStat`
//! - Structured, per-source error handling

pub mod errors;
pub mod types;

// Re-export common types for convenience
pub use types::{base_name, DataSource, LineNumber, LineStat, NormalizedName};

pub use errors::{SourceDiagnostic, SourceError};
