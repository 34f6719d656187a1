//! Structured error types for hotlines
//!
//! Using thiserror for automatic Display implementation and error chaining.
//! A lookup that finds nothing is not an error: it returns `None`.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Failed to read profile source {location}: {source}")]
    Unreadable {
        location: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed profile source {location}: {reason}")]
    Malformed { location: String, reason: String },
}

impl SourceError {
    pub(crate) fn malformed(location: &str, reason: impl Into<String>) -> Self {
        SourceError::Malformed { location: location.to_string(), reason: reason.into() }
    }

    /// Location of the source this error belongs to
    #[must_use]
    pub fn location(&self) -> &str {
        match self {
            SourceError::Unreadable { location, .. } | SourceError::Malformed { location, .. } => {
                location
            }
        }
    }
}

/// A per-source failure collected during a rebuild.
///
/// Diagnostics never abort a rebuild; they stay attached to the index that
/// produced them until the next rebuild replaces it.
#[derive(Debug)]
pub struct SourceDiagnostic {
    /// Position of the failing source in the enabled-source list
    pub source_index: usize,
    pub error: SourceError,
}

impl std::fmt::Display for SourceDiagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "source #{}: {}", self.source_index, self.error)
    }
}
