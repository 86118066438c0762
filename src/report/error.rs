//! Errors surfaced by the form session and the report renderer.
//!
//! None of these are recovered locally; they propagate to the UI layer.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// A field name outside the fixed report schema was referenced.
    #[error("unknown report field: '{name}'")]
    UnknownField { name: String },

    /// Persisting the generated document failed (disk full, permission denied, ...).
    #[error("failed to write report to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reading a previously generated document back for download failed.
    #[error("failed to read report from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The background render task panicked or was cancelled.
    #[error("report generation did not complete: {0}")]
    Interrupted(String),

    /// The document encoder rejected the content.
    #[error("failed to encode report document: {0}")]
    Encode(String),
}

impl ReportError {
    pub fn unknown_field(name: impl Into<String>) -> Self {
        Self::UnknownField { name: name.into() }
    }

    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }

    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }
}

pub type ReportResult<T> = Result<T, ReportError>;
