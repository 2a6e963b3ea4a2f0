//! # Error Module
//!
//! Failure taxonomy for the stats store. Load failures are absorbed by the
//! store and turned into diagnostics plus the default document; save
//! failures are returned to the caller as a `StatsError`.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Everything that can go wrong while reading or writing a stats file.
#[derive(Debug, Error)]
pub enum StatsError {
    /// The stats file does not exist.
    #[error("stats file not found: {}", .path.display())]
    MissingFile { path: PathBuf },

    /// The file exists but could not be read (permissions, device, encoding).
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The text is not valid JSON, even after comments were stripped.
    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The document parsed, but its top level is not a mapping.
    #[error("{} does not contain a JSON object at the top level (found {found})", .path.display())]
    NotAMapping { path: PathBuf, found: &'static str },

    /// The merged document could not be serialized.
    #[error("failed to serialize stats: {0}")]
    Serialize(#[source] serde_json::Error),

    /// Writing or renaming the output file failed.
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, StatsError>;
