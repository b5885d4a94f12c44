//! Error types for CSV output and input.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading or writing CSV files.
#[derive(Debug, Error)]
pub enum OutputError {
    /// Failed to open, create, or flush a file.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed CSV, or a failed record write. `origin` is a path or URL.
    #[error("CSV error in {origin}: {source}")]
    Csv {
        origin: String,
        #[source]
        source: csv::Error,
    },

    /// Output exists and neither overwrite nor append was requested.
    #[error("output file already exists: {path} (use --force to overwrite or --extend to append)")]
    AlreadyExists { path: PathBuf },

    #[error("required column '{column}' not found in {origin}")]
    MissingColumn { column: String, origin: String },

    #[error("row has {actual} values but {path} has {expected} columns")]
    RowWidth {
        path: PathBuf,
        expected: usize,
        actual: usize,
    },
}

impl OutputError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn csv(origin: impl Into<String>, source: csv::Error) -> Self {
        Self::Csv {
            origin: origin.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, OutputError>;
