use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("failed to read region catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid region catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid region catalog {path}: {source}")]
    Catalog {
        path: PathBuf,
        #[source]
        source: Box<ModelError>,
    },

    #[error("region catalog is empty")]
    EmptyCatalog,

    #[error("duplicate region code in catalog: {code}")]
    DuplicateRegion { code: String },

    #[error("unknown occurrence status: {0}")]
    UnknownStatus(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
