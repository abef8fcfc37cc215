use std::path::PathBuf;

use thiserror::Error;

use crate::core::types::TrickKey;

/// Failures while reading, writing or loading a catalog.
///
/// Malformed input rows and unresolved tricks are not errors: the former
/// end up in a build report, the latter resolve to a sentinel name.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON catalog document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("catalog document is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),

    #[error("invalid TOON catalog document: {0}")]
    Toon(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("catalog version {found} is incompatible with supported version {expected}")]
    IncompatibleVersion { found: String, expected: String },

    #[error("unsupported catalog format for {0} (expected .json or .toon)")]
    UnsupportedFormat(PathBuf),

    #[error("duplicate lookup key {key}: '{existing}' already present, refusing '{incoming}'")]
    DuplicateKey {
        key: TrickKey,
        existing: String,
        incoming: String,
    },

    #[error("invalid stance: '{0}'")]
    InvalidStance(String),
}

pub type Result<T> = std::result::Result<T, CatalogError>;

impl CatalogError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CatalogError::Io { path: path.into(), source }
    }
}
