use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("book not found")]
    NotFound,

    #[error("book with this ISBN already exists")]
    DuplicateIsbn,

    #[error("IO error on {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed data file {path}")]
    Serde {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("store lock poisoned")]
    Poisoned,
}

impl StoreError {
    /// Whether the error comes from the storage medium rather than from the
    /// caller's request. Infrastructure errors are never shown to clients.
    pub fn is_infrastructure(&self) -> bool {
        matches!(self, Self::Io { .. } | Self::Serde { .. } | Self::Poisoned)
    }
}
