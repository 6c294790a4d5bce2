//! Flat-file persistence.
//!
//! The whole collection lives in one pretty-printed JSON array. Reads load the
//! full file; writes serialize the full collection into a sibling `.tmp` file
//! and rename it over the original, so readers never observe a half-written file.

use super::error::StoreError;
use crate::books::types::Book;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

pub struct FileStore {
    path: PathBuf,
    lock: RwLock<()>,
}

impl FileStore {
    /// Opens the store at `path`, creating parent directories and seeding the
    /// file with an empty array when it does not exist yet.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();

        if !path.exists() {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
            fs::write(&path, b"[]").map_err(|source| StoreError::Io {
                path: path.clone(),
                source,
            })?;
            tracing::info!("Created empty data file at {}", path.display());
        }

        Ok(Self {
            path,
            lock: RwLock::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn read_all(&self) -> Result<Vec<Book>, StoreError> {
        let _guard = self.lock.read().map_err(|_| StoreError::Poisoned)?;
        self.load()
    }

    /// Runs a read-modify-write cycle under the write lock so concurrent
    /// mutations cannot overwrite each other. The collection is persisted only
    /// when `f` succeeds.
    pub fn update<T, F>(&self, f: F) -> Result<T, StoreError>
    where
        F: FnOnce(&mut Vec<Book>) -> Result<T, StoreError>,
    {
        let _guard = self.lock.write().map_err(|_| StoreError::Poisoned)?;
        let mut books = self.load()?;
        let out = f(&mut books)?;
        self.persist(&books)?;
        Ok(out)
    }

    fn load(&self) -> Result<Vec<Book>, StoreError> {
        let data = fs::read(&self.path).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;

        if data.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }

        serde_json::from_slice(&data).map_err(|source| StoreError::Serde {
            path: self.path.clone(),
            source,
        })
    }

    fn persist(&self, books: &[Book]) -> Result<(), StoreError> {
        let data = serde_json::to_vec_pretty(books).map_err(|source| StoreError::Serde {
            path: self.path.clone(),
            source,
        })?;

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        fs::write(&tmp, data).map_err(|source| StoreError::Io {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, &self.path).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;

        tracing::debug!("Persisted {} books to {}", books.len(), self.path.display());
        Ok(())
    }
}
