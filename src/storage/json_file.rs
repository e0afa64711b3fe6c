//! JSON document implementation of StateStore
//!
//! The whole state lives in one human-readable JSON file (four-space
//! indentation). Every save goes to its own temporary file in the same
//! directory which is then renamed over the document, so readers never see a
//! half-written file.

use crate::core::error::StorageError;
use crate::core::migrate::{self, DEFAULT_LEGACY_CATEGORY, Upgraded};
use crate::core::state::BarState;
use crate::core::store::StateStore;
use async_trait::async_trait;
use serde::Serialize;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

/// State store backed by a single JSON file
///
/// Clones share one write lock. Writes of the migrated legacy document and
/// regular saves both go through it, so they never race each other.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    legacy_category: String,
    write_lock: Arc<Mutex<()>>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            legacy_category: DEFAULT_LEGACY_CATEGORY.to_string(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Category that receives the drinks of a list-shaped legacy menu
    pub fn with_legacy_category(mut self, category: impl Into<String>) -> Self {
        self.legacy_category = category.into();
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }

    /// Read and upgrade the document; `None` when there is no file yet
    async fn read_upgraded(&self) -> Result<Option<Upgraded>, StorageError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.io_error(e)),
        };
        let raw: serde_json::Value = serde_json::from_slice(&bytes)?;
        Ok(Some(migrate::upgrade(raw, &self.legacy_category)?))
    }

    /// Replace the document. Callers hold `write_lock`.
    async fn write_document(&self, state: &BarState) -> Result<(), StorageError> {
        let bytes = to_pretty_json(state)?;
        let len = bytes.len();
        let path = self.path.clone();

        tokio::task::spawn_blocking(move || write_atomically(&path, &bytes))
            .await
            .map_err(|e| self.io_error(std::io::Error::other(e)))?
            .map_err(|e| self.io_error(e))?;

        tracing::debug!(path = %self.path.display(), bytes = len, "saved store");
        Ok(())
    }
}

/// Serialize with the four-space indentation the document has always used
fn to_pretty_json(state: &BarState) -> Result<Vec<u8>, StorageError> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    state.serialize(&mut ser)?;
    Ok(buf)
}

/// Write to a uniquely named sibling file, flush it, then rename it over `path`
fn write_atomically(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::Builder::new()
        .prefix(".bartab-")
        .suffix(".tmp")
        .tempfile_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[async_trait]
impl StateStore for JsonFileStore {
    async fn load(&self) -> Result<BarState, StorageError> {
        let upgraded = match self.read_upgraded().await? {
            Some(upgraded) if !upgraded.migrated => upgraded,
            Some(_) => {
                let _guard = self.write_lock.lock().await;
                // someone may have written the document since we read it
                match self.read_upgraded().await? {
                    Some(upgraded) => {
                        if upgraded.migrated {
                            tracing::info!(
                                path = %self.path.display(),
                                "persisting migrated store document"
                            );
                            self.write_document(&upgraded.state).await?;
                        }
                        upgraded
                    }
                    None => return Ok(BarState::new()),
                }
            }
            None => {
                tracing::debug!(path = %self.path.display(), "no store document yet");
                return Ok(BarState::new());
            }
        };

        tracing::debug!(
            path = %self.path.display(),
            categories = upgraded.state.menu.len(),
            tabs = upgraded.state.tabs.len(),
            "loaded store"
        );
        Ok(upgraded.state)
    }

    async fn save(&self, state: &BarState) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().await;
        self.write_document(state).await
    }
}
