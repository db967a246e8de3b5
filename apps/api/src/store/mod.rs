//! Document Store: pluggable persistence for the current resume.
//!
//! Two keyed slots: the upload record (`uploadedResume`) and the structured
//! document (`structuredResumeData`). Each write replaces its slot wholesale;
//! concurrent writers resolve as last-writer-wins per slot.
//!
//! `AppState` holds an `Arc<dyn DocumentStore>`: in-memory by default,
//! file-backed when `STORE_DIR` is set.

use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use tempfile::NamedTempFile;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::debug;

use crate::extraction::models::ResumeDocument;
use crate::ingest::UploadRecord;

pub const UPLOAD_KEY: &str = "uploadedResume";
pub const DOCUMENT_KEY: &str = "structuredResumeData";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("stored value is not valid JSON: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("store task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn load(&self) -> Result<Option<ResumeDocument>, StoreError>;
    async fn save(&self, document: &ResumeDocument) -> Result<(), StoreError>;
    async fn load_upload(&self) -> Result<Option<UploadRecord>, StoreError>;
    async fn save_upload(&self, upload: &UploadRecord) -> Result<(), StoreError>;
    /// Removes both slots. Clearing an empty store is not an error.
    async fn clear(&self) -> Result<(), StoreError>;
}

// ────────────────────────────────────────────────────────────────────────────
// InMemoryDocumentStore
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
struct Slots {
    upload: Option<UploadRecord>,
    document: Option<ResumeDocument>,
}

/// Process-local store. Contents are lost on restart.
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    slots: RwLock<Slots>,
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn load(&self) -> Result<Option<ResumeDocument>, StoreError> {
        Ok(self.slots.read().await.document.clone())
    }

    async fn save(&self, document: &ResumeDocument) -> Result<(), StoreError> {
        self.slots.write().await.document = Some(document.clone());
        Ok(())
    }

    async fn load_upload(&self) -> Result<Option<UploadRecord>, StoreError> {
        Ok(self.slots.read().await.upload.clone())
    }

    async fn save_upload(&self, upload: &UploadRecord) -> Result<(), StoreError> {
        self.slots.write().await.upload = Some(upload.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        *self.slots.write().await = Slots::default();
        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// FileDocumentStore
// ────────────────────────────────────────────────────────────────────────────

/// One JSON file per slot under a directory. Writes go through a temp file in
/// the same directory and are renamed into place, so readers never observe a
/// half-written slot.
#[derive(Debug, Clone)]
pub struct FileDocumentStore {
    dir: PathBuf,
}

impl FileDocumentStore {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(FileDocumentStore { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    async fn read<T>(&self, key: &str) -> Result<Option<T>, StoreError>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let path = self.path(key);
        tokio::task::spawn_blocking(move || -> Result<Option<T>, StoreError> {
            match std::fs::read(&path) {
                Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
        .await?
    }

    async fn write<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(value)?;
        let dir = self.dir.clone();
        let path = self.path(key);
        tokio::task::spawn_blocking(move || -> Result<(), StoreError> {
            let mut tmp = NamedTempFile::new_in(&dir)?;
            tmp.write_all(&bytes)?;
            tmp.as_file().sync_all()?;
            tmp.persist(&path).map_err(|e| e.error)?;
            debug!("Wrote {} ({} bytes)", path.display(), bytes.len());
            Ok(())
        })
        .await?
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        match tokio::fs::remove_file(self.path(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl DocumentStore for FileDocumentStore {
    async fn load(&self) -> Result<Option<ResumeDocument>, StoreError> {
        self.read(DOCUMENT_KEY).await
    }

    async fn save(&self, document: &ResumeDocument) -> Result<(), StoreError> {
        self.write(DOCUMENT_KEY, document).await
    }

    async fn load_upload(&self) -> Result<Option<UploadRecord>, StoreError> {
        self.read(UPLOAD_KEY).await
    }

    async fn save_upload(&self, upload: &UploadRecord) -> Result<(), StoreError> {
        self.write(UPLOAD_KEY, upload).await
    }

    async fn clear(&self) -> Result<(), StoreError> {
        self.remove(UPLOAD_KEY).await?;
        self.remove(DOCUMENT_KEY).await
    }
}
