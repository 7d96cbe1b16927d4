//! JSON file implementation of the core `SessionStore`
//!
//! The file holds one JSON object mapping slot keys to string values, so
//! several slots can share it.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

use gg_core::errors::DomainError;
use gg_core::repositories::SessionStore;

use crate::InfrastructureError;

type Slots = BTreeMap<String, String>;

/// Session store that survives process restarts
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
    /// Serializes read-modify-write cycles
    lock: Mutex<()>,
}

impl FileSessionStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read all slots; a missing or unreadable file is an empty store
    async fn load(&self) -> Result<Slots, InfrastructureError> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Slots::new()),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str::<Slots>(&raw) {
            Ok(slots) => Ok(slots),
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    event = "session_file_corrupt",
                    "Ignoring unreadable session file"
                );
                Ok(Slots::new())
            }
        }
    }

    /// Write all slots through a temporary file and rename
    async fn persist(&self, slots: &Slots) -> Result<(), InfrastructureError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(slots)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        let _guard = self.lock.lock().await;
        let slots = self.load().await?;
        Ok(slots.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<(), DomainError> {
        let _guard = self.lock.lock().await;
        let mut slots = self.load().await?;
        slots.insert(key.to_string(), value);
        self.persist(&slots).await?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), DomainError> {
        let _guard = self.lock.lock().await;
        let mut slots = self.load().await?;
        if slots.remove(key).is_some() {
            self.persist(&slots).await?;
        }
        Ok(())
    }
}
