use crate::domain::session::{SessionError, SessionPort};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

const SESSION_FILE: &str = "session.json";
const USER_EMAIL: &str = "userEmail";

#[derive(Debug)]
enum Backend {
    File(PathBuf),
    Memory(Mutex<Option<String>>),
}

/// Session slot kept either in a JSON file under the state directory or in
/// process memory.
#[derive(Debug)]
pub struct SessionAdapter {
    backend: Backend,
}

impl SessionAdapter {
    pub fn file(state_dir: impl AsRef<Path>) -> Self {
        Self {
            backend: Backend::File(state_dir.as_ref().join(SESSION_FILE)),
        }
    }

    pub fn memory() -> Self {
        Self {
            backend: Backend::Memory(Mutex::new(None)),
        }
    }

    async fn read_slots(path: &Path) -> Result<BTreeMap<String, String>, SessionError> {
        match tokio::fs::read_to_string(path).await {
            Ok(text) if text.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(text) => Ok(serde_json::from_str(&text)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(err) => Err(err.into()),
        }
    }

    async fn write_slots(path: &Path, slots: &BTreeMap<String, String>) -> Result<(), SessionError> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let text = serde_json::to_string_pretty(slots)?;
        tokio::fs::write(path, text).await?;

        Ok(())
    }
}

#[async_trait]
impl SessionPort for SessionAdapter {
    async fn set(&self, identifier: String) -> Result<(), SessionError> {
        match &self.backend {
            Backend::File(path) => {
                let mut slots = Self::read_slots(path).await?;
                slots.insert(USER_EMAIL.to_string(), identifier);
                Self::write_slots(path, &slots).await
            }
            Backend::Memory(slot) => {
                let mut slot = slot.lock().map_err(|_| SessionError::WriteSessionError)?;
                *slot = Some(identifier);
                Ok(())
            }
        }
    }

    async fn get(&self) -> Result<Option<String>, SessionError> {
        match &self.backend {
            Backend::File(path) => {
                let mut slots = Self::read_slots(path).await?;
                Ok(slots.remove(USER_EMAIL).filter(|email| !email.is_empty()))
            }
            Backend::Memory(slot) => {
                let slot = slot.lock().map_err(|_| SessionError::ReadSessionError)?;
                Ok(slot.clone())
            }
        }
    }

    async fn clear(&self) -> Result<(), SessionError> {
        match &self.backend {
            Backend::File(path) => {
                let mut slots = Self::read_slots(path).await?;
                if slots.remove(USER_EMAIL).is_none() {
                    return Ok(());
                }
                Self::write_slots(path, &slots).await
            }
            Backend::Memory(slot) => {
                let mut slot = slot.lock().map_err(|_| SessionError::WriteSessionError)?;
                *slot = None;
                Ok(())
            }
        }
    }
}
