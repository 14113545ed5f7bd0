//! Session persistence.
//!
//! One serialized record under a fixed key. Reads never fail: a missing,
//! unreadable or malformed record reads as "no session", so a corrupt store
//! can only ever send the user back to the public entry.

use std::sync::{Arc, Mutex};

use thiserror::Error;

use crate::session::Session;

#[derive(Debug, Error)]
pub enum SessionStoreError {
    #[error("failed to serialize session: {0}")]
    Serialize(String),

    #[error("failed to persist session: {0}")]
    Persist(String),
}

/// Read/write/clear access to the persisted session record.
///
/// Single writer (a login or a logout), synchronous operations, no locking
/// contract beyond what each implementation needs internally.
pub trait SessionStore: Send + Sync {
    /// Current session, or `None` when absent or malformed.
    fn read(&self) -> Option<Session>;

    /// Persist `session`, replacing any prior record.
    fn write(&self, session: &Session) -> Result<(), SessionStoreError>;

    /// Remove the record. Idempotent.
    fn clear(&self);
}

impl<S: SessionStore + ?Sized> SessionStore for Arc<S> {
    fn read(&self) -> Option<Session> {
        (**self).read()
    }

    fn write(&self, session: &Session) -> Result<(), SessionStoreError> {
        (**self).write(session)
    }

    fn clear(&self) {
        (**self).clear()
    }
}

pub(crate) fn encode(session: &Session) -> Result<String, SessionStoreError> {
    serde_json::to_string(session).map_err(|e| SessionStoreError::Serialize(e.to_string()))
}

pub(crate) fn decode(raw: &str) -> Option<Session> {
    match serde_json::from_str::<Session>(raw) {
        Ok(session) => Some(session),
        Err(err) => {
            tracing::warn!(error = %err, "ignoring malformed session record");
            None
        }
    }
}

/// In-process store holding the serialized record.
///
/// Keeps the raw string rather than a `Session` so tests can plant malformed
/// records exactly as a browser would hold them.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    record: Mutex<Option<String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: &Session) -> Result<Self, SessionStoreError> {
        let store = Self::new();
        store.write(session)?;
        Ok(store)
    }

    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            record: Mutex::new(Some(raw.into())),
        }
    }

    pub fn raw(&self) -> Option<String> {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        // A poisoned lock still holds a valid string; keep using it.
        self.record.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl SessionStore for MemorySessionStore {
    fn read(&self) -> Option<Session> {
        self.lock().as_deref().and_then(decode)
    }

    fn write(&self, session: &Session) -> Result<(), SessionStoreError> {
        let raw = encode(session)?;
        *self.lock() = Some(raw);
        Ok(())
    }

    fn clear(&self) {
        *self.lock() = None;
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileSessionStore;

#[cfg(not(target_arch = "wasm32"))]
mod file {
    use std::io::ErrorKind;
    use std::path::{Path, PathBuf};

    use anyhow::Context;

    use super::{SessionStore, SessionStoreError, decode, encode};
    use crate::config::SessionConfig;
    use crate::session::Session;

    /// File-backed store: `{dir}/{storage_key}.json`.
    #[derive(Debug, Clone)]
    pub struct FileSessionStore {
        path: PathBuf,
    }

    impl FileSessionStore {
        pub fn new(path: impl Into<PathBuf>) -> Self {
            Self { path: path.into() }
        }

        pub fn from_config(config: &SessionConfig) -> anyhow::Result<Self> {
            let dir = match &config.dir {
                Some(dir) => dir.clone(),
                None => default_session_dir()?,
            };
            Ok(Self::new(dir.join(format!("{}.json", config.storage_key))))
        }

        pub fn path(&self) -> &Path {
            &self.path
        }

        fn persist(&self, raw: &str) -> anyhow::Result<()> {
            if let Some(parent) = self.path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create session directory at {:?}", parent))?;
            }
            std::fs::write(&self.path, raw)
                .with_context(|| format!("failed to write session record at {:?}", self.path))?;
            Ok(())
        }
    }

    impl SessionStore for FileSessionStore {
        fn read(&self) -> Option<Session> {
            match std::fs::read_to_string(&self.path) {
                Ok(raw) => decode(&raw),
                Err(err) if err.kind() == ErrorKind::NotFound => None,
                Err(err) => {
                    tracing::warn!(path = ?self.path, error = %err, "failed to read session record");
                    None
                }
            }
        }

        fn write(&self, session: &Session) -> Result<(), SessionStoreError> {
            let raw = encode(session)?;
            self.persist(&raw)
                .map_err(|err| SessionStoreError::Persist(format!("{err:#}")))
        }

        fn clear(&self) {
            match std::fs::remove_file(&self.path) {
                Ok(()) => {}
                Err(err) if err.kind() == ErrorKind::NotFound => {}
                Err(err) => {
                    tracing::error!(path = ?self.path, error = %err, "failed to remove session record");
                }
            }
        }
    }

    /// `{app_data_dir}/chainboard`.
    fn default_session_dir() -> anyhow::Result<PathBuf> {
        let base = dirs::data_dir()
            .or_else(|| {
                dirs::home_dir().map(|mut h| {
                    h.push(".local");
                    h.push("share");
                    h
                })
            })
            .context("failed to resolve OS app data directory - tried data_dir() and home_dir()/.local/share")?;

        Ok(base.join("chainboard"))
    }
}

#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorageSessionStore;

#[cfg(target_arch = "wasm32")]
mod local_storage {
    use super::{SessionStore, SessionStoreError, decode, encode};
    use crate::config::SessionConfig;
    use crate::session::Session;

    /// Browser `localStorage` store. Looks the storage up on every call, so
    /// it holds nothing but the key.
    #[derive(Debug, Clone)]
    pub struct LocalStorageSessionStore {
        key: String,
    }

    impl LocalStorageSessionStore {
        pub fn new(config: &SessionConfig) -> Self {
            Self {
                key: config.storage_key.clone(),
            }
        }

        fn storage() -> Option<web_sys::Storage> {
            web_sys::window()?.local_storage().ok().flatten()
        }
    }

    impl SessionStore for LocalStorageSessionStore {
        fn read(&self) -> Option<Session> {
            let raw = Self::storage()?.get_item(&self.key).ok().flatten()?;
            decode(&raw)
        }

        fn write(&self, session: &Session) -> Result<(), SessionStoreError> {
            let raw = encode(session)?;
            let storage = Self::storage()
                .ok_or_else(|| SessionStoreError::Persist("localStorage unavailable".to_string()))?;
            storage
                .set_item(&self.key, &raw)
                .map_err(|e| SessionStoreError::Persist(format!("{:?}", e)))
        }

        fn clear(&self) {
            if let Some(storage) = Self::storage() {
                if let Err(e) = storage.remove_item(&self.key) {
                    tracing::error!("failed to remove session record: {:?}", e);
                }
            }
        }
    }
}
