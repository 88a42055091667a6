//! Persisted token storage.
//!
//! Two string values under fixed keys, surviving restarts and cleared
//! together. Implementations are process-wide shared resources.

use std::collections::HashMap;
use std::sync::Mutex;

use thiserror::Error;

/// Fixed storage keys for the two session tokens.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum TokenKey {
    Access,
    Refresh,
}

impl TokenKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKey::Access => "access",
            TokenKey::Refresh => "refresh",
        }
    }
}

#[derive(Debug, Error)]
pub enum TokenStoreError {
    #[error("token storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("token storage is unreadable: {0}")]
    Corrupt(String),
}

/// Key/value storage for the session tokens.
pub trait TokenStore: Send + Sync + core::fmt::Debug {
    fn get(&self, key: TokenKey) -> Option<String>;

    fn set(&self, key: TokenKey, value: &str) -> Result<(), TokenStoreError>;

    /// Remove every persisted value. Clearing an empty store succeeds.
    fn clear(&self) -> Result<(), TokenStoreError>;
}

/// In-process store; contents are lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    values: Mutex<HashMap<TokenKey, String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn values(&self) -> std::sync::MutexGuard<'_, HashMap<TokenKey, String>> {
        self.values.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self, key: TokenKey) -> Option<String> {
        self.values().get(&key).cloned()
    }

    fn set(&self, key: TokenKey, value: &str) -> Result<(), TokenStoreError> {
        self.values().insert(key, value.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), TokenStoreError> {
        self.values().clear();
        Ok(())
    }
}
