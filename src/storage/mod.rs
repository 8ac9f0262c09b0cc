//! Durable key-value backends for session persistence.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session store mirrors its state into a string-keyed string-valued
//! store that survives page reloads. In the browser that is `localStorage`;
//! in tests and on the server it is [`memory::MemoryBackend`] or nothing.
//!
//! ERROR HANDLING
//! ==============
//! Backends return [`StorageError`] rather than swallowing failures so the
//! caller decides how loudly to report them. The session store never
//! propagates them.

#[cfg(test)]
#[path = "mod_test.rs"]
mod mod_test;

pub mod local;
pub mod memory;

/// Default key holding the JSON-serialized user.
pub const DEFAULT_USER_KEY: &str = "user";
/// Default key holding the raw bearer credential.
pub const DEFAULT_CREDENTIAL_KEY: &str = "access_token";

/// Error returned by a [`DurableBackend`] operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    /// The backend disappeared or was never reachable (e.g. storage disabled).
    #[error("durable storage is unavailable")]
    Unavailable,
    /// The backend refused the operation (quota exceeded, security error, ...).
    #[error("storage {op} failed for key `{key}`: {message}")]
    Rejected { op: &'static str, key: String, message: String },
}

/// A synchronous string key-value store.
///
/// Removing a key that does not exist must succeed.
pub trait DurableBackend {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the write is refused.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backend refuses the removal.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// The two keys a session occupies in the durable backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKeys {
    pub user: String,
    pub credential: String,
}

impl StorageKeys {
    /// Namespace both default keys under `prefix`, e.g. `"bookshare."`.
    #[must_use]
    pub fn with_prefix(prefix: &str) -> Self {
        Self {
            user: format!("{prefix}{DEFAULT_USER_KEY}"),
            credential: format!("{prefix}{DEFAULT_CREDENTIAL_KEY}"),
        }
    }
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self { user: DEFAULT_USER_KEY.to_owned(), credential: DEFAULT_CREDENTIAL_KEY.to_owned() }
    }
}
