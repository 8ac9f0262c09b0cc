//! Browser `localStorage` backend.
//!
//! Only functional with the `hydrate` feature. Without it [`LocalStorageBackend::detect`]
//! always reports the backend as absent, which keeps SSR and native tests
//! on the "no durable storage" path.
//!
//! TRADE-OFFS
//! ==========
//! `localStorage` is synchronous and may throw (private browsing, quota,
//! disabled storage). Every thrown `JsValue` is converted to
//! [`StorageError::Rejected`] with its debug rendering as the message.

#[cfg(test)]
#[path = "local_test.rs"]
mod local_test;

use super::{DurableBackend, StorageError};

/// [`DurableBackend`] over the window's `localStorage`.
#[derive(Clone, Debug)]
pub struct LocalStorageBackend {
    #[cfg(feature = "hydrate")]
    storage: web_sys::Storage,
}

impl LocalStorageBackend {
    /// Look up `localStorage` in the current execution context.
    ///
    /// Returns `None` outside a browser, when access throws, or when the
    /// crate was built without `hydrate`.
    pub fn detect() -> Option<Self> {
        #[cfg(feature = "hydrate")]
        {
            let window = web_sys::window()?;
            match window.local_storage() {
                Ok(Some(storage)) => Some(Self { storage }),
                Ok(None) => None,
                Err(err) => {
                    log::debug!("localStorage access denied: {err:?}");
                    None
                }
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            None
        }
    }
}

#[cfg(feature = "hydrate")]
fn rejected(op: &'static str, key: &str, err: &wasm_bindgen::JsValue) -> StorageError {
    StorageError::Rejected { op, key: key.to_owned(), message: format!("{err:?}") }
}

impl DurableBackend for LocalStorageBackend {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        #[cfg(feature = "hydrate")]
        {
            self.storage.get_item(key).map_err(|e| rejected("get", key, &e))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = key;
            Err(StorageError::Unavailable)
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        #[cfg(feature = "hydrate")]
        {
            self.storage.set_item(key, value).map_err(|e| rejected("set", key, &e))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (key, value);
            Err(StorageError::Unavailable)
        }
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        #[cfg(feature = "hydrate")]
        {
            self.storage.remove_item(key).map_err(|e| rejected("remove", key, &e))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = key;
            Err(StorageError::Unavailable)
        }
    }
}
