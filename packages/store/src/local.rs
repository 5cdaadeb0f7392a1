//! Browser `localStorage` backend for the session.

use crate::session::{SessionError, SessionStore};

/// SessionStore backed by `window.localStorage`.
///
/// Holds no handle; the storage object is looked up on every call.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    pub fn new() -> Self {
        Self
    }

    fn storage() -> Result<web_sys::Storage, SessionError> {
        web_sys::window()
            .ok_or(SessionError::Unavailable)?
            .local_storage()
            .map_err(|_| SessionError::Unavailable)?
            .ok_or(SessionError::Unavailable)
    }
}

impl SessionStore for LocalStorageStore {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage().ok()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SessionError> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|_| SessionError::Write {
                key: key.to_string(),
            })
    }

    fn remove(&self, key: &str) -> Result<(), SessionError> {
        Self::storage()?
            .remove_item(key)
            .map_err(|_| SessionError::Write {
                key: key.to_string(),
            })
    }
}
