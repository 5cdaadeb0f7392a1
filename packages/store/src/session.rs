//! # Persisted session — the `{token, user}` pair
//!
//! The backend authenticates requests with a bearer token handed out at login.
//! The client keeps that token, together with the signed-in [`User`], in a
//! [`SessionStore`] so a page reload does not sign the user out.
//!
//! [`Session`] is the process-wide handle over that storage. It is cheap to
//! clone (all clones share the same state) and has an explicit lifecycle:
//!
//! - [`Session::load`] reads whatever a previous run persisted,
//! - [`Session::init`] stores a fresh pair after login or registration,
//! - [`Session::update_user`] refreshes the cached user after a profile fetch,
//! - [`Session::clear`] forgets both on logout.
//!
//! Reads are served from memory; writes go to memory and the backing store.

use std::sync::{Arc, RwLock};

use crate::models::User;

/// Storage key for the bearer token.
pub const TOKEN_KEY: &str = "token";
/// Storage key for the JSON-encoded user.
pub const USER_KEY: &str = "user";

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Local storage is unavailable")]
    Unavailable,
    #[error("Failed to write {key} to local storage")]
    Write { key: String },
    #[error("Stored user is not valid JSON: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// A string key-value store the session persists into.
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), SessionError>;
    fn remove(&self, key: &str) -> Result<(), SessionError>;
}

#[derive(Clone, Debug, Default, PartialEq)]
struct Credentials {
    token: Option<String>,
    user: Option<User>,
}

/// Shared handle to the signed-in token and user.
#[derive(Clone)]
pub struct Session {
    store: Arc<dyn SessionStore>,
    state: Arc<RwLock<Credentials>>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("authenticated", &self.is_authenticated())
            .field("user", &self.user().map(|u| u.email))
            .finish()
    }
}

impl Session {
    /// Restore the session persisted in `store`.
    ///
    /// A stored user that no longer decodes is dropped, the token is kept.
    /// A user without a token is not restored.
    pub fn load(store: impl SessionStore + 'static) -> Self {
        let token = store.get(TOKEN_KEY).filter(|t| !t.is_empty());
        let user = token
            .as_ref()
            .and_then(|_| store.get(USER_KEY))
            .and_then(|raw| serde_json::from_str::<User>(&raw).ok());

        Self {
            store: Arc::new(store),
            state: Arc::new(RwLock::new(Credentials { token, user })),
        }
    }

    /// Store the pair returned by login or registration.
    ///
    /// The old token is removed before the new user is written, so a failed
    /// write never leaves a token next to someone else's user.
    pub fn init(&self, token: &str, user: &User) -> Result<(), SessionError> {
        let encoded = serde_json::to_string(user)?;
        let persisted = self
            .store
            .remove(TOKEN_KEY)
            .and_then(|_| self.store.set(USER_KEY, &encoded))
            .and_then(|_| self.store.set(TOKEN_KEY, token));

        let mut state = self.state.write().expect("RwLock is not poisoned");
        match persisted {
            Ok(()) => {
                state.token = Some(token.to_string());
                state.user = Some(user.clone());
                Ok(())
            }
            Err(e) => {
                *state = Credentials::default();
                Err(e)
            }
        }
    }

    /// Replace the cached user, keeping the token.
    pub fn update_user(&self, user: &User) -> Result<(), SessionError> {
        let encoded = serde_json::to_string(user)?;
        self.store.set(USER_KEY, &encoded)?;
        self.state.write().expect("RwLock is not poisoned").user = Some(user.clone());
        Ok(())
    }

    /// Forget token and user, in memory and in storage.
    ///
    /// Memory is cleared even when the backing store fails.
    pub fn clear(&self) -> Result<(), SessionError> {
        *self.state.write().expect("RwLock is not poisoned") = Credentials::default();
        self.store.remove(TOKEN_KEY)?;
        self.store.remove(USER_KEY)?;
        Ok(())
    }

    pub fn token(&self) -> Option<String> {
        self.state.read().expect("RwLock is not poisoned").token.clone()
    }

    pub fn user(&self) -> Option<User> {
        self.state.read().expect("RwLock is not poisoned").user.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state
            .read()
            .expect("RwLock is not poisoned")
            .token
            .is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use crate::models::{Profile, Role};

    fn patient() -> User {
        User {
            user_id: Some("u1".to_string()),
            object_id: None,
            email: "pat@example.org".to_string(),
            role: Role::Patient,
            profile: Profile {
                first_name: "Pat".to_string(),
                last_name: "Doe".to_string(),
                ..Default::default()
            },
            patient_info: None,
            provider_info: None,
        }
    }

    #[test]
    fn test_empty_store_is_signed_out() {
        let session = Session::load(MemoryStore::new());
        assert!(!session.is_authenticated());
        assert!(session.token().is_none());
        assert!(session.user().is_none());
    }

    #[test]
    fn test_init_persists_and_reload_restores() {
        let store = MemoryStore::new();
        let session = Session::load(store.clone());
        session.init("tok-123", &patient()).unwrap();

        assert_eq!(store.get(TOKEN_KEY).as_deref(), Some("tok-123"));
        assert!(store.get(USER_KEY).unwrap().contains("pat@example.org"));

        let reloaded = Session::load(store);
        assert!(reloaded.is_authenticated());
        assert_eq!(reloaded.token().as_deref(), Some("tok-123"));
        assert_eq!(reloaded.user(), Some(patient()));
    }

    #[test]
    fn test_clones_share_state() {
        let session = Session::load(MemoryStore::new());
        let other = session.clone();
        session.init("tok", &patient()).unwrap();
        assert_eq!(other.token().as_deref(), Some("tok"));
        other.clear().unwrap();
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_clear_removes_both_keys() {
        let store = MemoryStore::new();
        let session = Session::load(store.clone());
        session.init("tok", &patient()).unwrap();
        session.clear().unwrap();

        assert!(store.get(TOKEN_KEY).is_none());
        assert!(store.get(USER_KEY).is_none());
        assert!(Session::load(store).user().is_none());
    }

    #[test]
    fn test_corrupt_user_is_dropped() {
        let store = MemoryStore::new();
        store.set(TOKEN_KEY, "tok").unwrap();
        store.set(USER_KEY, "{not json").unwrap();

        let session = Session::load(store);
        assert_eq!(session.token().as_deref(), Some("tok"));
        assert!(session.user().is_none());
    }

    #[test]
    fn test_user_without_token_is_signed_out() {
        let store = MemoryStore::new();
        store
            .set(USER_KEY, &serde_json::to_string(&patient()).unwrap())
            .unwrap();
        store.set(TOKEN_KEY, "").unwrap();

        let session = Session::load(store);
        assert!(!session.is_authenticated());
        assert!(session.user().is_none());
    }

    /// Memory store whose writes to one key fail.
    struct FailingStore {
        inner: MemoryStore,
        fail_key: &'static str,
    }

    impl SessionStore for FailingStore {
        fn get(&self, key: &str) -> Option<String> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> Result<(), SessionError> {
            if key == self.fail_key {
                return Err(SessionError::Write { key: key.to_string() });
            }
            self.inner.set(key, value)
        }

        fn remove(&self, key: &str) -> Result<(), SessionError> {
            self.inner.remove(key)
        }
    }

    #[test]
    fn test_failed_user_write_leaves_no_token() {
        let store = MemoryStore::new();
        Session::load(store.clone()).init("old-tok", &patient()).unwrap();

        let mut provider = patient();
        provider.role = Role::Provider;
        let session = Session::load(FailingStore {
            inner: store.clone(),
            fail_key: USER_KEY,
        });
        assert!(session.init("new-tok", &provider).is_err());
        assert!(!session.is_authenticated());

        assert!(store.get(TOKEN_KEY).is_none());
        let reloaded = Session::load(store);
        assert!(!reloaded.is_authenticated());
        assert!(reloaded.user().is_none());
    }

    #[test]
    fn test_update_user_keeps_token() {
        let session = Session::load(MemoryStore::new());
        session.init("tok", &patient()).unwrap();

        let mut updated = patient();
        updated.profile.phone = Some("555-0100".to_string());
        session.update_user(&updated).unwrap();

        assert_eq!(session.token().as_deref(), Some("tok"));
        assert_eq!(session.user().unwrap().profile.phone.as_deref(), Some("555-0100"));
    }
}
