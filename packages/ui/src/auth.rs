//! Authentication context and hooks for the UI.

use api::{ApiClient, CachedApi};
use dioxus::prelude::*;
use store::{ClientConfig, Role, Session, User};

use crate::session::make_session;

/// Authentication state for the application.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AuthState {
    pub user: Option<User>,
    /// A token was restored but the user is still being fetched.
    pub loading: bool,
}

impl AuthState {
    pub fn signed_in(user: User) -> Self {
        Self {
            user: Some(user),
            loading: false,
        }
    }

    /// State for a session read back from storage. Only a token signs the
    /// user in; a token without a user still has to be resolved.
    pub fn restored(session: &Session) -> Self {
        if !session.is_authenticated() {
            return Self::default();
        }
        let user = session.user();
        Self {
            loading: user.is_none(),
            user,
        }
    }

    /// Signed out if `session` lost its token since this state was built,
    /// e.g. after the backend rejected it.
    pub fn synced(self, session: &Session) -> Self {
        if self.user.is_some() && !session.is_authenticated() {
            return Self::default();
        }
        self
    }

    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().map(|u| u.role)
    }
}

/// Get the current authentication state.
/// Returns a signal that updates when the user logs in or out.
pub fn use_auth() -> Signal<AuthState> {
    use_context::<Signal<AuthState>>()
}

/// The cache-aware API handle shared by every view.
pub fn use_api() -> CachedApi {
    use_context::<CachedApi>()
}

/// Provider component that owns the session, the API handle and the auth state.
/// Wrap your app with this component.
#[component]
pub fn AuthProvider(config: ClientConfig, children: Element) -> Element {
    let api = use_context_provider(|| {
        CachedApi::new(ApiClient::from_config(&config, make_session()))
    });

    let mut auth_state = use_context_provider(|| {
        Signal::new(AuthState::restored(api.client().session()))
    });

    // A token whose user did not survive the reload: ask the backend who it belongs to.
    let _ = use_resource(move || {
        let api = api.clone();
        async move {
            if !auth_state.peek().loading {
                return;
            }
            match api.profile().await {
                Ok(user) => {
                    if let Err(e) = api.client().session().update_user(&user) {
                        tracing::warn!("Failed to store user: {}", e);
                    }
                    auth_state.set(AuthState::signed_in(user));
                }
                Err(e) => {
                    tracing::warn!("Stored session rejected: {}", e);
                    if let Err(e) = api.logout().await {
                        tracing::warn!("Failed to clear session: {}", e);
                    }
                    auth_state.set(AuthState::default());
                }
            }
        }
    });

    rsx! {
        {children}
    }
}

/// Button to log out the current user.
#[component]
pub fn LogoutButton(
    #[props(default = "Logout".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
    on_logout: EventHandler<()>,
) -> Element {
    let mut auth_state = use_auth();
    let api = use_api();

    let onclick = move |_| {
        let api = api.clone();
        async move {
            if let Err(e) = api.logout().await {
                tracing::error!("Failed to clear session: {}", e);
            }
            auth_state.set(AuthState::default());
            on_logout.call(());
        }
    };

    rsx! {
        button {
            class: "{class}",
            onclick: onclick,
            "{label}"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use store::session::{TOKEN_KEY, USER_KEY};
    use store::{MemoryStore, SessionStore};

    fn stored_user() -> String {
        serde_json::json!({
            "_id": "u1",
            "email": "pat@example.org",
            "role": "patient"
        })
        .to_string()
    }

    #[test]
    fn test_restored_user_without_token_is_signed_out() {
        let store = MemoryStore::new();
        store.set(USER_KEY, &stored_user()).unwrap();

        let state = AuthState::restored(&Session::load(store));
        assert_eq!(state, AuthState::default());
        assert_eq!(
            crate::check_access(&state, &[Role::Patient]),
            crate::Access::SignIn
        );
    }

    #[test]
    fn test_restored_token_without_user_is_pending() {
        let store = MemoryStore::new();
        store.set(TOKEN_KEY, "tok").unwrap();

        let state = AuthState::restored(&Session::load(store));
        assert!(state.loading);
        assert!(state.user.is_none());
    }

    #[test]
    fn test_restored_pair_is_signed_in() {
        let store = MemoryStore::new();
        store.set(TOKEN_KEY, "tok").unwrap();
        store.set(USER_KEY, &stored_user()).unwrap();

        let state = AuthState::restored(&Session::load(store));
        assert!(!state.loading);
        assert_eq!(state.role(), Some(Role::Patient));
    }

    #[test]
    fn test_synced_drops_user_whose_token_is_gone() {
        let store = MemoryStore::new();
        store.set(TOKEN_KEY, "tok").unwrap();
        store.set(USER_KEY, &stored_user()).unwrap();
        let session = Session::load(store);
        let state = AuthState::restored(&session);

        assert_eq!(state.clone().synced(&session), state);

        session.clear().unwrap();
        assert_eq!(state.synced(&session), AuthState::default());
    }
}
