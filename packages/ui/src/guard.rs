//! Route access policy.

use store::Role;

use crate::auth::AuthState;

/// Outcome of checking the signed-in user against a view's allowed roles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    Granted,
    /// The session is still being restored; render nothing yet.
    Pending,
    /// Nobody is signed in; go to the login page.
    SignIn,
    /// Signed in with a role the view does not serve; go to the dashboard.
    WrongRole,
}

/// An empty `roles` slice admits any signed-in user.
pub fn check_access(state: &AuthState, roles: &[Role]) -> Access {
    if state.loading {
        return Access::Pending;
    }
    match state.role() {
        None => Access::SignIn,
        Some(role) if roles.is_empty() || roles.contains(&role) => Access::Granted,
        Some(_) => Access::WrongRole,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use store::User;

    fn user(role: &str) -> AuthState {
        let user: User = serde_json::from_value(serde_json::json!({
            "id": "u1",
            "email": "u@example.org",
            "role": role
        }))
        .unwrap();
        AuthState::signed_in(user)
    }

    #[test]
    fn test_signed_out_is_sent_to_login() {
        let state = AuthState::default();
        assert_eq!(check_access(&state, &[]), Access::SignIn);
        assert_eq!(check_access(&state, &[Role::Patient]), Access::SignIn);
        assert_eq!(check_access(&state, &[Role::Provider]), Access::SignIn);
    }

    #[test]
    fn test_roles_are_enforced() {
        let patient = user("patient");
        let provider = user("provider");

        assert_eq!(check_access(&patient, &[Role::Patient]), Access::Granted);
        assert_eq!(check_access(&patient, &[Role::Provider]), Access::WrongRole);
        assert_eq!(check_access(&provider, &[Role::Provider]), Access::Granted);
        assert_eq!(check_access(&provider, &[Role::Patient]), Access::WrongRole);
    }

    #[test]
    fn test_any_signed_in_role() {
        assert_eq!(check_access(&user("patient"), &[]), Access::Granted);
        assert_eq!(check_access(&user("provider"), &[]), Access::Granted);
    }

    #[test]
    fn test_restoring_session_waits() {
        let state = AuthState {
            user: None,
            loading: true,
        };
        assert_eq!(check_access(&state, &[Role::Patient]), Access::Pending);
    }
}
