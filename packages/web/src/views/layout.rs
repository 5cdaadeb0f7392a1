//! Shell around every page: the navbar and the route guard.

use dioxus::prelude::*;
use store::{ClientConfig, Role};
use ui::{check_access, use_api, use_auth, Access, AuthState, Loading, Navbar};

use crate::{Route, RouteAccess};

/// Where to send the user instead of `route`, if anywhere.
fn redirect_for(access: RouteAccess, state: &AuthState) -> Option<Route> {
    let outcome = match access {
        RouteAccess::Public => Access::Granted,
        RouteAccess::SignedOut if state.user.is_some() => return Some(Route::Dashboard {}),
        RouteAccess::SignedOut => Access::Granted,
        RouteAccess::SignedIn(roles) => check_access(state, roles),
    };
    match outcome {
        Access::Granted | Access::Pending => None,
        Access::SignIn => Some(Route::Login {}),
        Access::WrongRole => Some(Route::Dashboard {}),
    }
}

#[component]
pub fn AppLayout() -> Element {
    let mut auth = use_auth();
    let api = use_api();
    let config = use_context::<ClientConfig>();
    let nav = use_navigator();
    let route = use_route::<Route>();
    let current = auth();
    let state = current.clone().synced(api.client().session());
    if state != current {
        spawn(async move { auth.set(AuthState::default()) });
    }

    let access = route.access();
    let target = redirect_for(access, &state);
    if let Some(target) = target.clone() {
        tracing::debug!(from = %route, to = %target, "redirecting");
        nav.replace(target);
    }
    let pending = matches!(access, RouteAccess::SignedIn(_)) && state.loading;
    let role = state.role();

    rsx! {
        Navbar {
            title: config.app.title.clone(),
            on_logout: move |_| {
                nav.replace(Route::Login {});
            },
            {match role {
                Some(role) => rsx! {
                    Link { to: Route::Dashboard {}, "Dashboard" }
                    Link { to: Route::Profile {}, "Profile" }
                    if role == Role::Patient {
                        Link { to: Route::Goals {}, "My Goals" }
                        Link { to: Route::PreventiveCare {}, "Checkups" }
                    }
                    if role == Role::Provider {
                        Link { to: Route::Patients {}, "Patients" }
                        Link { to: Route::PatientManagement {}, "Manage Patients" }
                    }
                },
                None => rsx! {
                    Link { to: Route::Login {}, "Login" }
                    Link { to: Route::Register {}, "Register" }
                },
            }}
        }
        if pending {
            Loading {}
        } else if target.is_none() {
            Outlet::<Route> {}
        }
    }
}
