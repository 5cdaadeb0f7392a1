use dioxus::prelude::*;

use store::Role;
use ui::AuthProvider;
use views::{
    AppLayout, AssignGoals, Dashboard, Goals, Login, PatientManagement, Patients,
    PreventiveCare, Profile, Register,
};

mod config;
mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(AppLayout)]
        #[route("/")]
        Root {},
        #[route("/login")]
        Login {},
        #[route("/register")]
        Register {},
        #[route("/dashboard")]
        Dashboard {},
        #[route("/profile")]
        Profile {},
        #[route("/goals")]
        Goals {},
        #[route("/preventive-care")]
        PreventiveCare {},
        #[route("/patients")]
        Patients {},
        #[route("/assign-goals")]
        AssignGoals {},
        #[route("/patient-management")]
        PatientManagement {},
    #[end_layout]
    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}

/// Who may open a route.
#[derive(Clone, Copy, Debug, PartialEq)]
enum RouteAccess {
    Public,
    /// Login and registration; signed-in users are sent to the dashboard.
    SignedOut,
    /// Any signed-in user when empty, else only the listed roles.
    SignedIn(&'static [Role]),
}

impl Route {
    fn access(&self) -> RouteAccess {
        match self {
            Route::Root {} | Route::NotFound { .. } => RouteAccess::Public,
            Route::Login {} | Route::Register {} => RouteAccess::SignedOut,
            Route::Dashboard {} | Route::Profile {} => RouteAccess::SignedIn(&[]),
            Route::Goals {} | Route::PreventiveCare {} => RouteAccess::SignedIn(&[Role::Patient]),
            Route::Patients {} | Route::AssignGoals {} | Route::PatientManagement {} => {
                RouteAccess::SignedIn(&[Role::Provider])
            }
        }
    }
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    let config = use_context_provider(|| {
        let config = config::load();
        tracing::info!(base_url = %config.api.base_url, "starting wellness client");
        config
    });

    rsx! {
        document::Title { "{config.app.title}" }
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        document::Link { rel: "stylesheet", href: ui::COMPONENTS_CSS }
        AuthProvider {
            config: config.clone(),
            Router::<Route> {}
        }
    }
}

#[component]
fn Root() -> Element {
    let auth = ui::use_auth();
    let nav = use_navigator();
    let state = auth();
    if !state.loading {
        if state.user.is_some() {
            nav.replace(Route::Dashboard {});
        } else {
            nav.replace(Route::Login {});
        }
    }
    rsx! {}
}

#[component]
fn NotFound(segments: Vec<String>) -> Element {
    rsx! {
        div {
            class: "page",
            h2 { "Page not found" }
            p { class: "muted", "/{segments.join(\"/\")}" }
            Link { to: Route::Root {}, "Back to the start" }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_restricted_routes() {
        assert_eq!(
            Route::Goals {}.access(),
            RouteAccess::SignedIn(&[Role::Patient])
        );
        assert_eq!(
            Route::PreventiveCare {}.access(),
            RouteAccess::SignedIn(&[Role::Patient])
        );
        for provider_only in [
            Route::Patients {},
            Route::AssignGoals {},
            Route::PatientManagement {},
        ] {
            assert_eq!(
                provider_only.access(),
                RouteAccess::SignedIn(&[Role::Provider])
            );
        }
        assert_eq!(Route::Dashboard {}.access(), RouteAccess::SignedIn(&[]));
        assert_eq!(Route::Login {}.access(), RouteAccess::SignedOut);
    }

    #[test]
    fn test_paths() {
        assert_eq!(Route::PreventiveCare {}.to_string(), "/preventive-care");
        assert_eq!(Route::PatientManagement {}.to_string(), "/patient-management");
        assert_eq!(
            "/assign-goals".parse::<Route>().ok(),
            Some(Route::AssignGoals {})
        );
    }
}
