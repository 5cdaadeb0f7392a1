//! This crate contains all shared UI for the workspace.

use dioxus::prelude::*;

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

pub const COMPONENTS_CSS: Asset = asset!("/assets/styling/components.css");

mod session;
pub use session::make_session;

mod auth;
pub use auth::{use_api, use_auth, AuthProvider, AuthState, LogoutButton};

pub mod guard;
pub use guard::{check_access, Access};

pub mod clock;

mod remote;
pub use remote::{Remote, SESSION_EXPIRED};

mod navbar;
pub use navbar::Navbar;

mod banner;
pub use banner::{ErrorBanner, SuccessBanner};

pub mod widgets;
pub use widgets::{Badge, EmptyState, Loading, ProgressBar, StatCard};

mod progress;
pub use progress::{entry_goal, ProgressTable};

mod goals;
pub use goals::{GoalCard, GoalsTable};

mod care;
pub use care::{CareTable, UpcomingCare};

mod tag_input;
pub use tag_input::TagInput;

mod modal;
pub use modal::Modal;
