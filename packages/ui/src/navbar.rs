use dioxus::prelude::*;

use crate::auth::{use_auth, LogoutButton};
use crate::icons::FaHeartPulse;
use crate::Icon;

/// Top bar: brand, role-specific links (`children`), the signed-in user and a logout button.
#[component]
pub fn Navbar(title: String, on_logout: EventHandler<()>, children: Element) -> Element {
    let auth = use_auth();
    let state = auth();

    rsx! {
        nav {
            class: "navbar",
            span {
                class: "navbar-brand",
                Icon { icon: FaHeartPulse, width: 18, height: 18 }
                " {title}"
            }
            div {
                class: "navbar-links",
                {children}
            }
            if let Some(user) = state.user {
                div {
                    class: "navbar-user",
                    span { class: "navbar-user-name", "Welcome, {user.profile.first_name}" }
                    span { class: "navbar-user-role", "{user.role.label()}" }
                    LogoutButton { class: "button button--ghost", on_logout }
                }
            }
        }
    }
}
