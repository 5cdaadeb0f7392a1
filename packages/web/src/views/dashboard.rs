//! Dashboard: patient statistics, or a welcome card for providers.

use dioxus::prelude::*;
use store::{DashboardData, Role, User};
use ui::{
    use_api, use_auth, Badge, ErrorBanner, Loading, ProgressTable, Remote, StatCard,
    UpcomingCare,
};

#[component]
pub fn Dashboard() -> Element {
    let auth = use_auth();
    let Some(user) = auth().user else {
        return rsx! {};
    };

    rsx! {
        div {
            class: "page",
            h2 { "Dashboard" }
            {match user.role {
                Role::Patient => rsx! { PatientDashboard {} },
                Role::Provider => rsx! { ProviderWelcome { user } },
            }}
        }
    }
}

#[component]
fn PatientDashboard() -> Element {
    let api = use_api();
    let mut dashboard = use_signal(Remote::<DashboardData>::default);

    let _loader = use_resource(move || {
        let api = api.clone();
        async move {
            dashboard.write().begin();
            let result = api.dashboard().await;
            dashboard.write().finish(result, "Failed to load dashboard");
        }
    });

    let state = dashboard.read().clone();
    if state.is_pending() {
        return rsx! {
            Loading { label: "Loading dashboard..." }
        };
    }
    let data = state.data().cloned().unwrap_or_default();
    let summary = data.today_summary();

    rsx! {
        if let Some(err) = state.error() {
            ErrorBanner {
                message: err.to_string(),
                on_dismiss: move |_| dashboard.write().dismiss_error(),
            }
        }

        div {
            class: "grid grid--stats",
            StatCard { label: "Active Goals", value: data.active_goals.to_string() }
            StatCard { label: "Goals Achieved Today", value: summary.achieved.to_string() }
            StatCard { label: "Upcoming Checkups", value: data.upcoming_care.len().to_string() }
            StatCard { label: "Average Progress", value: format!("{}%", summary.average_percentage) }
        }

        div {
            class: "grid grid--halves",
            div {
                class: "card",
                h3 { "Today's Progress" }
                ProgressTable { entries: data.today_progress.clone() }
            }
            div {
                class: "card",
                h3 { "Goal Status" }
                ul {
                    class: "upcoming-care",
                    li {
                        Badge { kind: "achieved", label: "Completed" }
                        " {summary.achieved}"
                    }
                    li {
                        Badge { kind: "in-progress", label: "In Progress" }
                        " {summary.in_progress}"
                    }
                    li {
                        Badge { kind: "not-started", label: "Not Started" }
                        " {summary.not_started}"
                    }
                }
            }
        }

        div {
            class: "grid grid--halves",
            div {
                class: "card",
                h3 { "Upcoming Checkups" }
                UpcomingCare { items: data.upcoming_care.clone() }
            }
            div {
                class: "card",
                h3 { "Health Tip of the Day" }
                {match data.health_tip.clone() {
                    Some(tip) => rsx! {
                        h4 { "{tip.title}" }
                        p { "{tip.content}" }
                        if !tip.category.is_empty() {
                            Badge { kind: "info", label: tip.category.clone() }
                        }
                    },
                    None => rsx! {
                        p { class: "muted", "No health tip available" }
                    },
                }}
            }
        }
    }
}

#[component]
fn ProviderWelcome(user: User) -> Element {
    rsx! {
        div {
            class: "card",
            h3 { "Provider Dashboard" }
            p { "Welcome, Dr. {user.profile.first_name}!" }
            p { class: "muted", "Use the navigation to manage your patients and assign wellness goals." }
        }
    }
}
