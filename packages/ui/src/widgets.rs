//! Small presentational pieces shared by the pages.

use dioxus::prelude::*;
use store::ProgressLevel;

#[component]
pub fn StatCard(
    #[props(into)] label: String,
    #[props(into)] value: String,
    #[props(default, into)] hint: String,
) -> Element {
    rsx! {
        div {
            class: "stat-card",
            span { class: "stat-card-value", "{value}" }
            span { class: "stat-card-label", "{label}" }
            if !hint.is_empty() {
                span { class: "stat-card-hint", "{hint}" }
            }
        }
    }
}

#[component]
pub fn EmptyState(#[props(into)] message: String) -> Element {
    rsx! {
        p { class: "empty-state", "{message}" }
    }
}

#[component]
pub fn Loading(#[props(default = "Loading...".to_string())] label: String) -> Element {
    rsx! {
        div { class: "loading", "{label}" }
    }
}

pub fn progress_class(level: ProgressLevel) -> &'static str {
    match level {
        ProgressLevel::Good => "progress-fill progress-fill--good",
        ProgressLevel::Fair => "progress-fill progress-fill--fair",
        ProgressLevel::Poor => "progress-fill progress-fill--poor",
    }
}

/// Width for a progress bar fill; the backend can report more than 100%.
pub fn bar_width(percentage: f64) -> f64 {
    if percentage.is_nan() {
        return 0.0;
    }
    percentage.clamp(0.0, 100.0)
}

#[component]
pub fn ProgressBar(percentage: f64) -> Element {
    let class = progress_class(ProgressLevel::from_percentage(percentage));
    let width = bar_width(percentage);
    rsx! {
        div {
            class: "progress",
            div {
                class: "{class}",
                style: "width: {width}%",
            }
        }
        span { class: "progress-label", "{percentage:.0}%" }
    }
}

/// A coloured pill; `kind` picks the colour (`high`, `completed`, ...).
#[component]
pub fn Badge(#[props(into)] kind: String, #[props(into)] label: String) -> Element {
    rsx! {
        span { class: "badge badge--{kind}", "{label}" }
    }
}
