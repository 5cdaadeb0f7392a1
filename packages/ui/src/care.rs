use dioxus::prelude::*;
use store::models::care_type_label;
use store::{CareStatus, PreventiveCare};

use crate::clock::{format_date_time, now_local};
use crate::widgets::{Badge, EmptyState};

/// Appointment list; scheduled rows get a "mark completed" button when `on_complete` is set.
#[component]
pub fn CareTable(
    items: Vec<PreventiveCare>,
    #[props(default)] busy: bool,
    on_complete: Option<EventHandler<String>>,
) -> Element {
    if items.is_empty() {
        return rsx! {
            EmptyState { message: "No preventive care scheduled." }
        };
    }
    let offset = *now_local().offset();

    rsx! {
        table {
            class: "table",
            thead {
                tr {
                    th { "Type" }
                    th { "Scheduled" }
                    th { "Priority" }
                    th { "Status" }
                    th { "Notes" }
                    if on_complete.is_some() {
                        th { "" }
                    }
                }
            }
            tbody {
                for item in items.iter().cloned() {
                    tr {
                        key: "{item.id}",
                        td { "{care_type_label(&item.care_type)}" }
                        td { "{format_date_time(&item.scheduled_date, &offset)}" }
                        td { Badge { kind: item.priority.as_str(), label: item.priority.label() } }
                        td { Badge { kind: item.status.as_str(), label: item.status.label() } }
                        td { "{item.notes.clone().unwrap_or_default()}" }
                        if let Some(on_complete) = on_complete {
                            td {
                                if item.status == CareStatus::Scheduled {
                                    {
                                        let id = item.id.clone();
                                        rsx! {
                                            button {
                                                class: "button button--small",
                                                disabled: busy,
                                                onclick: move |_| on_complete.call(id.clone()),
                                                "Mark completed"
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Compact list of upcoming checkups with priority badges.
#[component]
pub fn UpcomingCare(items: Vec<PreventiveCare>) -> Element {
    if items.is_empty() {
        return rsx! {
            EmptyState { message: "No upcoming checkups." }
        };
    }
    let offset = *now_local().offset();

    rsx! {
        ul {
            class: "upcoming-care",
            for item in items.iter() {
                li {
                    key: "{item.id}",
                    span { class: "upcoming-care-type", "{care_type_label(&item.care_type)}" }
                    span { class: "upcoming-care-date", "{format_date_time(&item.scheduled_date, &offset)}" }
                    Badge { kind: item.priority.as_str(), label: item.priority.label() }
                }
            }
        }
    }
}
