use dioxus::prelude::*;
use store::DailyProgress;

use crate::widgets::{Badge, EmptyState, ProgressBar};

/// Goal label and unit of a progress entry, when the backend populated its goal.
pub fn entry_goal(entry: &DailyProgress) -> (&'static str, &str) {
    match entry.goal_id.summary() {
        Some(goal) => (goal.goal_type.label(), goal.unit.as_str()),
        None => ("Goal", ""),
    }
}

/// Badge kind and label for a progress entry.
pub fn entry_state(entry: &DailyProgress) -> (&'static str, &'static str) {
    if entry.achieved {
        ("achieved", "Achieved")
    } else if entry.actual_value > 0.0 {
        ("in-progress", "In progress")
    } else {
        ("not-started", "Not started")
    }
}

#[component]
pub fn ProgressTable(entries: Vec<DailyProgress>) -> Element {
    if entries.is_empty() {
        return rsx! {
            EmptyState { message: "No progress logged today." }
        };
    }

    rsx! {
        table {
            class: "table",
            thead {
                tr {
                    th { "Goal" }
                    th { "Target" }
                    th { "Actual" }
                    th { "Progress" }
                    th { "Status" }
                }
            }
            tbody {
                for entry in entries.iter() {
                    {
                        let (label, unit) = entry_goal(entry);
                        let (kind, state) = entry_state(entry);
                        rsx! {
                            tr {
                                key: "{entry.id}",
                                td { "{label}" }
                                td { "{entry.target_value} {unit}" }
                                td { "{entry.actual_value} {unit}" }
                                td { ProgressBar { percentage: entry.completion_percentage } }
                                td { Badge { kind, label: state } }
                            }
                        }
                    }
                }
            }
        }
    }
}
