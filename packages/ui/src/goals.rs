use dioxus::prelude::*;
use store::models::GoalStatus;
use store::WellnessGoal;

use crate::clock::{format_date, now_local};
use crate::widgets::{Badge, EmptyState, ProgressBar};

/// `10000 steps daily`
pub fn daily_target(goal: &WellnessGoal) -> String {
    format!("{} {} daily", goal.targets.daily, goal.unit)
}

/// One active goal with its streaks; `children` renders below the stats (the log form).
#[component]
pub fn GoalCard(goal: WellnessGoal, children: Element) -> Element {
    let offset = *now_local().offset();
    let start = format_date(&goal.duration.start_date, &offset);
    let end = format_date(&goal.duration.end_date, &offset);
    let progress = &goal.progress;

    rsx! {
        div {
            class: "card goal-card",
            div {
                class: "goal-card-header",
                h3 { "{goal.goal_type.label()}" }
                Badge { kind: goal.status.as_str(), label: goal.status.as_str() }
            }
            p { class: "goal-card-target", "{daily_target(&goal)}" }
            ProgressBar { percentage: progress.completion_rate }
            div {
                class: "goal-card-stats",
                span { "Current streak: {progress.current_streak} days" }
                span { "Longest streak: {progress.longest_streak} days" }
                span { "Completed: {progress.days_completed}/{progress.total_days} days" }
            }
            p { class: "goal-card-duration", "{start} – {end}" }
            if let Some(notes) = goal.notes.as_ref().filter(|n| !n.is_empty()) {
                p { class: "goal-card-notes", "{notes}" }
            }
            {children}
        }
    }
}

/// Goals of one patient, as seen by a provider.
#[component]
pub fn GoalsTable(
    goals: Vec<WellnessGoal>,
    #[props(default)] busy: bool,
    on_set_status: Option<EventHandler<(String, GoalStatus)>>,
    on_delete: Option<EventHandler<String>>,
) -> Element {
    if goals.is_empty() {
        return rsx! {
            EmptyState { message: "No goals assigned yet." }
        };
    }

    rsx! {
        table {
            class: "table",
            thead {
                tr {
                    th { "Goal" }
                    th { "Target" }
                    th { "Status" }
                    th { "Streak" }
                    th { "Completion" }
                    if on_set_status.is_some() || on_delete.is_some() {
                        th { "" }
                    }
                }
            }
            tbody {
                for goal in goals.iter().cloned() {
                    tr {
                        key: "{goal.id}",
                        td { "{goal.goal_type.label()}" }
                        td { "{daily_target(&goal)}" }
                        td { Badge { kind: goal.status.as_str(), label: goal.status.as_str() } }
                        td { "{goal.progress.current_streak}" }
                        td { ProgressBar { percentage: goal.progress.completion_rate } }
                        if on_set_status.is_some() || on_delete.is_some() {
                            td {
                                class: "table-actions",
                                if let Some(on_set_status) = on_set_status {
                                    {
                                        let id = goal.id.clone();
                                        let next = if goal.status == GoalStatus::Active {
                                            GoalStatus::Paused
                                        } else {
                                            GoalStatus::Active
                                        };
                                        rsx! {
                                            button {
                                                class: "button button--small",
                                                disabled: busy,
                                                onclick: move |_| on_set_status.call((id.clone(), next)),
                                                if next == GoalStatus::Paused { "Pause" } else { "Resume" }
                                            }
                                        }
                                    }
                                }
                                if let Some(on_delete) = on_delete {
                                    {
                                        let id = goal.id.clone();
                                        rsx! {
                                            button {
                                                class: "button button--small button--danger",
                                                disabled: busy,
                                                onclick: move |_| on_delete.call(id.clone()),
                                                "Delete"
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
