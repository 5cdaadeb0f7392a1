//! Patient goals: active goal cards, the log-progress dialog and a history lookup.

use dioxus::prelude::*;
use store::forms::{history_query, LogProgressForm};
use store::{DailyProgress, WellnessGoal};
use ui::clock::today;
use ui::{
    use_api, EmptyState, ErrorBanner, GoalCard, Loading, Modal, ProgressTable, Remote,
    SuccessBanner,
};

#[component]
pub fn Goals() -> Element {
    let api = use_api();
    let mut goals = use_signal(Remote::<Vec<WellnessGoal>>::default);
    let mut revision = use_signal(|| 0u32);
    let mut selected = use_signal(|| Option::<WellnessGoal>::None);
    let mut log_form = use_signal(|| LogProgressForm::new(today()));
    let mut submitting = use_signal(|| false);
    let mut error = use_signal(|| Option::<String>::None);
    let mut success = use_signal(|| Option::<String>::None);

    let loader_api = api.clone();
    let _loader = use_resource(move || {
        let api = loader_api.clone();
        async move {
            let _ = revision();
            goals.write().begin();
            let result = api.active_goals().await;
            goals.write().finish(result, "Failed to load goals");
        }
    });

    let handle_log = move |evt: FormEvent| {
        evt.prevent_default();
        let Some(goal) = selected() else {
            return;
        };
        let api = api.clone();
        spawn(async move {
            error.set(None);
            let submitted = log_form.read().submit(&goal.id);
            let request = match submitted {
                Ok(request) => request,
                Err(e) => {
                    error.set(Some(e.to_string()));
                    return;
                }
            };

            submitting.set(true);
            match api.log_progress(&request).await {
                Ok(_) => {
                    tracing::info!(goal = %goal.id, "progress logged");
                    selected.set(None);
                    log_form.set(LogProgressForm::new(today()));
                    success.set(Some("Progress logged".to_string()));
                    *revision.write() += 1;
                }
                Err(e) => error.set(Some(e.user_message("Failed to log progress"))),
            }
            submitting.set(false);
        });
    };

    let state = goals.read().clone();
    if state.is_pending() {
        return rsx! {
            Loading { label: "Loading goals..." }
        };
    }
    let active = state.data().cloned().unwrap_or_default();

    rsx! {
        div {
            class: "page",
            div {
                class: "page-header",
                h2 { "My Wellness Goals" }
            }

            if let Some(err) = state.error() {
                ErrorBanner {
                    message: err.to_string(),
                    on_dismiss: move |_| goals.write().dismiss_error(),
                }
            }
            if let Some(msg) = success() {
                SuccessBanner { message: msg, on_dismiss: move |_| success.set(None) }
            }

            if active.is_empty() && state.error().is_none() {
                EmptyState { message: "No active goals found. Your healthcare provider will assign goals for you." }
            }

            div {
                class: "grid grid--cards",
                for goal in active.iter().cloned() {
                    {
                        let picked = goal.clone();
                        rsx! {
                            GoalCard {
                                key: "{goal.id}",
                                goal: goal.clone(),
                                button {
                                    class: "button button--small",
                                    disabled: !goal.accepts_progress(),
                                    onclick: move |_| {
                                        error.set(None);
                                        log_form.set(LogProgressForm::new(today()));
                                        selected.set(Some(picked.clone()));
                                    },
                                    "Log Progress"
                                }
                            }
                        }
                    }
                }
            }

            ProgressHistory { goals: active.clone() }
        }

        if let Some(goal) = selected() {
            Modal {
                title: format!("Log Progress - {}", goal.goal_type.label()),
                on_close: move |_| selected.set(None),

                if let Some(err) = error() {
                    ErrorBanner { message: err, on_dismiss: move |_| error.set(None) }
                }

                form {
                    class: "form",
                    onsubmit: handle_log,
                    div {
                        class: "field",
                        label { "Date" }
                        input {
                            r#type: "date",
                            value: log_form.read().date.clone(),
                            oninput: move |evt: FormEvent| log_form.write().date = evt.value(),
                        }
                    }
                    div {
                        class: "field",
                        label { "Actual Value ({goal.unit})" }
                        input {
                            r#type: "number",
                            step: "any",
                            min: "0",
                            placeholder: "Target: {goal.targets.daily} {goal.unit}",
                            value: log_form.read().actual_value.clone(),
                            oninput: move |evt: FormEvent| log_form.write().actual_value = evt.value(),
                        }
                    }
                    div {
                        class: "button-row",
                        button {
                            class: "button button--ghost",
                            r#type: "button",
                            onclick: move |_| selected.set(None),
                            "Cancel"
                        }
                        button {
                            class: "button",
                            r#type: "submit",
                            disabled: submitting(),
                            if submitting() { "Saving..." } else { "Log Progress" }
                        }
                    }
                }
            }
        }
    }
}

/// Past logs for one goal or all of them, between optional dates.
#[component]
fn ProgressHistory(goals: Vec<WellnessGoal>) -> Element {
    let api = use_api();
    let mut goal_id = use_signal(String::new);
    let mut from = use_signal(String::new);
    let mut to = use_signal(String::new);
    let mut history = use_signal(|| Option::<Remote<Vec<DailyProgress>>>::None);
    let mut error = use_signal(|| Option::<String>::None);

    let handle_search = move |evt: FormEvent| {
        evt.prevent_default();
        let api = api.clone();
        spawn(async move {
            error.set(None);
            let goal = goal_id();
            let query = match history_query((!goal.is_empty()).then_some(goal.as_str()), &from(), &to()) {
                Ok(query) => query,
                Err(e) => {
                    error.set(Some(e.to_string()));
                    return;
                }
            };
            history.write().get_or_insert_with(Remote::default).begin();
            let result = api.progress_history(&query).await;
            history
                .write()
                .get_or_insert_with(Remote::default)
                .finish(result, "Failed to load progress history");
        });
    };

    let state = history.read().clone();
    let loading = state.as_ref().is_some_and(|s| s.is_loading());

    rsx! {
        div {
            class: "card",
            h3 { "Progress History" }

            if let Some(err) = error().or_else(|| state.as_ref().and_then(|s| s.error().map(str::to_string))) {
                ErrorBanner { message: err }
            }

            form {
                class: "form",
                onsubmit: handle_search,
                div {
                    class: "field",
                    label { "Goal" }
                    select {
                        value: goal_id(),
                        onchange: move |evt: FormEvent| goal_id.set(evt.value()),
                        option { value: "", "All goals" }
                        for goal in goals.iter() {
                            option { key: "{goal.id}", value: "{goal.id}", "{goal.goal_type.label()}" }
                        }
                    }
                }
                div {
                    class: "field",
                    label { "From" }
                    input {
                        r#type: "date",
                        value: from(),
                        oninput: move |evt: FormEvent| from.set(evt.value()),
                    }
                }
                div {
                    class: "field",
                    label { "To" }
                    input {
                        r#type: "date",
                        value: to(),
                        oninput: move |evt: FormEvent| to.set(evt.value()),
                    }
                }
                button {
                    class: "button button--small",
                    r#type: "submit",
                    disabled: loading,
                    "Show history"
                }
            }

            if let Some(entries) = state.as_ref().and_then(|s| s.data()) {
                ProgressTable { entries: entries.clone() }
            }
        }
    }
}
