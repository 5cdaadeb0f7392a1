//! Provider console: assigned patients, their goals, and goal assignment.

use dioxus::prelude::*;
use store::forms::{AssignGoalForm, GoalPeriod};
use store::requests::ModifyGoalRequest;
use store::{FormError, GoalStatus, GoalType, User, WellnessGoal};
use ui::clock::today;
use ui::{
    use_api, Badge, EmptyState, ErrorBanner, GoalsTable, Loading, Modal, Remote, SuccessBanner,
};

/// Dialogs the console can have open.
#[derive(Clone, Debug, PartialEq)]
enum Dialog {
    Goals(User),
    Assign(User),
}

#[component]
pub fn Patients() -> Element {
    rsx! {
        ProviderConsole { title: "My Patients" }
    }
}

/// Same console under the `/assign-goals` path.
#[component]
pub fn AssignGoals() -> Element {
    rsx! {
        ProviderConsole { title: "Assign Goals" }
    }
}

#[component]
fn ProviderConsole(#[props(into)] title: String) -> Element {
    let api = use_api();
    let mut patients = use_signal(Remote::<Vec<User>>::default);
    let mut dialog = use_signal(|| Option::<Dialog>::None);
    let mut success = use_signal(|| Option::<String>::None);

    let _loader = use_resource(move || {
        let api = api.clone();
        async move {
            patients.write().begin();
            let result = api.patients().await;
            patients.write().finish(result, "Failed to load patients");
        }
    });

    let state = patients.read().clone();
    if state.is_pending() {
        return rsx! {
            Loading { label: "Loading patients..." }
        };
    }
    let assigned = state.data().cloned().unwrap_or_default();

    rsx! {
        div {
            class: "page",
            div {
                class: "page-header",
                h2 { "{title}" }
                span { class: "muted", "{assigned.len()} assigned" }
            }

            if let Some(err) = state.error() {
                ErrorBanner {
                    message: err.to_string(),
                    on_dismiss: move |_| patients.write().dismiss_error(),
                }
            }
            if let Some(msg) = success() {
                SuccessBanner { message: msg, on_dismiss: move |_| success.set(None) }
            }

            if assigned.is_empty() && state.error().is_none() {
                EmptyState { message: "No patients assigned yet." }
            }

            div {
                class: "grid grid--cards",
                for patient in assigned.iter().cloned() {
                    PatientCard {
                        key: "{patient.id().unwrap_or_default()}",
                        patient: patient.clone(),
                        on_view_goals: move |p: User| dialog.set(Some(Dialog::Goals(p))),
                        on_assign_goal: move |p: User| dialog.set(Some(Dialog::Assign(p))),
                    }
                }
            }
        }

        {match dialog() {
            Some(Dialog::Goals(patient)) => rsx! {
                PatientGoalsDialog { patient, on_close: move |_| dialog.set(None) }
            },
            Some(Dialog::Assign(patient)) => rsx! {
                AssignGoalDialog {
                    patient,
                    initial: AssignGoalForm::new(today()),
                    on_close: move |_| dialog.set(None),
                    on_assigned: move |_| {
                        dialog.set(None);
                        success.set(Some("Goal assigned successfully".to_string()));
                    },
                }
            },
            None => rsx! {},
        }}
    }
}

/// Contact details, allergies and medications of one patient, with the
/// actions whose handlers are set.
#[component]
pub(crate) fn PatientCard(
    patient: User,
    on_view_goals: Option<EventHandler<User>>,
    on_assign_goal: Option<EventHandler<User>>,
) -> Element {
    let allergies = patient.allergies().to_vec();
    let medications = patient.medications().to_vec();

    rsx! {
        div {
            class: "card patient-card",
            h3 { "{patient.full_name()}" }
            p { class: "muted", "{patient.email}" }
            if let Some(phone) = patient.profile.phone.clone() {
                p { class: "muted", "{phone}" }
            }

            div {
                strong { "Allergies: " }
                if allergies.is_empty() {
                    span { class: "muted", "None recorded" }
                }
                for allergy in allergies {
                    Badge { key: "{allergy}", kind: "allergy", label: allergy.clone() }
                }
            }
            div {
                strong { "Medications: " }
                if medications.is_empty() {
                    span { class: "muted", "None recorded" }
                }
                for medication in medications {
                    Badge { key: "{medication}", kind: "medication", label: medication.clone() }
                }
            }

            div {
                class: "button-row",
                if let Some(on_view_goals) = on_view_goals {
                    {
                        let patient = patient.clone();
                        rsx! {
                            button {
                                class: "button button--small button--ghost",
                                onclick: move |_| on_view_goals.call(patient.clone()),
                                "View Goals & Progress"
                            }
                        }
                    }
                }
                if let Some(on_assign_goal) = on_assign_goal {
                    {
                        let patient = patient.clone();
                        rsx! {
                            button {
                                class: "button button--small",
                                onclick: move |_| on_assign_goal.call(patient.clone()),
                                "Assign New Goal"
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Whose goals to fetch; a patient without an id has none to show.
fn goals_owner(patient: &User) -> Result<String, FormError> {
    patient
        .id()
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .ok_or(FormError::MissingPatient)
}

/// A patient's goals, with pause/resume and delete.
#[component]
fn PatientGoalsDialog(patient: User, on_close: EventHandler<()>) -> Element {
    let api = use_api();
    let owner = goals_owner(&patient);
    let mut goals = use_signal(Remote::<Vec<WellnessGoal>>::default);
    let mut revision = use_signal(|| 0u32);
    let mut busy = use_signal(|| false);
    let mut error = use_signal(|| Option::<String>::None);

    let loader_api = api.clone();
    let loader_id = owner.as_ref().ok().cloned();
    let _loader = use_resource(move || {
        let api = loader_api.clone();
        let patient_id = loader_id.clone();
        async move {
            let _ = revision();
            let Some(patient_id) = patient_id else {
                return;
            };
            goals.write().begin();
            let result = api.patient_goals(&patient_id).await;
            goals.write().finish(result, "Failed to load patient goals");
        }
    });

    let status_api = api.clone();
    let handle_set_status = move |(goal_id, status): (String, GoalStatus)| {
        let api = status_api.clone();
        spawn(async move {
            error.set(None);
            busy.set(true);
            let request = ModifyGoalRequest {
                status: Some(status),
                ..Default::default()
            };
            match api.modify_goal(&goal_id, &request).await {
                Ok(_) => {
                    tracing::info!(goal = %goal_id, status = status.as_str(), "goal updated");
                    *revision.write() += 1;
                }
                Err(e) => error.set(Some(e.user_message("Failed to update goal"))),
            }
            busy.set(false);
        });
    };

    let handle_delete = move |goal_id: String| {
        let api = api.clone();
        spawn(async move {
            error.set(None);
            busy.set(true);
            match api.delete_goal(&goal_id).await {
                Ok(_) => {
                    tracing::info!(goal = %goal_id, "goal deleted");
                    *revision.write() += 1;
                }
                Err(e) => error.set(Some(e.user_message("Failed to delete goal"))),
            }
            busy.set(false);
        });
    };

    let state = goals.read().clone();

    rsx! {
        Modal {
            title: format!("Goals - {}", patient.full_name()),
            on_close,

            if let Some(err) = error().or_else(|| state.error().map(str::to_string)) {
                ErrorBanner { message: err }
            }

            if let Err(e) = owner {
                ErrorBanner { message: e.to_string() }
            } else if state.is_pending() {
                Loading { label: "Loading goals..." }
            } else {
                GoalsTable {
                    goals: state.data().cloned().unwrap_or_default(),
                    busy: busy(),
                    on_set_status: handle_set_status,
                    on_delete: handle_delete,
                }
            }
        }
    }
}

/// Goal assignment form for one patient.
///
/// `initial` decides the flavour: a fixed period from a start date, or
/// explicit start and end dates when its period is [`GoalPeriod::Custom`].
#[component]
pub(crate) fn AssignGoalDialog(
    patient: User,
    initial: AssignGoalForm,
    on_close: EventHandler<()>,
    on_assigned: EventHandler<()>,
) -> Element {
    let api = use_api();
    let patient_id = patient.id().map(str::to_string);
    let custom = initial.period == GoalPeriod::Custom;
    let mut form = use_signal(move || initial);
    let mut submitting = use_signal(|| false);
    let mut error = use_signal(|| Option::<String>::None);

    let handle_assign = move |evt: FormEvent| {
        evt.prevent_default();
        let api = api.clone();
        let patient_id = patient_id.clone();
        spawn(async move {
            error.set(None);
            let submitted = form.read().submit(patient_id.as_deref());
            let request = match submitted {
                Ok(request) => request,
                Err(e) => {
                    error.set(Some(e.to_string()));
                    return;
                }
            };

            submitting.set(true);
            match api.assign_goal(&request).await {
                Ok(_) => {
                    tracing::info!(patient = %request.patient_id, goal_type = request.goal_type.as_str(), "goal assigned");
                    submitting.set(false);
                    on_assigned.call(());
                }
                Err(e) => {
                    submitting.set(false);
                    error.set(Some(e.user_message("Failed to assign goal")));
                }
            }
        });
    };

    rsx! {
        Modal {
            title: format!("Assign Goal - {}", patient.full_name()),
            on_close,

            if let Some(err) = error() {
                ErrorBanner { message: err, on_dismiss: move |_| error.set(None) }
            }

            form {
                class: "form",
                onsubmit: handle_assign,
                div {
                    class: "field",
                    label { "Goal Type" }
                    select {
                        value: form.read().goal_type.as_str(),
                        onchange: move |evt: FormEvent| {
                            if let Some(goal_type) = GoalType::from_form(&evt.value()) {
                                form.write().set_goal_type(goal_type);
                            }
                        },
                        for goal_type in GoalType::ALL {
                            option { key: "{goal_type.as_str()}", value: goal_type.as_str(), "{goal_type.label()}" }
                        }
                    }
                }
                div {
                    class: "grid grid--halves",
                    div {
                        class: "field",
                        label { "Daily Target" }
                        input {
                            r#type: "number",
                            step: "any",
                            min: "0",
                            required: true,
                            value: form.read().daily_target.clone(),
                            oninput: move |evt: FormEvent| form.write().daily_target = evt.value(),
                        }
                    }
                    div {
                        class: "field",
                        label { "Unit" }
                        input {
                            required: true,
                            value: form.read().unit.clone(),
                            oninput: move |evt: FormEvent| form.write().unit = evt.value(),
                        }
                    }
                }
                div {
                    class: "grid grid--halves",
                    div {
                        class: "field",
                        label { "Start Date" }
                        input {
                            r#type: "date",
                            required: true,
                            value: form.read().start_date.clone(),
                            oninput: move |evt: FormEvent| form.write().start_date = evt.value(),
                        }
                    }
                    if custom {
                        div {
                            class: "field",
                            label { "End Date" }
                            input {
                                r#type: "date",
                                required: true,
                                value: form.read().end_date.clone(),
                                oninput: move |evt: FormEvent| form.write().end_date = evt.value(),
                            }
                        }
                    } else {
                        div {
                            class: "field",
                            label { "Duration" }
                            select {
                                value: form.read().period.as_str(),
                                onchange: move |evt: FormEvent| {
                                    if let Some(period) = GoalPeriod::from_form(&evt.value()) {
                                        form.write().period = period;
                                    }
                                },
                                option { value: GoalPeriod::OneMonth.as_str(), "1 Month" }
                                option { value: GoalPeriod::ThreeMonths.as_str(), "3 Months" }
                            }
                        }
                    }
                }
                div {
                    class: "field",
                    label { "Notes" }
                    textarea {
                        rows: "3",
                        value: form.read().notes.clone(),
                        oninput: move |evt: FormEvent| form.write().notes = evt.value(),
                    }
                }
                div {
                    class: "button-row",
                    button {
                        class: "button button--ghost",
                        r#type: "button",
                        onclick: move |_| on_close.call(()),
                        "Cancel"
                    }
                    button {
                        class: "button",
                        r#type: "submit",
                        disabled: submitting(),
                        if submitting() { "Assigning..." } else { "Assign Goal" }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(value: serde_json::Value) -> User {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_goals_owner_requires_an_id() {
        let with_id = user(serde_json::json!({
            "_id": "pat-1",
            "email": "pat@example.org",
            "role": "patient"
        }));
        assert_eq!(goals_owner(&with_id), Ok("pat-1".to_string()));

        let without_id = user(serde_json::json!({
            "email": "pat@example.org",
            "role": "patient"
        }));
        assert_eq!(goals_owner(&without_id), Err(FormError::MissingPatient));

        let empty_id = user(serde_json::json!({
            "id": "",
            "email": "pat@example.org",
            "role": "patient"
        }));
        assert_eq!(goals_owner(&empty_id), Err(FormError::MissingPatient));
    }
}
