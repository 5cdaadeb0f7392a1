//! Every registered patient next to the provider's own list.

use dioxus::prelude::*;
use store::forms::AssignGoalForm;
use store::requests::AssignPatientRequest;
use store::User;
use ui::{use_api, Badge, EmptyState, ErrorBanner, Loading, Remote, SuccessBanner};

use super::patients::{AssignGoalDialog, PatientCard};

#[component]
pub fn PatientManagement() -> Element {
    let api = use_api();
    let mut everyone = use_signal(Remote::<Vec<User>>::default);
    let mut assigned = use_signal(Remote::<Vec<User>>::default);
    let mut revision = use_signal(|| 0u32);
    let mut goal_for = use_signal(|| Option::<User>::None);
    let mut busy = use_signal(|| false);
    let mut error = use_signal(|| Option::<String>::None);
    let mut success = use_signal(|| Option::<String>::None);

    let loader_api = api.clone();
    let _loader = use_resource(move || {
        let api = loader_api.clone();
        async move {
            let _ = revision();
            everyone.write().begin();
            assigned.write().begin();
            let result = api.all_patients().await;
            everyone.write().finish(result, "Failed to load patients");
            let result = api.patients().await;
            assigned.write().finish(result, "Failed to load patients");
        }
    });

    let handle_assign_patient = use_callback(move |patient: User| {
        let Some(patient_id) = patient.id().map(str::to_string) else {
            error.set(Some("Patient ID is missing".to_string()));
            return;
        };
        let api = api.clone();
        spawn(async move {
            error.set(None);
            success.set(None);
            busy.set(true);
            match api.assign_patient(&AssignPatientRequest { patient_id }).await {
                Ok(_) => {
                    success.set(Some("Patient assigned successfully".to_string()));
                    *revision.write() += 1;
                }
                Err(e) => error.set(Some(e.user_message("Failed to assign patient"))),
            }
            busy.set(false);
        });
    });

    let all_state = everyone.read().clone();
    let mine_state = assigned.read().clone();
    if all_state.is_pending() && mine_state.is_pending() {
        return rsx! {
            Loading { label: "Loading patients..." }
        };
    }
    let all = all_state.data().cloned().unwrap_or_default();
    let mine = mine_state.data().cloned().unwrap_or_default();
    let load_error = all_state.error().or(mine_state.error()).map(str::to_string);

    rsx! {
        div {
            class: "page",
            h2 { "Patient Management" }

            if let Some(err) = error().or(load_error) {
                ErrorBanner {
                    message: err,
                    on_dismiss: move |_| {
                        error.set(None);
                        everyone.write().dismiss_error();
                        assigned.write().dismiss_error();
                    },
                }
            }
            if let Some(msg) = success() {
                SuccessBanner { message: msg, on_dismiss: move |_| success.set(None) }
            }

            div {
                class: "grid grid--halves",
                div {
                    class: "card",
                    h3 { "All Patients" }
                    if all.is_empty() {
                        EmptyState { message: "No patients registered." }
                    } else {
                        table {
                            class: "table",
                            thead {
                                tr {
                                    th { "Name" }
                                    th { "Email" }
                                    th { "Status" }
                                    th { "" }
                                }
                            }
                            tbody {
                                for patient in all.iter().cloned() {
                                    {
                                        let has_provider = patient
                                            .patient_info
                                            .as_ref()
                                            .is_some_and(|info| info.assigned_provider.is_some());
                                        let claimed = patient.clone();
                                        rsx! {
                                            tr {
                                                key: "{patient.id().unwrap_or_default()}",
                                                td { "{patient.full_name()}" }
                                                td { "{patient.email}" }
                                                td {
                                                    if has_provider {
                                                        Badge { kind: "assigned", label: "Assigned" }
                                                    } else {
                                                        Badge { kind: "unassigned", label: "Unassigned" }
                                                    }
                                                }
                                                td {
                                                    if !has_provider {
                                                        button {
                                                            class: "button button--small",
                                                            disabled: busy(),
                                                            onclick: move |_| handle_assign_patient.call(claimed.clone()),
                                                            "Assign to Me"
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

                div {
                    class: "card",
                    h3 { "My Patients" }
                    if mine.is_empty() {
                        EmptyState { message: "No patients assigned yet" }
                    }
                    for patient in mine.iter().cloned() {
                        PatientCard {
                            key: "{patient.id().unwrap_or_default()}",
                            patient: patient.clone(),
                            on_assign_goal: move |p: User| goal_for.set(Some(p)),
                        }
                    }
                }
            }
        }

        if let Some(patient) = goal_for() {
            AssignGoalDialog {
                patient,
                initial: AssignGoalForm::custom(),
                on_close: move |_| goal_for.set(None),
                on_assigned: move |_| {
                    goal_for.set(None);
                    success.set(Some("Goal assigned successfully".to_string()));
                    *revision.write() += 1;
                },
            }
        }
    }
}
