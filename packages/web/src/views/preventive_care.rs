//! Patient checkups: counters, the appointment table, booking and rescheduling.

use chrono::Utc;
use dioxus::prelude::*;
use store::forms::{reschedule, BookCareForm};
use store::models::{care_type_label, CARE_TYPES};
use store::requests::CompleteCareRequest;
use store::{CareStatus, CareSummary, Priority};
use ui::clock::{format_date_time, now_local};
use ui::{use_api, CareTable, ErrorBanner, Loading, Modal, Remote, StatCard, SuccessBanner};

#[component]
pub fn PreventiveCare() -> Element {
    let api = use_api();
    let mut schedule = use_signal(Remote::<Vec<store::PreventiveCare>>::default);
    let mut overdue = use_signal(Remote::<Vec<store::PreventiveCare>>::default);
    let mut revision = use_signal(|| 0u32);
    let mut booking = use_signal(|| false);
    let mut busy = use_signal(|| false);
    let mut error = use_signal(|| Option::<String>::None);
    let mut success = use_signal(|| Option::<String>::None);

    let loader_api = api.clone();
    let _loader = use_resource(move || {
        let api = loader_api.clone();
        async move {
            let _ = revision();
            schedule.write().begin();
            overdue.write().begin();
            let result = api.care_schedule().await;
            schedule.write().finish(result, "Failed to load appointments");
            let result = api.overdue_care().await;
            overdue.write().finish(result, "Failed to load overdue checkups");
        }
    });

    let complete_api = api.clone();
    let handle_complete = move |care_id: String| {
        let api = complete_api.clone();
        spawn(async move {
            error.set(None);
            busy.set(true);
            let request = CompleteCareRequest::completed_at(Utc::now());
            match api.mark_care_completed(&care_id, &request).await {
                Ok(_) => {
                    tracing::info!(care = %care_id, "care marked completed");
                    success.set(Some("Marked as completed".to_string()));
                    *revision.write() += 1;
                }
                Err(e) => error.set(Some(e.user_message("Failed to mark as completed"))),
            }
            busy.set(false);
        });
    };

    let state = schedule.read().clone();
    if state.is_pending() {
        return rsx! {
            Loading { label: "Loading appointments..." }
        };
    }
    let items = state.data().cloned().unwrap_or_default();
    let summary = CareSummary::from_schedule(&items);
    let late = overdue.read().data().cloned().unwrap_or_default();

    rsx! {
        div {
            class: "page",
            div {
                class: "page-header",
                h2 { "Preventive Care" }
                button {
                    class: "button",
                    onclick: move |_| booking.set(true),
                    "Book Appointment"
                }
            }

            if let Some(err) = state.error() {
                ErrorBanner {
                    message: err.to_string(),
                    on_dismiss: move |_| schedule.write().dismiss_error(),
                }
            }
            if let Some(err) = error() {
                ErrorBanner { message: err, on_dismiss: move |_| error.set(None) }
            }
            if let Some(msg) = success() {
                SuccessBanner { message: msg, on_dismiss: move |_| success.set(None) }
            }

            div {
                class: "grid grid--stats",
                for status in CareStatus::ALL {
                    StatCard {
                        key: "{status.as_str()}",
                        label: status.label(),
                        value: summary.count(status).to_string(),
                    }
                }
            }

            div {
                class: "card",
                h3 { "Appointments" }
                CareTable { items, busy: busy(), on_complete: handle_complete }
            }

            if !late.is_empty() {
                OverdueCare {
                    items: late,
                    on_rescheduled: move |_| {
                        success.set(Some("Appointment rescheduled".to_string()));
                        *revision.write() += 1;
                    },
                }
            }
        }

        if booking() {
            BookCareDialog {
                on_close: move |_| booking.set(false),
                on_booked: move |_| {
                    booking.set(false);
                    success.set(Some("Appointment booked".to_string()));
                    *revision.write() += 1;
                },
            }
        }
    }
}

#[component]
fn BookCareDialog(on_close: EventHandler<()>, on_booked: EventHandler<()>) -> Element {
    let api = use_api();
    let mut form = use_signal(BookCareForm::default);
    let mut submitting = use_signal(|| false);
    let mut error = use_signal(|| Option::<String>::None);

    let handle_book = move |evt: FormEvent| {
        evt.prevent_default();
        let api = api.clone();
        spawn(async move {
            error.set(None);
            let submitted = form.read().submit(now_local());
            let request = match submitted {
                Ok(request) => request,
                Err(e) => {
                    error.set(Some(e.to_string()));
                    return;
                }
            };

            submitting.set(true);
            match api.book_care(&request).await {
                Ok(_) => {
                    tracing::info!(care_type = %request.care_type, "care booked");
                    submitting.set(false);
                    on_booked.call(());
                }
                Err(e) => {
                    submitting.set(false);
                    error.set(Some(e.user_message("Failed to book appointment")));
                }
            }
        });
    };

    rsx! {
        Modal {
            title: "Book Preventive Care",
            on_close,

            if let Some(err) = error() {
                ErrorBanner { message: err, on_dismiss: move |_| error.set(None) }
            }

            form {
                class: "form",
                onsubmit: handle_book,
                div {
                    class: "field",
                    label { "Care Type" }
                    select {
                        value: form.read().care_type.clone(),
                        onchange: move |evt: FormEvent| form.write().care_type = evt.value(),
                        for (value, label) in CARE_TYPES {
                            option { key: "{value}", value: "{value}", "{label}" }
                        }
                    }
                }
                div {
                    class: "field",
                    label { "Date & Time" }
                    input {
                        r#type: "datetime-local",
                        required: true,
                        value: form.read().scheduled_at.clone(),
                        oninput: move |evt: FormEvent| form.write().scheduled_at = evt.value(),
                    }
                }
                div {
                    class: "field",
                    label { "Priority" }
                    select {
                        value: form.read().priority.as_str(),
                        onchange: move |evt: FormEvent| {
                            if let Some(priority) = Priority::from_form(&evt.value()) {
                                form.write().priority = priority;
                            }
                        },
                        for priority in Priority::ALL {
                            option { key: "{priority.as_str()}", value: priority.as_str(), "{priority.label()}" }
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
                        disabled: submitting() || !form.read().is_ready(),
                        if submitting() { "Booking..." } else { "Book" }
                    }
                }
            }
        }
    }
}

/// Missed checkups, each with a picker to move it to a new date.
#[component]
fn OverdueCare(items: Vec<store::PreventiveCare>, on_rescheduled: EventHandler<()>) -> Element {
    let api = use_api();
    let mut target = use_signal(|| Option::<String>::None);
    let mut scheduled_at = use_signal(String::new);
    let mut submitting = use_signal(|| false);
    let mut error = use_signal(|| Option::<String>::None);
    let offset = *now_local().offset();

    let handle_reschedule = move |evt: FormEvent| {
        evt.prevent_default();
        let Some(care_id) = target() else {
            return;
        };
        let api = api.clone();
        spawn(async move {
            error.set(None);
            let request = match reschedule(&care_id, &scheduled_at(), now_local()) {
                Ok(request) => request,
                Err(e) => {
                    error.set(Some(e.to_string()));
                    return;
                }
            };

            submitting.set(true);
            match api.reschedule_care(&request).await {
                Ok(_) => {
                    target.set(None);
                    on_rescheduled.call(());
                }
                Err(e) => error.set(Some(e.user_message("Failed to reschedule appointment"))),
            }
            submitting.set(false);
        });
    };

    rsx! {
        div {
            class: "card card--warning",
            h3 { "Overdue Checkups" }

            if let Some(err) = error() {
                ErrorBanner { message: err, on_dismiss: move |_| error.set(None) }
            }

            ul {
                class: "upcoming-care",
                for item in items.iter().cloned() {
                    li {
                        key: "{item.id}",
                        span { class: "upcoming-care-type", "{care_type_label(&item.care_type)}" }
                        span { class: "upcoming-care-date", "{format_date_time(&item.scheduled_date, &offset)}" }
                        {
                            let id = item.id.clone();
                            rsx! {
                                button {
                                    class: "button button--small",
                                    disabled: target().as_deref() == Some(item.id.as_str()),
                                    onclick: move |_| {
                                        scheduled_at.set(String::new());
                                        target.set(Some(id.clone()));
                                    },
                                    "Reschedule"
                                }
                            }
                        }
                    }
                }
            }

            if let Some(care) = target().and_then(|id| items.iter().find(|item| item.id == id).cloned()) {
                form {
                    class: "form field--inline",
                    onsubmit: handle_reschedule,
                    label { "New date for {care_type_label(&care.care_type)}" }
                    input {
                        r#type: "datetime-local",
                        required: true,
                        value: scheduled_at(),
                        oninput: move |evt: FormEvent| scheduled_at.set(evt.value()),
                    }
                    button {
                        class: "button button--small",
                        r#type: "submit",
                        disabled: submitting() || scheduled_at().trim().is_empty(),
                        "Save"
                    }
                    button {
                        class: "button button--small button--ghost",
                        r#type: "button",
                        onclick: move |_| target.set(None),
                        "Cancel"
                    }
                }
            }
        }
    }
}
