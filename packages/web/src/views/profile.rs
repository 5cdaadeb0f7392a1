//! Profile editor. Patients also keep their allergies, medications and
//! emergency contact here; providers see their practice details.

use dioxus::prelude::*;
use store::forms::{add_tag, remove_tag, ProfileForm};
use store::User;
use ui::{use_api, use_auth, AuthState, ErrorBanner, Loading, Remote, SuccessBanner, TagInput};

#[component]
pub fn Profile() -> Element {
    let api = use_api();
    let mut auth = use_auth();
    let mut profile = use_signal(Remote::<User>::default);
    let mut form = use_signal(ProfileForm::default);
    let mut saving = use_signal(|| false);
    let mut error = use_signal(|| Option::<String>::None);
    let mut success = use_signal(|| Option::<String>::None);

    let loader_api = api.clone();
    let _loader = use_resource(move || {
        let api = loader_api.clone();
        async move {
            profile.write().begin();
            let result = api.profile().await;
            if let Ok(user) = &result {
                form.set(ProfileForm::from_user(user));
            }
            profile.write().finish(result, "Failed to load profile");
        }
    });

    let handle_save = move |evt: FormEvent| {
        evt.prevent_default();
        let api = api.clone();
        spawn(async move {
            error.set(None);
            success.set(None);
            let submitted = form.read().submit();
            let request = match submitted {
                Ok(request) => request,
                Err(e) => {
                    error.set(Some(e.to_string()));
                    return;
                }
            };

            saving.set(true);
            match api.update_profile(&request).await {
                Ok(response) => {
                    form.set(ProfileForm::from_user(&response.user));
                    profile.write().finish(Ok(response.user.clone()), "Failed to load profile");
                    auth.set(AuthState::signed_in(response.user));
                    success.set(Some("Profile updated successfully".to_string()));
                }
                Err(e) => error.set(Some(e.user_message("Failed to update profile"))),
            }
            saving.set(false);
        });
    };

    let state = profile.read().clone();
    if state.is_pending() {
        return rsx! {
            Loading { label: "Loading profile..." }
        };
    }
    let Some(user) = state.data().cloned() else {
        return rsx! {
            ErrorBanner { message: state.error().unwrap_or("Failed to load profile").to_string() }
        };
    };

    rsx! {
        div {
            class: "page",
            div {
                class: "page-header",
                h2 { "My Profile" }
                span { class: "muted", "{user.email}" }
            }

            if let Some(err) = error().or_else(|| state.error().map(str::to_string)) {
                ErrorBanner {
                    message: err,
                    on_dismiss: move |_| {
                        error.set(None);
                        profile.write().dismiss_error();
                    },
                }
            }
            if let Some(msg) = success() {
                SuccessBanner { message: msg, on_dismiss: move |_| success.set(None) }
            }

            form {
                class: "card form",
                onsubmit: handle_save,

                div {
                    class: "grid grid--halves",
                    div {
                        class: "field",
                        label { "First Name" }
                        input {
                            required: true,
                            value: form.read().first_name.clone(),
                            oninput: move |evt: FormEvent| form.write().first_name = evt.value(),
                        }
                    }
                    div {
                        class: "field",
                        label { "Last Name" }
                        input {
                            required: true,
                            value: form.read().last_name.clone(),
                            oninput: move |evt: FormEvent| form.write().last_name = evt.value(),
                        }
                    }
                }
                div {
                    class: "field",
                    label { "Phone" }
                    input {
                        r#type: "tel",
                        value: form.read().phone.clone(),
                        oninput: move |evt: FormEvent| form.write().phone = evt.value(),
                    }
                }

                if user.is_patient() {
                    h3 { "Medical Information" }
                    TagInput {
                        label: "Allergies",
                        placeholder: "Add an allergy",
                        tags: form.read().allergies.clone(),
                        on_add: move |value: String| {
                            add_tag(&mut form.write().allergies, &value);
                        },
                        on_remove: move |value: String| remove_tag(&mut form.write().allergies, &value),
                    }
                    TagInput {
                        label: "Medications",
                        placeholder: "Add a medication",
                        tags: form.read().medications.clone(),
                        on_add: move |value: String| {
                            add_tag(&mut form.write().medications, &value);
                        },
                        on_remove: move |value: String| remove_tag(&mut form.write().medications, &value),
                    }

                    h3 { "Emergency Contact" }
                    div {
                        class: "grid grid--halves",
                        div {
                            class: "field",
                            label { "Name" }
                            input {
                                value: form.read().emergency_contact.name.clone(),
                                oninput: move |evt: FormEvent| form.write().emergency_contact.name = evt.value(),
                            }
                        }
                        div {
                            class: "field",
                            label { "Phone" }
                            input {
                                r#type: "tel",
                                value: form.read().emergency_contact.phone.clone(),
                                oninput: move |evt: FormEvent| form.write().emergency_contact.phone = evt.value(),
                            }
                        }
                    }
                }

                if let Some(info) = user.provider_info.clone() {
                    h3 { "Practice" }
                    dl {
                        class: "details",
                        dt { "License Number" }
                        dd { "{info.license_number}" }
                        dt { "Specialization" }
                        dd { "{info.specialization}" }
                        dt { "Patients" }
                        dd { "{info.patients.len()}" }
                    }
                }

                div {
                    class: "button-row",
                    button {
                        class: "button",
                        r#type: "submit",
                        disabled: saving(),
                        if saving() { "Saving..." } else { "Save Profile" }
                    }
                }
            }
        }
    }
}
