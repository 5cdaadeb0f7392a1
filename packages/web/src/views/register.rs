//! Register page view.

use dioxus::prelude::*;
use store::forms::RegisterForm;
use store::Role;
use ui::{use_api, use_auth, AuthState, ErrorBanner};

use crate::Route;

#[component]
pub fn Register() -> Element {
    let mut auth = use_auth();
    let api = use_api();
    let nav = use_navigator();
    let mut form = use_signal(RegisterForm::default);
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    let handle_register = move |evt: FormEvent| {
        evt.prevent_default();
        let api = api.clone();
        spawn(async move {
            error.set(None);

            let submitted = form.read().submit();
            let request = match submitted {
                Ok(request) => request,
                Err(e) => {
                    error.set(Some(e.to_string()));
                    return;
                }
            };

            loading.set(true);
            match api.register(&request).await {
                Ok(response) => {
                    auth.set(AuthState::signed_in(response.user));
                    nav.replace(Route::Dashboard {});
                }
                Err(e) => {
                    loading.set(false);
                    error.set(Some(e.user_message("Registration failed")));
                }
            }
        });
    };

    let current = form.read().clone();

    rsx! {
        div {
            class: "auth-page",
            div {
                class: "card auth-card",
                h2 { "Create Account" }

                if let Some(err) = error() {
                    ErrorBanner { message: err, on_dismiss: move |_| error.set(None) }
                }

                form {
                    class: "form",
                    onsubmit: handle_register,

                    div {
                        class: "field",
                        label { "First name" }
                        input {
                            r#type: "text",
                            required: true,
                            value: current.first_name,
                            oninput: move |evt: FormEvent| form.write().first_name = evt.value(),
                        }
                    }
                    div {
                        class: "field",
                        label { "Last name" }
                        input {
                            r#type: "text",
                            required: true,
                            value: current.last_name,
                            oninput: move |evt: FormEvent| form.write().last_name = evt.value(),
                        }
                    }
                    div {
                        class: "field",
                        label { "Email" }
                        input {
                            r#type: "email",
                            required: true,
                            value: current.email,
                            oninput: move |evt: FormEvent| form.write().email = evt.value(),
                        }
                    }
                    div {
                        class: "field",
                        label { "Password" }
                        input {
                            r#type: "password",
                            required: true,
                            value: current.password,
                            oninput: move |evt: FormEvent| form.write().password = evt.value(),
                        }
                    }
                    div {
                        class: "field",
                        label { "Role" }
                        select {
                            value: current.role.as_str(),
                            onchange: move |evt: FormEvent| {
                                if let Some(role) = Role::from_form(&evt.value()) {
                                    form.write().role = role;
                                }
                            },
                            option { value: "patient", "Patient" }
                            option { value: "provider", "Healthcare Provider" }
                        }
                    }
                    div {
                        class: "field",
                        label { "Date of birth" }
                        input {
                            r#type: "date",
                            required: true,
                            value: current.date_of_birth,
                            oninput: move |evt: FormEvent| form.write().date_of_birth = evt.value(),
                        }
                    }
                    div {
                        class: "field",
                        label { "Phone" }
                        input {
                            r#type: "tel",
                            required: true,
                            value: current.phone,
                            oninput: move |evt: FormEvent| form.write().phone = evt.value(),
                        }
                    }
                    label {
                        class: "field field--inline",
                        input {
                            r#type: "checkbox",
                            checked: current.consent_given,
                            onchange: move |evt: FormEvent| form.write().consent_given = evt.checked(),
                        }
                        "I consent to the processing of my health data"
                    }

                    button {
                        class: "button",
                        r#type: "submit",
                        disabled: loading(),
                        if loading() { "Creating account..." } else { "Register" }
                    }
                }

                p {
                    class: "muted",
                    "Already have an account? "
                    Link { to: Route::Login {}, "Login here" }
                }
            }
        }
    }
}
