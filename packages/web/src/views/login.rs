//! Login page view.

use dioxus::prelude::*;
use store::forms::LoginForm;
use ui::{use_api, use_auth, AuthState, ErrorBanner};

use crate::Route;

#[component]
pub fn Login() -> Element {
    let mut auth = use_auth();
    let api = use_api();
    let nav = use_navigator();
    let mut form = use_signal(LoginForm::default);
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    let handle_login = move |evt: FormEvent| {
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
            match api.login(&request).await {
                Ok(response) => {
                    auth.set(AuthState::signed_in(response.user));
                    nav.replace(Route::Dashboard {});
                }
                Err(e) => {
                    loading.set(false);
                    error.set(Some(e.user_message("Login failed")));
                }
            }
        });
    };

    rsx! {
        div {
            class: "auth-page",
            div {
                class: "card auth-card",
                h2 { "Login" }

                if let Some(err) = error() {
                    ErrorBanner { message: err, on_dismiss: move |_| error.set(None) }
                }

                form {
                    class: "form",
                    onsubmit: handle_login,

                    div {
                        class: "field",
                        label { "Email" }
                        input {
                            r#type: "email",
                            required: true,
                            value: form.read().email.clone(),
                            oninput: move |evt: FormEvent| form.write().email = evt.value(),
                        }
                    }
                    div {
                        class: "field",
                        label { "Password" }
                        input {
                            r#type: "password",
                            required: true,
                            value: form.read().password.clone(),
                            oninput: move |evt: FormEvent| form.write().password = evt.value(),
                        }
                    }

                    button {
                        class: "button",
                        r#type: "submit",
                        disabled: loading(),
                        if loading() { "Logging in..." } else { "Login" }
                    }
                }

                p {
                    class: "muted",
                    "Don't have an account? "
                    Link { to: Route::Register {}, "Register here" }
                }
            }
        }
    }
}
