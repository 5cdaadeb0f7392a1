use dioxus::prelude::*;

/// Red banner for a rejected request or an invalid form.
#[component]
pub fn ErrorBanner(message: String, on_dismiss: Option<EventHandler<()>>) -> Element {
    rsx! {
        Banner { class: "banner banner--error", message, on_dismiss }
    }
}

#[component]
pub fn SuccessBanner(message: String, on_dismiss: Option<EventHandler<()>>) -> Element {
    rsx! {
        Banner { class: "banner banner--success", message, on_dismiss }
    }
}

#[component]
fn Banner(class: String, message: String, on_dismiss: Option<EventHandler<()>>) -> Element {
    rsx! {
        div {
            class: "{class}",
            role: "alert",
            span { "{message}" }
            if let Some(on_dismiss) = on_dismiss {
                button {
                    class: "banner-dismiss",
                    r#type: "button",
                    title: "Dismiss",
                    onclick: move |_| on_dismiss.call(()),
                    "×"
                }
            }
        }
    }
}
