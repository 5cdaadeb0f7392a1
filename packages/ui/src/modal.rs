use dioxus::prelude::*;

/// A full-screen overlay that centers its children in a titled card.
/// Clicking outside the card or the close button triggers `on_close`.
#[component]
pub fn Modal(#[props(into)] title: String, on_close: EventHandler<()>, children: Element) -> Element {
    rsx! {
        div {
            class: "modal-overlay",
            onclick: move |_| on_close.call(()),
            div {
                class: "modal",
                onclick: move |evt: Event<MouseData>| evt.stop_propagation(),
                div {
                    class: "modal-header",
                    h3 { "{title}" }
                    button {
                        class: "banner-dismiss",
                        r#type: "button",
                        title: "Close",
                        onclick: move |_| on_close.call(()),
                        "×"
                    }
                }
                {children}
            }
        }
    }
}
