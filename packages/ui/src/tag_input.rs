use dioxus::prelude::*;

/// Editable list of short strings (allergies, medications).
///
/// Enter or the add button submits the draft; the parent decides whether it is kept.
#[component]
pub fn TagInput(
    #[props(into)] label: String,
    #[props(into)] placeholder: String,
    tags: Vec<String>,
    on_add: EventHandler<String>,
    on_remove: EventHandler<String>,
) -> Element {
    let mut draft = use_signal(String::new);

    let mut submit = move || {
        let value = draft();
        if !value.trim().is_empty() {
            on_add.call(value);
        }
        draft.set(String::new());
    };

    rsx! {
        div {
            class: "field",
            label { "{label}" }
            div {
                class: "tag-input",
                input {
                    r#type: "text",
                    placeholder: "{placeholder}",
                    value: draft(),
                    oninput: move |evt: FormEvent| draft.set(evt.value()),
                    onkeydown: move |evt: KeyboardEvent| {
                        if evt.key() == Key::Enter {
                            evt.prevent_default();
                            submit();
                        }
                    },
                }
                button {
                    class: "button button--small",
                    r#type: "button",
                    onclick: move |_| submit(),
                    "Add"
                }
            }
            div {
                class: "tags",
                for tag in tags.iter() {
                    {
                        let value = tag.clone();
                        rsx! {
                            span {
                                key: "{tag}",
                                class: "tag",
                                "{tag}"
                                button {
                                    class: "tag-remove",
                                    r#type: "button",
                                    title: "Remove",
                                    onclick: move |_| on_remove.call(value.clone()),
                                    "×"
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
