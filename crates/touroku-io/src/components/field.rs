//! Shared form-field render helpers.
//!
//! Inline error text renders directly beneath the offending control;
//! an empty error means the field is currently valid.

use dioxus::prelude::*;

/// Render a labeled text input with an optional inline error.
pub fn render_text_field(
    id: &str,
    label: &str,
    input_type: &str,
    placeholder: &str,
    value: &str,
    error: Option<&str>,
    mut on_input: impl FnMut(String) + 'static,
) -> Element {
    let id = id.to_string();
    let label = label.to_string();
    let input_type = input_type.to_string();
    let placeholder = placeholder.to_string();
    let value = value.to_string();
    let error = error.map(str::to_owned);

    rsx! {
        div { class: "flex flex-col gap-1",
            label { r#for: "{id}",
                class: "text-sm text-[var(--text-heading)] font-medium",
                "{label}"
            }
            input {
                r#type: "{input_type}",
                id: "{id}",
                placeholder: "{placeholder}",
                value: "{value}",
                class: "px-4 py-3 rounded border border-[var(--border)] bg-[var(--surface)] text-[var(--text)]",
                oninput: move |e| on_input(e.value()),
            }
            {render_error(error.as_deref())}
        }
    }
}

/// Render a labeled select with a placeholder option and an optional
/// inline error. The empty string value means "nothing selected".
pub fn render_select(
    id: &str,
    label: &str,
    placeholder: &str,
    options: &[(String, String)],
    selected: &str,
    error: Option<&str>,
    mut on_change: impl FnMut(String) + 'static,
) -> Element {
    let id = id.to_string();
    let label = label.to_string();
    let placeholder = placeholder.to_string();
    let options = options.to_vec();
    let selected = selected.to_string();
    let error = error.map(str::to_owned);

    rsx! {
        div { class: "flex flex-col gap-1",
            label { r#for: "{id}",
                class: "text-sm text-[var(--text-heading)] font-medium",
                "{label}"
            }
            select {
                id: "{id}",
                value: "{selected}",
                class: "px-4 py-3 rounded border border-[var(--border)] bg-[var(--surface)] text-[var(--text)]",
                onchange: move |e| on_change(e.value()),
                option { value: "", selected: selected.is_empty(), "{placeholder}" }
                for (value, text) in options {
                    option {
                        key: "{value}",
                        value: "{value}",
                        selected: value == selected,
                        "{text}"
                    }
                }
            }
            {render_error(error.as_deref())}
        }
    }
}

/// Render a checkbox with trailing label text and an optional inline
/// error.
pub fn render_checkbox(
    id: &str,
    text: &str,
    checked: bool,
    error: Option<&str>,
    mut on_change: impl FnMut(bool) + 'static,
) -> Element {
    let id = id.to_string();
    let text = text.to_string();
    let error = error.map(str::to_owned);

    rsx! {
        div { class: "flex flex-col gap-1",
            label { r#for: "{id}", class: "flex items-start gap-3 cursor-pointer",
                input {
                    r#type: "checkbox",
                    id: "{id}",
                    checked: checked,
                    class: "w-5 h-5 mt-0.5 accent-[var(--btn-primary)]",
                    onchange: move |e| on_change(e.checked()),
                }
                span { class: "text-sm text-[var(--text-secondary)]", "{text}" }
            }
            {render_error(error.as_deref())}
        }
    }
}

/// Render an inline field error, or nothing when valid.
pub fn render_error(error: Option<&str>) -> Element {
    match error {
        Some(message) => {
            let message = message.to_string();
            rsx! {
                p { class: "text-sm text-[var(--text-error)]", "{message}" }
            }
        }
        None => rsx! {},
    }
}
