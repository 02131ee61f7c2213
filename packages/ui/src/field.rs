//! Labelled input with an inline error line.

use std::collections::BTreeSet;

use api::FieldErrors;
use dioxus::prelude::*;

/// Fields the user has edited. Errors are shown only for these, until a
/// submit attempt marks every field.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Touched(BTreeSet<&'static str>);

impl Touched {
    pub fn mark(&mut self, field: &'static str) {
        self.0.insert(field);
    }

    pub fn mark_all(&mut self, fields: &[&'static str]) {
        self.0.extend(fields.iter().copied());
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// The message to show under `field`, if any.
    pub fn visible_error(&self, errors: &FieldErrors, field: &str) -> Option<String> {
        if !self.0.contains(field) {
            return None;
        }
        errors.first(field).map(str::to_string)
    }
}

#[component]
pub fn TextField(
    label: String,
    name: String,
    value: String,
    #[props(default = "text".to_string())] kind: String,
    error: Option<String>,
    oninput: EventHandler<String>,
    #[props(default)] onblur: EventHandler<()>,
    #[props(default)] multiline: bool,
) -> Element {
    let class = if error.is_some() {
        "field-input field-input-invalid"
    } else {
        "field-input"
    };

    rsx! {
        div {
            class: "field",
            label { r#for: "{name}", "{label}" }
            if multiline {
                textarea {
                    id: "{name}",
                    class,
                    value: "{value}",
                    oninput: move |evt| oninput.call(evt.value()),
                    onblur: move |_| onblur.call(()),
                }
            } else {
                input {
                    id: "{name}",
                    class,
                    r#type: "{kind}",
                    value: "{value}",
                    oninput: move |evt| oninput.call(evt.value()),
                    onblur: move |_| onblur.call(()),
                }
            }
            if let Some(error) = error {
                p { class: "field-error", "{error}" }
            }
        }
    }
}
