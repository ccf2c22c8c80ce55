//! Text input with a label that floats above the value.

use dioxus::prelude::*;
use innercircle_core::FloatingLabel;

/// Input whose label rests in the placeholder slot until the field is
/// focused or holds a value.
///
/// The value is owned by the caller; every attribute and event is passed
/// through unchanged.
#[component]
pub fn FloatingLabelInput(
    name: &'static str,
    label: &'static str,
    value: String,
    oninput: EventHandler<String>,
    #[props(default = "text")] input_type: &'static str,
    #[props(default = "off")] autocomplete: &'static str,
    #[props(default)] required: bool,
    #[props(default)] disabled: bool,
    onfocus: Option<EventHandler<FocusEvent>>,
    onblur: Option<EventHandler<FocusEvent>>,
) -> Element {
    let mut state = use_signal(|| FloatingLabel::for_value(&value));

    // The caller may clear the value (e.g. on reset), so the rendered
    // placement always reflects the current prop.
    let mut shown = *state.read();
    shown.input(&value);
    let position = shown.position();

    let blurred_value = value.clone();

    rsx! {
        div {
            class: "floating-field",

            input {
                id: "field-{name}",
                class: "floating-input",
                name,
                r#type: input_type,
                autocomplete,
                required,
                disabled,
                value: "{value}",
                oninput: move |evt: FormEvent| {
                    let value = evt.value();
                    state.write().input(&value);
                    oninput.call(value);
                },
                onfocus: move |evt: FocusEvent| {
                    state.write().focus();
                    if let Some(handler) = onfocus {
                        handler.call(evt);
                    }
                },
                onblur: move |evt: FocusEvent| {
                    state.write().blur(&blurred_value);
                    if let Some(handler) = onblur {
                        handler.call(evt);
                    }
                },
            }

            label {
                r#for: "field-{name}",
                class: "floating-label {position.css_class()}",
                "{label}"
            }
        }
    }
}
