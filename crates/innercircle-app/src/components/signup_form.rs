//! The waitlist signup form.

use dioxus::prelude::*;
use innercircle_core::SignupFlow;

use crate::state::{AppContext, FormField};

use super::floating_label_input::FloatingLabelInput;

#[component]
pub fn SignupFormCard(mut flow: Signal<SignupFlow>) -> Element {
    let ctx = use_context::<AppContext>();
    let submitting = flow.read().is_submitting();

    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        // Ignored while a submission is in flight or fields are missing.
        let Some(form) = flow.write().begin_submit() else {
            return;
        };
        let controller = ctx.controller.clone();
        spawn(async move {
            let result = controller.submit(&form).await;
            flow.write().finish(result);
        });
    };

    rsx! {
        form {
            class: "signup-form",
            novalidate: true,
            onsubmit: on_submit,

            for field in FormField::ALL {
                FloatingLabelInput {
                    key: "{field.name()}",
                    name: field.name(),
                    label: field.label(),
                    input_type: field.input_type(),
                    autocomplete: field.autocomplete(),
                    required: field.required(),
                    disabled: submitting,
                    value: field.value(flow.read().form()).to_string(),
                    oninput: move |value: String| field.set(flow.write().form_mut(), value),
                }
            }

            button {
                class: "btn-primary",
                r#type: "submit",
                disabled: submitting,
                if submitting {
                    "securing your spot..."
                } else {
                    "get early access to innercircle"
                }
            }
        }
    }
}
