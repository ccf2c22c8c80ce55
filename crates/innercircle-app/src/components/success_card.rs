//! Confirmation card shown once the signup is saved.

use dioxus::prelude::*;
use innercircle_core::{ShareAction, SharePlatform, SignupFlow, SubmittedSignup};

use crate::state::AppContext;

use super::share_button::{ShareButton, run_share};

#[component]
pub fn SuccessCard(mut flow: Signal<SignupFlow>, signup: SubmittedSignup) -> Element {
    let ctx = use_context::<AppContext>();
    let code = signup.referral_code.to_string();
    let copy_action = ShareAction::CopyToClipboard(ctx.share.message(&code));

    rsx! {
        section {
            class: "success-card",

            h3 {
                class: "success-title",
                "done! you're now on the list. the more friends you invite, the sooner you'll enter innercircle."
            }

            if let Some(name) = &signup.referrer_name {
                p { class: "success-referrer", "invited by {name}" }
            }

            div {
                class: "code-row",

                div {
                    class: "code-box",
                    p { class: "code-label", "your referral code" }
                    p { class: "code-value", "{code}" }
                }

                button {
                    class: "btn-icon",
                    r#type: "button",
                    title: "copy share message",
                    onclick: move |_| run_share(flow, &copy_action),
                    "⧉"
                }
            }

            div {
                class: "share-buttons",
                for platform in SharePlatform::all().iter().copied() {
                    ShareButton {
                        key: "{platform.label()}",
                        platform,
                        code: code.clone(),
                        flow,
                    }
                }
            }
        }

        div {
            class: "success-actions",
            button {
                class: "btn-ghost",
                r#type: "button",
                title: "back to start",
                onclick: move |_| {
                    flow.write().reset();
                },
                "⌂"
            }
        }
    }
}
