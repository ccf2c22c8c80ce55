//! Root application component.

use dioxus::prelude::*;
use innercircle_core::SignupFlow;

use crate::state::AppContext;

use super::notice_toast::NoticeToast;
use super::signup_counter::SignupCounterBadge;
use super::signup_form::SignupFormCard;
use super::success_card::SuccessCard;
use super::typewriter::TypewriterTagline;

/// Root application component.
///
/// Expects an [`AppContext`] in the root context.
#[component]
pub fn App() -> Element {
    let ctx = use_context::<AppContext>();
    let flow: Signal<SignupFlow> = use_signal(move || ctx.initial_flow());
    let submitted = flow.read().submitted().cloned();

    rsx! {
        div {
            class: "themed-root",
            "data-theme": "midnight",

            main {
                class: "page",

                div {
                    class: "column",

                    header {
                        class: "hero",
                        h1 { class: "brand", "innercircle" }
                        TypewriterTagline {}
                        SignupCounterBadge {}
                    }

                    if let Some(signup) = submitted {
                        SuccessCard { flow, signup }
                    } else {
                        SignupFormCard { flow }
                    }
                }

                NoticeToast { flow }
            }
        }
    }
}
