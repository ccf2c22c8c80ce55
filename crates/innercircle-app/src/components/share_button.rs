//! One share button on the success card.

use dioxus::prelude::*;
use innercircle_core::{Notice, ShareAction, SharePlatform, SignupError, SignupFlow};

use crate::effects;
use crate::state::AppContext;

#[component]
pub fn ShareButton(platform: SharePlatform, code: String, flow: Signal<SignupFlow>) -> Element {
    let ctx = use_context::<AppContext>();
    let action = ctx.share.action(platform, &code);
    let slug = match platform {
        SharePlatform::WhatsApp => "whatsapp",
        SharePlatform::X => "x",
        SharePlatform::Copy => "copy",
    };

    rsx! {
        button {
            class: "btn-share btn-share-{slug}",
            r#type: "button",
            onclick: move |_| run_share(flow, &action),
            "{platform.label()}"
        }
    }
}

/// Perform a share action and report the outcome as a notice.
pub(crate) fn run_share(mut flow: Signal<SignupFlow>, action: &ShareAction) {
    match effects::perform(action) {
        Ok(Some(notice)) => flow.write().notify(notice),
        Ok(None) => {}
        Err(e) => {
            tracing::warn!(error = %e, "Share action failed");
            let message = SignupError::Unexpected(e.to_string()).user_message();
            flow.write().notify(Notice::error(message));
        }
    }
}
