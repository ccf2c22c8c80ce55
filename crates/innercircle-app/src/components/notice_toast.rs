//! Transient notice shown over the page.

use dioxus::prelude::*;
use innercircle_core::{NoticeKind, SignupFlow};

use crate::state::NOTICE_TIMEOUT;

#[component]
pub fn NoticeToast(mut flow: Signal<SignupFlow>) -> Element {
    let notice = flow.read().notice().cloned();

    // One timer per shown notice, keyed by id rather than text.
    let notice_id = use_memo(move || flow.read().notice_id());
    use_effect(move || {
        let id = notice_id();
        if flow.peek().notice().is_none() {
            return;
        }
        spawn(async move {
            tokio::time::sleep(NOTICE_TIMEOUT).await;
            if flow.peek().notice_id() == id {
                flow.write().expire_notice(id);
            }
        });
    });

    let Some(notice) = notice else {
        return rsx! {};
    };
    let kind = match notice.kind {
        NoticeKind::Info => "toast-info",
        NoticeKind::Error => "toast-error",
    };

    rsx! {
        div {
            class: "toast {kind}",
            role: "status",
            onclick: move |_| flow.write().dismiss_notice(),
            "{notice.message}"
        }
    }
}
