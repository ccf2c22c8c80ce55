//! Live "N people joined" line.

use dioxus::prelude::*;
use innercircle_core::{SignupCounter, joined_label};

use crate::state::AppContext;

#[component]
pub fn SignupCounterBadge() -> Element {
    let ctx = use_context::<AppContext>();
    let mut count = use_signal(|| None::<u64>);

    // The counter lives inside the future; unmounting drops it and releases
    // its change subscription.
    use_future(move || {
        let client = ctx.client();
        async move {
            let counter = SignupCounter::start(client);
            let mut latest = counter.watch();
            loop {
                let value = *latest.borrow_and_update();
                count.set(value);
                if latest.changed().await.is_err() {
                    break;
                }
            }
        }
    });

    rsx! {
        if let Some(n) = count() {
            p { class: "signup-count", "{joined_label(n)}" }
        }
    }
}
