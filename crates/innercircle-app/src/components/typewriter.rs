//! Animated tagline under the brand.

use dioxus::prelude::*;
use innercircle_core::Typewriter;

#[component]
pub fn TypewriterTagline() -> Element {
    let mut text = use_signal(String::new);

    // Dropped with the component, which stops the animation.
    use_future(move || async move {
        for frame in Typewriter::default() {
            text.set(frame.text);
            tokio::time::sleep(frame.delay).await;
        }
    });

    rsx! {
        p {
            class: "tagline",
            "{text}"
            span { class: "tagline-cursor", "|" }
        }
    }
}
