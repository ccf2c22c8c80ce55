//! UI components for the signup page.

mod app;
mod floating_label_input;
mod notice_toast;
mod share_button;
mod signup_counter;
mod signup_form;
mod success_card;
mod typewriter;

pub use app::App;
pub use floating_label_input::FloatingLabelInput;
pub use notice_toast::NoticeToast;
pub use share_button::ShareButton;
pub use signup_counter::SignupCounterBadge;
pub use signup_form::SignupFormCard;
pub use success_card::SuccessCard;
pub use typewriter::TypewriterTagline;
