//! # innercircle core
//!
//! Domain types and the signup workflow for the innercircle waitlist.
//!
//! The backend is reached only through the [`WaitlistClient`] trait, so the
//! workflow can run against the REST backend in production and against
//! [`InMemoryWaitlist`] in tests and demo mode.
//!
//! ## Features
//!
//! - **WaitlistClient trait**: referral lookup, email lookup, code generation,
//!   insert, count, and change subscriptions
//! - **SignupController**: the ordered submit sequence with error mapping
//! - **SignupFlow**: the `Editing → Submitting → Submitted` state machine
//! - **SignupCounter**: live total signup count driven by change notifications
//! - **ShareFormatter**: invitation message and per-platform share actions
//! - **Typewriter**: frame iterator for the animated tagline
//! - **FloatingLabel**: placement rule for floating input labels
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use innercircle_core::{InMemoryWaitlist, SignupController, SignupForm};
//!
//! #[tokio::main]
//! async fn main() {
//!     let client = Arc::new(InMemoryWaitlist::new());
//!     let controller = SignupController::new(client);
//!
//!     let form = SignupForm::new("Ada Lovelace", "ada@example.com", "London");
//!     let signup = controller.submit(&form).await.unwrap();
//!     println!("your referral code: {}", signup.referral_code);
//! }
//! ```

pub mod client;
pub mod counter;
pub mod entry;
pub mod error;
pub mod field;
pub mod memory;
pub mod share;
pub mod signup;
pub mod tagline;

pub use client::{ChangeCallback, ChangeEvent, Subscription, WaitlistClient};
pub use counter::{SignupCounter, joined_label};
pub use entry::{NewEntry, ReferralCode, Referrer, SignupForm, WaitlistEntry};
pub use error::{InsertError, SignupError, TransientBackendError};
pub use field::{FloatingLabel, LabelPosition};
pub use memory::{InMemoryWaitlist, WaitlistOp};
pub use share::{DEFAULT_SHARE_SITE, ShareAction, ShareFormatter, SharePlatform};
pub use signup::{
    DuplicateEmailCheck, Notice, NoticeKind, SignupController, SignupFlow, SignupPhase,
    SignupPolicy, SubmittedSignup,
};
pub use tagline::{TAGLINES, Typewriter, TypewriterFrame, TypewriterTiming};
