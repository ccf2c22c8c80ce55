//! innercircle waitlist desktop app.
//!
//! Components, view state, and side effects for the signup page. The binary
//! in `main.rs` wires these to a backend chosen on the command line.

pub mod cli;
pub mod components;
pub mod effects;
pub mod referral;
pub mod settings;
pub mod state;

/// Page styles, injected into the window head.
pub const STYLES_CSS: &str = include_str!("../assets/styles.css");
