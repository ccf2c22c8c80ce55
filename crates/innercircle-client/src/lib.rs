//! REST backend client for the innercircle waitlist.
//!
//! [`RestWaitlist`] implements [`innercircle_core::WaitlistClient`] against a
//! PostgREST-style API: table rows under `/rest/v1/{table}` and stored
//! procedures under `/rest/v1/rpc/{name}`. Change notifications come from a
//! background poller that compares the exact row count.
//!
//! # Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use innercircle_client::{BackendConfig, RestWaitlist};
//! use innercircle_core::SignupController;
//!
//! let config = BackendConfig::from_env()?;
//! let client = Arc::new(RestWaitlist::new(config)?);
//! let controller = SignupController::new(client);
//! ```

pub mod config;
pub mod poller;
pub mod rest;

pub use config::{BackendConfig, ConfigError};
pub use poller::ChangeDetector;
pub use rest::RestWaitlist;
