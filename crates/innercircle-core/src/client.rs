//! The waitlist backend seam.
//!
//! Everything the application needs from the managed backend goes through
//! [`WaitlistClient`]. Implementations are injected as `Arc<dyn WaitlistClient>`
//! so tests can substitute [`crate::InMemoryWaitlist`].

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::entry::{NewEntry, ReferralCode, Referrer};
use crate::error::{InsertError, TransientBackendError};

/// Kind of row change reported by a subscription.
///
/// Entries are never edited after insert, so there is no update event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeEvent {
    Insert,
    Delete,
}

/// Callback invoked on every change notification.
pub type ChangeCallback = Arc<dyn Fn(ChangeEvent) + Send + Sync>;

/// Access to the waitlist collection on the backend.
#[async_trait]
pub trait WaitlistClient: Send + Sync {
    /// Find the entry owning `code`.
    ///
    /// Returns `Ok(None)` when no entry matches; that is not an error.
    async fn lookup_by_referral_code(
        &self,
        code: &ReferralCode,
    ) -> Result<Option<Referrer>, TransientBackendError>;

    /// Whether an entry with this (already normalised) email exists.
    async fn email_exists(&self, email: &str) -> Result<bool, TransientBackendError>;

    /// Ask the backend for a fresh, unique referral code.
    async fn generate_referral_code(&self) -> Result<ReferralCode, TransientBackendError>;

    /// Insert a new entry.
    ///
    /// # Errors
    ///
    /// Returns [`InsertError::DuplicateEmail`] when the backend rejects the
    /// email as already registered, [`InsertError::Transient`] otherwise.
    async fn insert_entry(&self, entry: &NewEntry) -> Result<(), InsertError>;

    /// Total number of entries.
    async fn count_entries(&self) -> Result<u64, TransientBackendError>;

    /// Invoke `on_change` whenever entries are added or removed.
    ///
    /// Backends that only observe the row count (the REST poller) may miss
    /// changes that cancel out within one interval.
    ///
    /// Must be called from within a tokio runtime. The listener runs until
    /// the returned [`Subscription`] is closed or dropped.
    fn subscribe_to_changes(&self, on_change: ChangeCallback) -> Subscription;
}

/// Handle for a live change subscription.
///
/// Dropping the handle releases the listener, so a view that owns one cannot
/// leak it across remounts.
pub struct Subscription {
    channel: String,
    task: Option<JoinHandle<()>>,
}

impl Subscription {
    /// Wrap the background task that delivers notifications for `channel`.
    pub fn new(channel: impl Into<String>, task: JoinHandle<()>) -> Self {
        Self {
            channel: channel.into(),
            task: Some(task),
        }
    }

    /// Name of the collection this subscription listens to.
    pub fn channel(&self) -> &str {
        &self.channel
    }

    /// Whether the listener is still running.
    pub fn is_active(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Release the listener.
    pub fn close(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            debug!(channel = %self.channel, "Change subscription released");
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("channel", &self.channel)
            .field("active", &self.is_active())
            .finish()
    }
}
