//! Change notifications by polling the row count.
//!
//! The REST surface has no push channel, so a background task samples the
//! exact count on an interval and reports any movement as a change.

use std::future::Future;
use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tracing::{debug, trace};

use innercircle_core::{ChangeCallback, ChangeEvent, TransientBackendError};

/// Turns successive count samples into change events.
#[derive(Debug, Default, Clone)]
pub struct ChangeDetector {
    last: Option<u64>,
}

impl ChangeDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a sample. The first sample only establishes a baseline.
    pub fn observe(&mut self, count: u64) -> Option<ChangeEvent> {
        let previous = self.last.replace(count)?;
        match count.cmp(&previous) {
            std::cmp::Ordering::Greater => Some(ChangeEvent::Insert),
            std::cmp::Ordering::Less => Some(ChangeEvent::Delete),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub fn last(&self) -> Option<u64> {
        self.last
    }
}

/// Sample `fetch` every `interval` and report changes to `on_change`.
///
/// Runs until the task is aborted. Failed samples are skipped and leave the
/// baseline untouched.
pub async fn poll_changes<F, Fut>(fetch: F, interval: Duration, on_change: ChangeCallback)
where
    F: Fn() -> Fut + Send,
    Fut: Future<Output = Result<u64, TransientBackendError>> + Send,
{
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut detector = ChangeDetector::new();

    loop {
        ticker.tick().await;
        match fetch().await {
            Ok(count) => {
                trace!(count, "Polled waitlist count");
                if let Some(event) = detector.observe(count) {
                    debug!(?event, count, "Waitlist change detected");
                    on_change(event);
                }
            }
            Err(e) => debug!(error = %e, "Change poll failed"),
        }
    }
}
