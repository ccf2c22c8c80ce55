//! Live total signup count.
//!
//! [`SignupCounter`] queries the count once, then re-queries whenever the
//! backend reports a change. Notifications only ever trigger a re-query;
//! bursts of changes collapse into one query.

use std::sync::Arc;

use tokio::sync::{Notify, watch};
use tokio::task::JoinHandle;
use tracing::{debug, trace, warn};

use crate::client::{Subscription, WaitlistClient};

/// Keeps the latest total signup count up to date.
///
/// Dropping the counter releases its change subscription.
pub struct SignupCounter {
    latest: watch::Receiver<Option<u64>>,
    refresh_task: JoinHandle<()>,
    _subscription: Subscription,
}

impl SignupCounter {
    /// Subscribe to changes and start counting.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(client: Arc<dyn WaitlistClient>) -> Self {
        let (tx, latest) = watch::channel(None);
        let dirty = Arc::new(Notify::new());

        let subscription = {
            let dirty = dirty.clone();
            client.subscribe_to_changes(Arc::new(move |event| {
                trace!(?event, "Waitlist changed");
                dirty.notify_one();
            }))
        };

        let refresh_task = tokio::spawn(async move {
            loop {
                match client.count_entries().await {
                    Ok(count) => {
                        debug!(count, "Signup count refreshed");
                        tx.send_replace(Some(count));
                    }
                    Err(e) => warn!(error = %e, "Signup count query failed"),
                }
                dirty.notified().await;
            }
        });

        Self {
            latest,
            refresh_task,
            _subscription: subscription,
        }
    }

    /// The most recent count, once the first query has completed.
    pub fn latest(&self) -> Option<u64> {
        *self.latest.borrow()
    }

    /// A receiver that observes every published count.
    pub fn watch(&self) -> watch::Receiver<Option<u64>> {
        self.latest.clone()
    }
}

impl Drop for SignupCounter {
    fn drop(&mut self) {
        self.refresh_task.abort();
    }
}

/// Text for the public "N people joined" line.
pub fn joined_label(count: u64) -> String {
    match count {
        1 => "1 person joined".to_string(),
        n => format!("{n} people joined"),
    }
}
