//! In-memory waitlist backend
//!
//! Implements [`WaitlistClient`] without a network, enforcing the same
//! contract the managed backend does: unique emails, unique referral codes,
//! and change notifications on every insert. Used by tests and `--demo` mode.

use std::collections::HashSet;

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use parking_lot::Mutex;
use rand::Rng;
use tokio::sync::broadcast;
use tracing::{debug, trace};

use crate::client::{ChangeCallback, ChangeEvent, Subscription, WaitlistClient};
use crate::entry::{NewEntry, ReferralCode, Referrer, WaitlistEntry};
use crate::error::{InsertError, TransientBackendError};

/// Characters used for generated codes (no 0/O or 1/I ambiguity).
const CODE_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

/// Length of generated referral codes.
const CODE_LEN: usize = 8;

/// Capacity of the change broadcast channel.
const CHANGE_CHANNEL_CAPACITY: usize = 256;

/// Backend operations that can be made to fail on purpose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WaitlistOp {
    LookupReferral,
    EmailExists,
    GenerateCode,
    Insert,
    Count,
}

/// In-memory implementation of WaitlistClient
///
/// Entries are keyed by normalised email so the uniqueness check and the
/// insert happen atomically through the `DashMap` entry API.
#[derive(Debug)]
pub struct InMemoryWaitlist {
    /// Entries keyed by email
    entries: DashMap<String, WaitlistEntry>,
    /// Referral code -> owner's full name
    codes: DashMap<ReferralCode, String>,
    /// Change notification sender
    change_tx: broadcast::Sender<ChangeEvent>,
    /// Operations that currently fail with a transient error
    failing: Mutex<HashSet<WaitlistOp>>,
}

impl Default for InMemoryWaitlist {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryWaitlist {
    /// Create an empty waitlist
    pub fn new() -> Self {
        let (change_tx, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Self {
            entries: DashMap::new(),
            codes: DashMap::new(),
            change_tx,
            failing: Mutex::new(HashSet::new()),
        }
    }

    /// Insert an entry directly, bypassing code generation.
    ///
    /// Fields are stored as given. Fires an insert notification like any
    /// other insert.
    pub fn seed(&self, full_name: &str, email: &str, city: &str, code: &str) {
        let entry = WaitlistEntry {
            full_name: full_name.to_string(),
            email: email.to_string(),
            city: city.to_string(),
            referral_code: ReferralCode::new(code),
            referred_by: None,
        };
        self.codes
            .insert(entry.referral_code.clone(), entry.full_name.clone());
        self.entries.insert(entry.email.clone(), entry);
        self.notify(ChangeEvent::Insert);
    }

    /// Make `op` fail with a transient error until [`Self::recover`] is called.
    pub fn fail_on(&self, op: WaitlistOp) {
        self.failing.lock().insert(op);
    }

    /// Stop failing `op`.
    pub fn recover(&self, op: WaitlistOp) {
        self.failing.lock().remove(&op);
    }

    /// Number of stored entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the waitlist is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a stored entry by (normalised) email.
    pub fn entry_by_email(&self, email: &str) -> Option<WaitlistEntry> {
        self.entries.get(email).map(|e| e.value().clone())
    }

    /// Snapshot of all stored entries.
    pub fn entries(&self) -> Vec<WaitlistEntry> {
        self.entries.iter().map(|e| e.value().clone()).collect()
    }

    fn check(&self, op: WaitlistOp) -> Result<(), TransientBackendError> {
        if self.failing.lock().contains(&op) {
            return Err(TransientBackendError::new(format!("injected failure for {op:?}")));
        }
        Ok(())
    }

    fn notify(&self, event: ChangeEvent) {
        // No receivers is fine: nobody is subscribed yet.
        let _ = self.change_tx.send(event);
    }

    fn random_code() -> ReferralCode {
        let mut rng = rand::rng();
        let code: String = (0..CODE_LEN)
            .map(|_| CODE_ALPHABET[rng.random_range(0..CODE_ALPHABET.len())] as char)
            .collect();
        ReferralCode::new(code)
    }
}

#[async_trait]
impl WaitlistClient for InMemoryWaitlist {
    async fn lookup_by_referral_code(
        &self,
        code: &ReferralCode,
    ) -> Result<Option<Referrer>, TransientBackendError> {
        self.check(WaitlistOp::LookupReferral)?;
        Ok(self.codes.get(code).map(|name| Referrer {
            full_name: name.value().clone(),
        }))
    }

    async fn email_exists(&self, email: &str) -> Result<bool, TransientBackendError> {
        self.check(WaitlistOp::EmailExists)?;
        Ok(self.entries.contains_key(email))
    }

    async fn generate_referral_code(&self) -> Result<ReferralCode, TransientBackendError> {
        self.check(WaitlistOp::GenerateCode)?;
        loop {
            let code = Self::random_code();
            if !self.codes.contains_key(&code) {
                trace!(code = %code, "Generated referral code");
                return Ok(code);
            }
        }
    }

    async fn insert_entry(&self, entry: &NewEntry) -> Result<(), InsertError> {
        self.check(WaitlistOp::Insert)?;

        match self.entries.entry(entry.email.clone()) {
            Entry::Occupied(_) => {
                debug!(email = %entry.email, "Rejected duplicate email");
                return Err(InsertError::DuplicateEmail);
            }
            Entry::Vacant(slot) => {
                if self.codes.contains_key(&entry.referral_code) {
                    return Err(InsertError::Transient(TransientBackendError::new(
                        "duplicate key value violates unique constraint \"waitlist_referral_code_key\"",
                    )));
                }
                self.codes
                    .insert(entry.referral_code.clone(), entry.full_name.clone());
                slot.insert(entry.clone().into());
            }
        }

        self.notify(ChangeEvent::Insert);
        Ok(())
    }

    async fn count_entries(&self) -> Result<u64, TransientBackendError> {
        self.check(WaitlistOp::Count)?;
        Ok(self.entries.len() as u64)
    }

    fn subscribe_to_changes(&self, on_change: ChangeCallback) -> Subscription {
        let mut rx = self.change_tx.subscribe();
        let task = tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(event) => on_change(event),
                    Err(broadcast::error::RecvError::Lagged(_)) => continue,
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        });
        Subscription::new("waitlist", task)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::SignupForm;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn entry(email: &str, code: &str) -> NewEntry {
        SignupForm::new("Grace", email, "Arlington").to_entry(ReferralCode::new(code), None)
    }

    #[tokio::test]
    async fn test_insert_and_count() {
        let store = InMemoryWaitlist::new();
        assert!(store.is_empty());

        store.insert_entry(&entry("grace@example.com", "G1")).await.unwrap();
        assert_eq!(store.count_entries().await.unwrap(), 1);
        assert!(store.email_exists("grace@example.com").await.unwrap());
        assert!(!store.email_exists("nobody@example.com").await.unwrap());
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let store = InMemoryWaitlist::new();
        store.insert_entry(&entry("grace@example.com", "G1")).await.unwrap();

        let result = store.insert_entry(&entry("grace@example.com", "G2")).await;
        assert_eq!(result, Err(InsertError::DuplicateEmail));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_lookup_by_referral_code() {
        let store = InMemoryWaitlist::new();
        store.seed("ada", "ada@example.com", "london", "ADA123");

        let found = store
            .lookup_by_referral_code(&ReferralCode::new("ADA123"))
            .await
            .unwrap();
        assert_eq!(found, Some(Referrer { full_name: "ada".into() }));

        let missing = store
            .lookup_by_referral_code(&ReferralCode::new("NOPE"))
            .await
            .unwrap();
        assert_eq!(missing, None);
    }

    #[tokio::test]
    async fn test_generated_codes_are_unique() {
        let store = InMemoryWaitlist::new();
        let mut seen = HashSet::new();
        for i in 0..200 {
            let code = store.generate_referral_code().await.unwrap();
            assert_eq!(code.as_str().len(), CODE_LEN);
            store
                .insert_entry(&entry(&format!("user{i}@example.com"), code.as_str()))
                .await
                .unwrap();
            assert!(seen.insert(code));
        }
    }

    #[tokio::test]
    async fn test_injected_failure_and_recovery() {
        let store = InMemoryWaitlist::new();
        store.fail_on(WaitlistOp::Count);
        assert!(store.count_entries().await.is_err());

        store.recover(WaitlistOp::Count);
        assert_eq!(store.count_entries().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_subscription_fires_on_insert() {
        let store = InMemoryWaitlist::new();
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = fired.clone();

        let sub = store.subscribe_to_changes(Arc::new(move |event| {
            assert_eq!(event, ChangeEvent::Insert);
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        store.insert_entry(&entry("grace@example.com", "G1")).await.unwrap();
        store.seed("ada", "ada@example.com", "london", "ADA123");

        tokio::time::timeout(Duration::from_secs(1), async {
            while fired.load(Ordering::SeqCst) < 2 {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("both inserts should be observed");

        sub.close();
    }

    #[tokio::test]
    async fn test_closed_subscription_stops_firing() {
        let store = InMemoryWaitlist::new();
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = fired.clone();

        let sub = store.subscribe_to_changes(Arc::new(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        }));
        sub.close();
        tokio::task::yield_now().await;

        store.seed("ada", "ada@example.com", "london", "ADA123");
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }
}
