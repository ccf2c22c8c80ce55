//! The signup workflow.
//!
//! [`SignupController`] runs the ordered submit sequence against a
//! [`WaitlistClient`]. [`SignupFlow`] owns the view-side state machine:
//!
//! ```text
//! Editing --begin_submit--> Submitting --finish(Ok)--> Submitted
//!    ^                          |                          |
//!    +------finish(Err)---------+                          |
//!    +------------------------reset------------------------+
//! ```
//!
//! The two halves are separate so the view can release its state lock while
//! the remote calls are in flight.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::client::WaitlistClient;
use crate::entry::{ReferralCode, SignupForm};
use crate::error::SignupError;

/// How a repeated email is detected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateEmailCheck {
    /// Rely on the backend's unique constraint at insert time.
    #[default]
    OnInsert,
    /// Query for the email before generating a code.
    PreCheck,
}

/// Tunable parts of the submit sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SignupPolicy {
    pub duplicate_email: DuplicateEmailCheck,
}

/// Result of a successful signup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmittedSignup {
    /// The code issued to the new entry.
    pub referral_code: ReferralCode,
    /// Display name of whoever referred this signup, if anyone.
    pub referrer_name: Option<String>,
}

/// Runs the submit sequence against the backend.
#[derive(Clone)]
pub struct SignupController {
    client: Arc<dyn WaitlistClient>,
    policy: SignupPolicy,
}

impl SignupController {
    pub fn new(client: Arc<dyn WaitlistClient>) -> Self {
        Self::with_policy(client, SignupPolicy::default())
    }

    pub fn with_policy(client: Arc<dyn WaitlistClient>, policy: SignupPolicy) -> Self {
        Self { client, policy }
    }

    pub fn policy(&self) -> SignupPolicy {
        self.policy
    }

    /// The backend this controller talks to.
    pub fn client(&self) -> &Arc<dyn WaitlistClient> {
        &self.client
    }

    /// Submit a signup.
    ///
    /// Steps run strictly in order and stop at the first failure:
    ///
    /// 1. validate the referral code, if one was entered
    /// 2. check the email, when [`DuplicateEmailCheck::PreCheck`] is selected
    /// 3. generate a referral code
    /// 4. insert the entry
    ///
    /// Nothing is wrapped in a transaction: a referral code validated in
    /// step 1 is not re-checked at insert. A panic anywhere in the sequence is
    /// reported as [`SignupError::Unexpected`].
    pub async fn submit(&self, form: &SignupForm) -> Result<SubmittedSignup, SignupError> {
        match AssertUnwindSafe(self.run_steps(form)).catch_unwind().await {
            Ok(result) => result,
            Err(panic) => {
                let reason = panic_reason(panic.as_ref());
                warn!(reason = %reason, "Signup workflow panicked");
                Err(SignupError::Unexpected(reason))
            }
        }
    }

    async fn run_steps(&self, form: &SignupForm) -> Result<SubmittedSignup, SignupError> {
        let missing = form.missing_required();
        if !missing.is_empty() {
            return Err(SignupError::MissingFields(missing));
        }

        let referral = form.referral();
        let referrer = match &referral {
            Some(code) => match self.client.lookup_by_referral_code(code).await {
                Ok(Some(referrer)) => Some(referrer),
                Ok(None) => {
                    info!(code = %code, "Unknown referral code");
                    return Err(SignupError::InvalidReferralCode);
                }
                Err(e) => {
                    warn!(error = %e, "Referral code lookup failed");
                    return Err(SignupError::ReferralLookup(e));
                }
            },
            None => None,
        };

        if self.policy.duplicate_email == DuplicateEmailCheck::PreCheck {
            match self.client.email_exists(&form.normalized_email()).await {
                Ok(true) => return Err(SignupError::DuplicateEmail),
                Ok(false) => {}
                Err(e) => {
                    warn!(error = %e, "Email pre-check failed");
                    return Err(SignupError::EmailCheck(e));
                }
            }
        }

        let code = self.client.generate_referral_code().await.map_err(|e| {
            warn!(error = %e, "Generate referral code error");
            SignupError::CodeGeneration(e)
        })?;

        let entry = form.to_entry(code.clone(), referral);
        self.client.insert_entry(&entry).await.map_err(|e| {
            let err = SignupError::from(e);
            if !err.is_validation() {
                warn!(error = %err, "Insert error");
            }
            err
        })?;

        info!(code = %code, referred = referrer.is_some(), "Signup saved");
        Ok(SubmittedSignup {
            referral_code: code,
            referrer_name: referrer.map(|r| r.full_name),
        })
    }
}

fn panic_reason(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Phase of the signup view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignupPhase {
    /// The form is being filled in.
    Editing,
    /// Remote calls are in flight.
    Submitting,
    /// The signup is saved.
    Submitted(SubmittedSignup),
}

/// Tone of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// A transient toast shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }
}

/// View state for the signup form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupFlow {
    form: SignupForm,
    phase: SignupPhase,
    notice: Option<Notice>,
    /// Bumped every time a notice is shown, even an identical one.
    notice_seq: u64,
}

impl Default for SignupFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl SignupFlow {
    pub fn new() -> Self {
        Self {
            form: SignupForm::default(),
            phase: SignupPhase::Editing,
            notice: None,
            notice_seq: 0,
        }
    }

    /// Start with the referral field pre-populated.
    pub fn with_referral(code: impl Into<String>) -> Self {
        Self {
            form: SignupForm::with_referral(code),
            ..Self::new()
        }
    }

    pub fn form(&self) -> &SignupForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut SignupForm {
        &mut self.form
    }

    pub fn phase(&self) -> &SignupPhase {
        &self.phase
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == SignupPhase::Submitting
    }

    pub fn submitted(&self) -> Option<&SubmittedSignup> {
        match &self.phase {
            SignupPhase::Submitted(signup) => Some(signup),
            _ => None,
        }
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Identifies the notice most recently shown.
    pub fn notice_id(&self) -> u64 {
        self.notice_seq
    }

    /// Show a notice, replacing any current one.
    pub fn notify(&mut self, notice: Notice) {
        self.notice_seq += 1;
        self.notice = Some(notice);
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Dismiss the notice only if it is still the one identified by `id`.
    pub fn expire_notice(&mut self, id: u64) -> bool {
        if self.notice.is_none() || self.notice_seq != id {
            return false;
        }
        self.notice = None;
        true
    }

    /// Move from `Editing` to `Submitting`.
    ///
    /// Returns the form to submit, or `None` when not editing or when a
    /// required field is blank (a notice is shown in that case).
    pub fn begin_submit(&mut self) -> Option<SignupForm> {
        if self.phase != SignupPhase::Editing {
            debug!(phase = ?self.phase, "Ignoring submit outside editing");
            return None;
        }
        let missing = self.form.missing_required();
        if !missing.is_empty() {
            self.notify(Notice::error(SignupError::MissingFields(missing).user_message()));
            return None;
        }
        self.notice = None;
        self.phase = SignupPhase::Submitting;
        Some(self.form.clone())
    }

    /// Apply the outcome of a submission started with [`Self::begin_submit`].
    pub fn finish(&mut self, result: Result<SubmittedSignup, SignupError>) {
        if self.phase != SignupPhase::Submitting {
            debug!(phase = ?self.phase, "Ignoring submit result outside submitting");
            return;
        }
        match result {
            Ok(signup) => {
                self.notice = None;
                self.phase = SignupPhase::Submitted(signup);
            }
            Err(e) => {
                self.notify(Notice::error(e.user_message()));
                self.phase = SignupPhase::Editing;
            }
        }
    }

    /// Leave the success view and start a fresh, empty form.
    ///
    /// Only valid from `Submitted`; returns whether the reset happened. The
    /// saved entry is not touched.
    pub fn reset(&mut self) -> bool {
        if !matches!(self.phase, SignupPhase::Submitted(_)) {
            return false;
        }
        self.form.clear();
        self.notice = None;
        self.phase = SignupPhase::Editing;
        true
    }
}
