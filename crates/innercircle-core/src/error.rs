//! Error types for waitlist operations.
//!
//! Backend failures are classified at the client boundary. The signup
//! workflow maps them onto [`SignupError`], whose [`SignupError::user_message`]
//! is the only text ever shown to the user.

/// Any network, query, or RPC failure that is likely worth retrying.
///
/// The message carries the underlying cause for logs; it is never shown to
/// the user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("backend unavailable: {0}")]
pub struct TransientBackendError(pub String);

impl TransientBackendError {
    pub fn new(cause: impl Into<String>) -> Self {
        Self(cause.into())
    }

    /// The underlying cause, for diagnostics.
    pub fn cause(&self) -> &str {
        &self.0
    }
}

/// Failure inserting a waitlist entry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InsertError {
    /// The email is already registered.
    #[error("email already registered")]
    DuplicateEmail,

    /// Any other backend failure.
    #[error(transparent)]
    Transient(#[from] TransientBackendError),
}

/// Outcome of a failed signup, as seen by the user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SignupError {
    // ============================================================
    // Validation (recovered locally, specific message)
    // ============================================================
    /// A required field was left blank.
    #[error("missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    /// The referral code matches no entry.
    #[error("referral code not found")]
    InvalidReferralCode,

    /// The email is already registered.
    #[error("email already registered")]
    DuplicateEmail,

    // ============================================================
    // Transient (generic retry message, cause logged)
    // ============================================================
    /// Referral code lookup failed.
    #[error("referral lookup failed: {0}")]
    ReferralLookup(TransientBackendError),

    /// The duplicate-email pre-check failed.
    #[error("email check failed: {0}")]
    EmailCheck(TransientBackendError),

    /// Generating a new referral code failed.
    #[error("referral code generation failed: {0}")]
    CodeGeneration(TransientBackendError),

    /// Saving the entry failed.
    #[error("saving entry failed: {0}")]
    Save(TransientBackendError),

    /// Anything not otherwise classified.
    #[error("unexpected failure: {0}")]
    Unexpected(String),
}

impl SignupError {
    /// The message shown to the user.
    pub fn user_message(&self) -> &'static str {
        match self {
            SignupError::MissingFields(_) => "please fill in your full name, email and city!",
            SignupError::InvalidReferralCode => {
                "that referral code doesn't exist. double-check it or leave it blank!"
            }
            SignupError::DuplicateEmail => {
                "this email is already registered. please use a different email!"
            }
            SignupError::ReferralLookup(_) => {
                "something went wrong checking your referral code. please try again!"
            }
            SignupError::EmailCheck(_) => {
                "something went wrong checking your email. please try again!"
            }
            SignupError::CodeGeneration(_) => {
                "something went wrong generating your referral code. please try again!"
            }
            SignupError::Save(_) => {
                "something went wrong saving your information. please try again!"
            }
            SignupError::Unexpected(_) => "something unexpected went wrong. please try again!",
        }
    }

    /// Whether the user can fix this by changing their input.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            SignupError::MissingFields(_)
                | SignupError::InvalidReferralCode
                | SignupError::DuplicateEmail
        )
    }
}

impl From<InsertError> for SignupError {
    fn from(e: InsertError) -> Self {
        match e {
            InsertError::DuplicateEmail => SignupError::DuplicateEmail,
            InsertError::Transient(e) => SignupError::Save(e),
        }
    }
}
