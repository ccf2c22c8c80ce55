//! Waitlist entry types.
//!
//! [`SignupForm`] is the raw user input, [`NewEntry`] is the normalised row
//! sent to the backend, and [`WaitlistEntry`] is a stored row.

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// An opaque referral code issued by the backend.
///
/// The client never inspects the format; it only compares, displays, and
/// embeds codes in share links.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReferralCode(String);

impl ReferralCode {
    /// Wrap a code returned by the backend.
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Parse user-entered text, trimming surrounding whitespace.
    ///
    /// Returns `None` when nothing but whitespace was entered.
    pub fn parse(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<str> for ReferralCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// The entry that owns a validated referral code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Referrer {
    pub full_name: String,
}

/// The signup form as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupForm {
    pub full_name: String,
    pub email: String,
    pub city: String,
    /// Optional inbound referral code; blank means none.
    pub referral_code: String,
}

impl SignupForm {
    /// Create a form without a referral code.
    pub fn new(full_name: impl Into<String>, email: impl Into<String>, city: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            email: email.into(),
            city: city.into(),
            referral_code: String::new(),
        }
    }

    /// Create an empty form pre-populated with an inbound referral code.
    pub fn with_referral(referral_code: impl Into<String>) -> Self {
        Self {
            referral_code: referral_code.into(),
            ..Default::default()
        }
    }

    /// Set the referral code field.
    pub fn referred_by(mut self, code: impl Into<String>) -> Self {
        self.referral_code = code.into();
        self
    }

    /// Names of required fields that are blank.
    pub fn missing_required(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.full_name.trim().is_empty() {
            missing.push("full name");
        }
        if self.email.trim().is_empty() {
            missing.push("email");
        }
        if self.city.trim().is_empty() {
            missing.push("city");
        }
        missing
    }

    pub fn is_complete(&self) -> bool {
        self.missing_required().is_empty()
    }

    /// The entered referral code, trimmed, if any.
    pub fn referral(&self) -> Option<ReferralCode> {
        ReferralCode::parse(&self.referral_code)
    }

    /// Lowercased, trimmed email as stored by the backend.
    pub fn normalized_email(&self) -> String {
        normalize(&self.email)
    }

    /// Build the row to insert, assigning the freshly generated code.
    pub fn to_entry(&self, referral_code: ReferralCode, referred_by: Option<ReferralCode>) -> NewEntry {
        NewEntry {
            full_name: normalize(&self.full_name),
            email: normalize(&self.email),
            city: normalize(&self.city),
            referral_code,
            referred_by,
        }
    }

    /// Clear every field.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// A normalised row ready for insertion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEntry {
    pub full_name: String,
    pub email: String,
    pub city: String,
    pub referral_code: ReferralCode,
    pub referred_by: Option<ReferralCode>,
}

/// A row stored by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaitlistEntry {
    pub full_name: String,
    pub email: String,
    pub city: String,
    pub referral_code: ReferralCode,
    #[serde(default)]
    pub referred_by: Option<ReferralCode>,
}

impl From<NewEntry> for WaitlistEntry {
    fn from(entry: NewEntry) -> Self {
        Self {
            full_name: entry.full_name,
            email: entry.email,
            city: entry.city,
            referral_code: entry.referral_code,
            referred_by: entry.referred_by,
        }
    }
}

fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}
