//! State shared by the signup page components.

use std::sync::Arc;
use std::time::Duration;

use innercircle_core::{
    InMemoryWaitlist, ReferralCode, ShareFormatter, SignupController, SignupFlow, SignupForm,
    SignupPolicy, WaitlistClient,
};

/// How long a notice stays on screen.
pub const NOTICE_TIMEOUT: Duration = Duration::from_secs(4);

/// Services provided to every component through the Dioxus context.
#[derive(Clone)]
pub struct AppContext {
    pub controller: SignupController,
    pub share: ShareFormatter,
    /// Referral code the app was opened with, pre-filled into the form.
    pub inbound_referral: Option<ReferralCode>,
}

impl AppContext {
    pub fn new(
        client: Arc<dyn WaitlistClient>,
        policy: SignupPolicy,
        share: ShareFormatter,
        inbound_referral: Option<ReferralCode>,
    ) -> Self {
        Self {
            controller: SignupController::with_policy(client, policy),
            share,
            inbound_referral,
        }
    }

    pub fn client(&self) -> Arc<dyn WaitlistClient> {
        self.controller.client().clone()
    }

    /// Form state for a fresh page load.
    pub fn initial_flow(&self) -> SignupFlow {
        match &self.inbound_referral {
            Some(code) => SignupFlow::with_referral(code.as_str()),
            None => SignupFlow::new(),
        }
    }
}

/// An in-memory waitlist with one known referrer, for `--demo`.
pub fn demo_waitlist() -> Arc<InMemoryWaitlist> {
    let waitlist = Arc::new(InMemoryWaitlist::new());
    waitlist.seed("ada", "ada@example.com", "london", "ADA123");
    waitlist
}

/// The inputs of the signup form, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    FullName,
    Email,
    City,
    ReferralCode,
}

impl FormField {
    pub const ALL: [FormField; 4] = [
        FormField::FullName,
        FormField::Email,
        FormField::City,
        FormField::ReferralCode,
    ];

    /// The `name` attribute.
    pub fn name(&self) -> &'static str {
        match self {
            FormField::FullName => "full_name",
            FormField::Email => "email",
            FormField::City => "city",
            FormField::ReferralCode => "referral_code",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FormField::FullName => "full name",
            FormField::Email => "email",
            FormField::City => "city",
            FormField::ReferralCode => "referral code (optional)",
        }
    }

    pub fn input_type(&self) -> &'static str {
        match self {
            FormField::Email => "email",
            _ => "text",
        }
    }

    pub fn autocomplete(&self) -> &'static str {
        match self {
            FormField::FullName => "name",
            FormField::Email => "email",
            FormField::City => "address-level2",
            FormField::ReferralCode => "off",
        }
    }

    pub fn required(&self) -> bool {
        !matches!(self, FormField::ReferralCode)
    }

    pub fn value<'a>(&self, form: &'a SignupForm) -> &'a str {
        match self {
            FormField::FullName => &form.full_name,
            FormField::Email => &form.email,
            FormField::City => &form.city,
            FormField::ReferralCode => &form.referral_code,
        }
    }

    pub fn set(&self, form: &mut SignupForm, value: String) {
        match self {
            FormField::FullName => form.full_name = value,
            FormField::Email => form.email = value,
            FormField::City => form.city = value,
            FormField::ReferralCode => form.referral_code = value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use innercircle_core::{DuplicateEmailCheck, SignupPhase};

    #[test]
    fn test_form_fields_round_trip_values() {
        let mut form = SignupForm::default();
        for field in FormField::ALL {
            field.set(&mut form, format!("{} value", field.name()));
        }
        assert_eq!(form.full_name, "full_name value");
        assert_eq!(FormField::ReferralCode.value(&form), "referral_code value");
    }

    #[test]
    fn test_required_fields_match_form_validation() {
        let required: Vec<&str> = FormField::ALL
            .iter()
            .filter(|f| f.required())
            .map(|f| f.label())
            .collect();
        assert_eq!(required, SignupForm::default().missing_required());
    }

    #[test]
    fn test_initial_flow_prefills_referral() {
        let ctx = AppContext::new(
            demo_waitlist(),
            SignupPolicy::default(),
            ShareFormatter::default(),
            ReferralCode::parse("ADA123"),
        );
        let flow = ctx.initial_flow();
        assert_eq!(flow.form().referral_code, "ADA123");
        assert_eq!(flow.phase(), &SignupPhase::Editing);
    }

    #[test]
    fn test_context_carries_policy() {
        let ctx = AppContext::new(
            demo_waitlist(),
            SignupPolicy {
                duplicate_email: DuplicateEmailCheck::PreCheck,
            },
            ShareFormatter::default(),
            None,
        );
        assert_eq!(ctx.controller.policy().duplicate_email, DuplicateEmailCheck::PreCheck);
        assert_eq!(ctx.initial_flow().form().referral_code, "");
    }

    #[tokio::test]
    async fn test_demo_waitlist_knows_ada() {
        let waitlist = demo_waitlist();
        let referrer = waitlist
            .lookup_by_referral_code(&ReferralCode::new("ADA123"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(referrer.full_name, "ada");
        assert_eq!(waitlist.count_entries().await.unwrap(), 1);
    }
}
