//! The page's signup sequence against the demo waitlist, without a window.

use innercircle_app::referral::parse_inbound;
use innercircle_app::state::{AppContext, FormField, demo_waitlist};
use innercircle_core::{
    ShareAction, ShareFormatter, SharePlatform, SignupPhase, SignupPolicy, WaitlistClient,
};

fn fill(flow: &mut innercircle_core::SignupFlow, name: &str, email: &str, city: &str) {
    let form = flow.form_mut();
    FormField::FullName.set(form, name.into());
    FormField::Email.set(form, email.into());
    FormField::City.set(form, city.into());
}

#[tokio::test]
async fn test_invite_link_to_success_and_back() {
    let waitlist = demo_waitlist();
    let ctx = AppContext::new(
        waitlist.clone(),
        SignupPolicy::default(),
        ShareFormatter::default(),
        parse_inbound("innercircle.events?ref=ADA123"),
    );

    let mut flow = ctx.initial_flow();
    fill(&mut flow, "Grace Hopper", "grace@example.com", "Arlington");

    let form = flow.begin_submit().unwrap();
    assert!(flow.is_submitting());
    assert!(flow.begin_submit().is_none());

    flow.finish(ctx.controller.submit(&form).await);
    let signup = flow.submitted().cloned().unwrap();
    assert_eq!(signup.referrer_name.as_deref(), Some("ada"));

    let stored = waitlist.entry_by_email("grace@example.com").unwrap();
    assert_eq!(stored.referred_by.unwrap().as_str(), "ADA123");
    assert_eq!(waitlist.count_entries().await.unwrap(), 2);

    let code = signup.referral_code.as_str();
    match ctx.share.action(SharePlatform::Copy, code) {
        ShareAction::CopyToClipboard(text) => {
            assert!(text.contains(&format!("innercircle.events?ref={code}")))
        }
        other => panic!("copy should use the clipboard, got {other:?}"),
    }

    assert!(flow.reset());
    assert_eq!(flow.phase(), &SignupPhase::Editing);
    assert_eq!(flow.form().referral_code, "");
    assert_eq!(waitlist.count_entries().await.unwrap(), 2);
}

#[tokio::test]
async fn test_duplicate_email_returns_to_editing() {
    let waitlist = demo_waitlist();
    let ctx = AppContext::new(
        waitlist.clone(),
        SignupPolicy::default(),
        ShareFormatter::default(),
        None,
    );

    let mut flow = ctx.initial_flow();
    fill(&mut flow, "Someone", "ADA@example.com", "Paris");
    let form = flow.begin_submit().unwrap();
    flow.finish(ctx.controller.submit(&form).await);

    assert_eq!(flow.phase(), &SignupPhase::Editing);
    assert_eq!(
        flow.notice().unwrap().message,
        "this email is already registered. please use a different email!"
    );
    assert_eq!(waitlist.len(), 1);
}
