//! Inbound referral codes from invite links.

use innercircle_core::ReferralCode;

/// Extract the referral code from a bare code or an invite link.
///
/// Links may carry a scheme or not (`innercircle.events?ref=ADA123`); the
/// code is read from the `ref` query parameter. Returns `None` when there is
/// no usable code, including links without a `ref` parameter.
pub fn parse_inbound(input: &str) -> Option<ReferralCode> {
    let trimmed = input.trim();
    if !looks_like_link(trimmed) {
        return ReferralCode::parse(trimmed);
    }

    let without_fragment = trimmed.split('#').next().unwrap_or_default();
    let query = match without_fragment.split_once('?') {
        Some((_, query)) => query,
        None => without_fragment,
    };

    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == "ref")
        .and_then(|(_, value)| ReferralCode::parse(&value))
}

/// Codes are plain tokens; anything with URL punctuation is a link.
fn looks_like_link(input: &str) -> bool {
    input.contains("ref=") || input.contains(['?', '/', '#', '.'])
}
