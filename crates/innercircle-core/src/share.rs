//! Invitation message and share links.
//!
//! Pure string construction. Performing the resulting [`ShareAction`]
//! (opening a browser, writing the clipboard) is left to the caller.

/// Host embedded in invitation links unless overridden.
pub const DEFAULT_SHARE_SITE: &str = "innercircle.events";

/// A place the invitation can be shared to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SharePlatform {
    WhatsApp,
    X,
    /// No public share intent; falls back to the clipboard.
    Copy,
}

impl SharePlatform {
    /// Returns all platforms in display order.
    pub fn all() -> &'static [SharePlatform] {
        &[SharePlatform::WhatsApp, SharePlatform::X, SharePlatform::Copy]
    }

    /// Button label.
    pub fn label(&self) -> &'static str {
        match self {
            SharePlatform::WhatsApp => "share on whatsapp",
            SharePlatform::X => "share on x (twitter)",
            SharePlatform::Copy => "share (copy text)",
        }
    }

    /// Base of the compose link, if the platform has one.
    fn intent_base(&self) -> Option<&'static str> {
        match self {
            SharePlatform::WhatsApp => Some("https://wa.me/?text="),
            SharePlatform::X => Some("https://twitter.com/intent/tweet?text="),
            SharePlatform::Copy => None,
        }
    }
}

/// What to do when a share button is pressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareAction {
    /// Open this URL in a new browser tab/window.
    OpenUrl(String),
    /// Write this text to the clipboard and confirm with a notice.
    CopyToClipboard(String),
}

/// Builds invitation messages for a site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareFormatter {
    site: String,
}

impl Default for ShareFormatter {
    fn default() -> Self {
        Self::new(DEFAULT_SHARE_SITE)
    }
}

impl ShareFormatter {
    pub fn new(site: impl Into<String>) -> Self {
        Self { site: site.into() }
    }

    pub fn site(&self) -> &str {
        &self.site
    }

    /// The link a referred friend follows.
    pub fn invite_link(&self, code: &str) -> String {
        format!("{}?ref={}", self.site, urlencoding::encode(code))
    }

    /// The canonical invitation text.
    pub fn message(&self, code: &str) -> String {
        format!(
            "i just secured my spot in innercircle! want in? sign up now and get ahead of the line: {}\n\n_innercircle: the ultimate insider platform for event lovers._",
            self.invite_link(code)
        )
    }

    /// Compose link for `platform`, or `None` when it has no share intent.
    pub fn share_url(&self, platform: SharePlatform, code: &str) -> Option<String> {
        platform
            .intent_base()
            .map(|base| format!("{base}{}", urlencoding::encode(&self.message(code))))
    }

    /// The action a share button performs.
    pub fn action(&self, platform: SharePlatform, code: &str) -> ShareAction {
        match self.share_url(platform, code) {
            Some(url) => ShareAction::OpenUrl(url),
            None => ShareAction::CopyToClipboard(self.message(code)),
        }
    }
}
