//! Side effects of the share buttons: opening the browser and writing the
//! clipboard.

use innercircle_core::{Notice, ShareAction};

/// Confirmation shown after the share message is copied.
pub const COPIED_NOTICE: &str = "share message copied to clipboard!";

/// Failure performing a share action.
#[derive(Debug, thiserror::Error)]
pub enum ShareError {
    #[error("failed to open browser: {0}")]
    Browser(#[from] std::io::Error),

    #[error("clipboard unavailable: {0}")]
    Clipboard(#[from] arboard::Error),
}

/// Perform `action`, returning the notice to show, if any.
pub fn perform(action: &ShareAction) -> Result<Option<Notice>, ShareError> {
    match action {
        ShareAction::OpenUrl(url) => {
            webbrowser::open(url)?;
            tracing::debug!(%url, "Opened share link");
            Ok(None)
        }
        ShareAction::CopyToClipboard(text) => {
            copy_text(text)?;
            Ok(Some(Notice::info(COPIED_NOTICE)))
        }
    }
}

/// Write `text` to the system clipboard.
pub fn copy_text(text: &str) -> Result<(), ShareError> {
    let mut clipboard = arboard::Clipboard::new()?;
    clipboard.set_text(text)?;
    Ok(())
}
