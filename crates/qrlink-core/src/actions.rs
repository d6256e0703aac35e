//! Desktop counterparts of the result actions: clipboard, link opening and
//! sharing. Links and share drafts go through the platform launcher.

use std::process::Command;
use std::time::Duration;

use tracing::info;
use url::Url;

use crate::consts::{CLIPBOARD_HOLD, SHARE_SUBJECT};
use crate::error::{QrLinkError, Result};
use crate::payload::openable_url;

/// [`copy_and_hold`] with the default [`CLIPBOARD_HOLD`].
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    copy_and_hold(text, CLIPBOARD_HOLD)
}

/// Copy `text` from a process about to exit.
///
/// X11 and Wayland selections live only as long as their owner, so on Linux
/// this blocks until another client (usually a clipboard manager) takes the
/// selection over, or `hold` runs out. Elsewhere it returns immediately.
pub fn copy_and_hold(text: &str, hold: Duration) -> Result<()> {
    let mut clipboard =
        arboard::Clipboard::new().map_err(|e| QrLinkError::Clipboard(e.to_string()))?;
    set_text_held(&mut clipboard, text, hold)
        .map_err(|e| QrLinkError::Clipboard(e.to_string()))?;
    info!(chars = text.chars().count(), ?hold, "copied to clipboard");
    Ok(())
}

#[cfg(target_os = "linux")]
fn set_text_held(
    clipboard: &mut arboard::Clipboard,
    text: &str,
    hold: Duration,
) -> std::result::Result<(), arboard::Error> {
    use arboard::SetExtLinux;

    clipboard
        .set()
        .wait_until(std::time::Instant::now() + hold)
        .text(text.to_string())
}

#[cfg(not(target_os = "linux"))]
fn set_text_held(
    clipboard: &mut arboard::Clipboard,
    text: &str,
    _hold: Duration,
) -> std::result::Result<(), arboard::Error> {
    clipboard.set_text(text.to_string())
}

/// Open a decoded link in the default browser.
pub fn open_link(text: &str) -> Result<Url> {
    let url = openable_url(text).ok_or_else(|| QrLinkError::NotAUrl(text.to_string()))?;
    launch(url.as_str())?;
    info!(%url, "opening link");
    Ok(url)
}

/// `mailto:` draft carrying `text` as its body.
pub fn share_url(text: &str) -> Result<Url> {
    // mailto (RFC 6068) wants %20 for spaces, not form-encoding's '+'.
    let draft = format!(
        "mailto:?subject={}&body={}",
        percent_encode(SHARE_SUBJECT),
        percent_encode(text)
    );
    Ok(Url::parse(&draft)?)
}

fn percent_encode(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

/// Hand the payload to the user's mail client as a new draft.
pub fn share_text(text: &str) -> Result<Url> {
    let url = share_url(text)?;
    launch(url.as_str())?;
    info!("share draft opened");
    Ok(url)
}

fn launch(target: &str) -> Result<()> {
    #[cfg(target_os = "windows")]
    let result = Command::new("cmd").args(["/C", "start", "", target]).spawn();

    #[cfg(target_os = "macos")]
    let result = Command::new("open").arg(target).spawn();

    #[cfg(all(unix, not(target_os = "macos")))]
    let result = Command::new("xdg-open").arg(target).spawn();

    result.map(drop).map_err(|e| QrLinkError::Launch {
        target: target.to_string(),
        reason: e.to_string(),
    })
}
