use anyhow::{Context, Result};
use clap::Args;
use qrlink_core::actions::{copy_to_clipboard, open_link, share_text};
use qrlink_core::config::RemoteConfig;
use qrlink_core::remote::{RemoteSender, SendOutcome};
use tracing::warn;

/// Follow-up actions for a decoded payload.
#[derive(Args, Clone, Default)]
pub struct ActionFlags {
    /// Copy the payload to the clipboard
    #[arg(long)]
    pub copy: bool,

    /// Open the payload in the browser when it is a link
    #[arg(long)]
    pub open: bool,

    /// Open a mail draft carrying the payload
    #[arg(long)]
    pub share: bool,

    /// Forward the payload to the collector endpoint
    #[arg(long)]
    pub send: bool,
}

/// Run every requested action. A failing action is reported and the rest
/// still run. Copy goes last since it may block while holding the selection.
pub fn apply(text: &str, flags: &ActionFlags, remote: &RemoteConfig) {
    let s = crate::summary::Styles::new();

    if flags.open {
        match open_link(text) {
            Ok(url) => println!("  {} {}", s.ok.apply_to("Opening"), s.path.apply_to(url)),
            Err(e) => report_failure("open", &e.to_string()),
        }
    }
    if flags.share {
        match share_text(text) {
            Ok(_) => println!("  {}", s.ok.apply_to("Share draft opened")),
            Err(e) => report_failure("share", &e.to_string()),
        }
    }
    if flags.send {
        match send_blocking(text, remote) {
            Ok(outcome) => crate::summary::print_send_outcome(&outcome),
            Err(e) => report_failure("send", &format!("{e:#}")),
        }
    }
    if flags.copy {
        match copy_to_clipboard(text) {
            Ok(()) => println!("  {}", s.ok.apply_to("Text copied to clipboard")),
            Err(e) => report_failure("copy", &e.to_string()),
        }
    }
}

/// Post `text` to the collector from synchronous code.
pub fn send_blocking(text: &str, remote: &RemoteConfig) -> Result<SendOutcome> {
    let sender = RemoteSender::new(remote)?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start the network runtime")?;
    let outcome = runtime
        .block_on(sender.send(text))
        .with_context(|| format!("Failed to send QR to {}", sender.endpoint()))?;
    Ok(outcome)
}

fn report_failure(action: &str, message: &str) {
    warn!(action, "{message}");
    let s = crate::summary::Styles::new();
    eprintln!("  {} {message}", s.error.apply_to(format!("{action} failed:")));
}
