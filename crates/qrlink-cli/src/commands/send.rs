use anyhow::{bail, Result};
use clap::Args;
use qrlink_core::config::AppConfig;

use super::actions::send_blocking;

#[derive(Args)]
pub struct SendArgs {
    /// Text to forward
    pub text: String,

    /// Collector URL, overriding the configured endpoint
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,
}

pub fn run(args: &SendArgs, config: &AppConfig) -> Result<()> {
    let mut remote = config.remote.clone();
    if let Some(ref endpoint) = args.endpoint {
        remote.endpoint = endpoint.clone();
    }
    if args.timeout.is_some() {
        remote.timeout_secs = args.timeout;
    }

    let outcome = send_blocking(&args.text, &remote)?;
    crate::summary::print_send_outcome(&outcome);
    if !outcome.is_delivered() {
        bail!("{outcome}");
    }
    Ok(())
}
