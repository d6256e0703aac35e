use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use qrlink_core::config::AppConfig;
use qrlink_core::decode::ScanOutcome;
use qrlink_core::scan::scan_file;

use super::actions::{apply, ActionFlags};

#[derive(Args)]
pub struct ScanArgs {
    /// Image file to scan
    pub image: PathBuf,

    #[command(flatten)]
    pub actions: ActionFlags,
}

pub fn run(args: &ScanArgs, config: &AppConfig) -> Result<()> {
    let outcome = scan_file(&args.image)
        .with_context(|| format!("Failed to scan {}", args.image.display()))?;

    let ScanOutcome::Found(text) = outcome else {
        bail!("No QR code found in image");
    };

    crate::summary::print_result(&text);
    apply(&text, &args.actions, &config.remote);
    Ok(())
}
