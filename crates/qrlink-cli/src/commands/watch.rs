use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use qrlink_core::config::AppConfig;
use qrlink_core::scan::{
    run_session, DirectoryFrameSource, FrameSource, SessionOptions, SessionOutcome,
};

use super::actions::{apply, ActionFlags};

#[derive(Args)]
pub struct WatchArgs {
    /// Replay the images in this directory as a frame stream
    #[arg(long, conflicts_with = "camera", required_unless_present = "camera")]
    pub frames: Option<PathBuf>,

    /// Frames per second when replaying a directory (0 = as fast as possible)
    #[arg(long, default_value = "15")]
    pub fps: f32,

    /// Camera device index
    #[arg(long)]
    pub camera: Option<u32>,

    /// Decoder threads (defaults to the config value)
    #[arg(long)]
    pub analyzers: Option<usize>,

    /// Give up after this many analyzed frames
    #[arg(long)]
    pub max_frames: Option<u64>,

    #[command(flatten)]
    pub actions: ActionFlags,
}

pub fn run(args: &WatchArgs, config: &AppConfig) -> Result<()> {
    let mut source = open_source(args)?;
    let options = SessionOptions {
        analyzers: args.analyzers.unwrap_or(config.scan.analyzers),
        max_frames: args.max_frames,
    };

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner} {msg} ({pos} frames)")?);
    pb.set_message(format!("Scanning {}", source.describe()));
    pb.enable_steady_tick(Duration::from_millis(100));

    let cancel = AtomicBool::new(false);
    let report = run_session(&mut source, &options, &cancel, |_| pb.inc(1))?;
    pb.finish_and_clear();

    crate::summary::print_session(&report);
    match report.outcome {
        SessionOutcome::Detected(ref text) => {
            crate::summary::print_result(text);
            apply(text, &args.actions, &config.remote);
            Ok(())
        }
        SessionOutcome::Exhausted => match report.source_error {
            Some(ref e) => bail!("Frame capture failed: {e}"),
            None => bail!("No QR code found in stream"),
        },
        SessionOutcome::Cancelled => bail!("Scan cancelled"),
    }
}

fn open_source(args: &WatchArgs) -> Result<Box<dyn FrameSource>> {
    if let Some(ref dir) = args.frames {
        let source = DirectoryFrameSource::open(dir)
            .with_context(|| format!("Failed to open frame directory {}", dir.display()))?
            .with_fps(args.fps);
        return Ok(Box::new(source));
    }

    let Some(index) = args.camera else {
        bail!("Pass --frames DIR or --camera N");
    };
    open_camera(index)
}

#[cfg(feature = "camera")]
fn open_camera(index: u32) -> Result<Box<dyn FrameSource>> {
    let camera = qrlink_core::scan::CameraFrameSource::open(index)
        .with_context(|| format!("Failed to open camera #{index}"))?;
    Ok(Box::new(camera))
}

#[cfg(not(feature = "camera"))]
fn open_camera(index: u32) -> Result<Box<dyn FrameSource>> {
    bail!("Camera #{index} unavailable: qrlink was built without the `camera` feature")
}
