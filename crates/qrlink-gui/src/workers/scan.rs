use std::sync::atomic::AtomicBool;
use std::sync::{mpsc, Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use qrlink_core::scan::{
    run_session, DirectoryFrameSource, FrameSource, SessionOptions, SessionOutcome,
};
use tracing::debug;

use crate::convert::frame_to_preview;
use crate::messages::{ScanSource, WorkerResult};
use crate::states::ScanId;

use super::{send, send_error, send_log};

const PREVIEW_EDGE: u32 = 360;
const PREVIEW_INTERVAL: Duration = Duration::from_millis(66);
const REPLAY_FPS: f32 = 15.0;

/// Run the session on its own thread so the worker keeps serving commands.
pub(super) fn handle_start_scan(
    session: ScanId,
    source: ScanSource,
    options: SessionOptions,
    cancel: Arc<AtomicBool>,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) {
    let thread_tx = tx.clone();
    let thread_ctx = ctx.clone();
    let spawned = std::thread::Builder::new()
        .name(format!("qrlink-scan-{session}"))
        .spawn(move || {
            run_live_scan(session, &source, &options, &cancel, &thread_tx, &thread_ctx)
        });

    if let Err(e) = spawned {
        send(
            tx,
            ctx,
            WorkerResult::ScanStopped {
                session,
                message: format!("Could not start scan: {e}"),
            },
        );
    }
}

fn run_live_scan(
    session: ScanId,
    source: &ScanSource,
    options: &SessionOptions,
    cancel: &AtomicBool,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) {
    let mut frames = match open_source(source) {
        Ok(frames) => frames,
        Err(e) => {
            send_error(tx, ctx, format!("{e:#}"));
            send(
                tx,
                ctx,
                WorkerResult::ScanStopped {
                    session,
                    message: "Camera unavailable".into(),
                },
            );
            return;
        }
    };
    send_log(tx, ctx, format!("Scanning {}", frames.describe()));

    let last_preview = Mutex::new(None::<Instant>);
    let on_frame = |frame: &image::DynamicImage| {
        let mut last = last_preview.lock().unwrap_or_else(PoisonError::into_inner);
        if last.is_some_and(|t| t.elapsed() < PREVIEW_INTERVAL) {
            return;
        }
        *last = Some(Instant::now());
        drop(last);
        send(
            tx,
            ctx,
            WorkerResult::Preview {
                session,
                image: frame_to_preview(frame, PREVIEW_EDGE),
            },
        );
    };

    let result = match run_session(&mut frames, options, cancel, on_frame) {
        Ok(report) => report,
        Err(e) => {
            send(
                tx,
                ctx,
                WorkerResult::ScanStopped {
                    session,
                    message: format!("Scan failed: {e}"),
                },
            );
            return;
        }
    };
    debug!(
        session,
        captured = result.frames_captured,
        analyzed = result.frames_analyzed,
        "live scan finished"
    );

    let message = match result.outcome {
        SessionOutcome::Detected(text) => {
            send(tx, ctx, WorkerResult::ScanDetected { session, text });
            return;
        }
        SessionOutcome::Cancelled => "Scan cancelled".to_string(),
        SessionOutcome::Exhausted => match result.source_error {
            Some(e) => format!("Camera error: {e}"),
            None => "No QR code found".to_string(),
        },
    };
    send(tx, ctx, WorkerResult::ScanStopped { session, message });
}

fn open_source(source: &ScanSource) -> Result<Box<dyn FrameSource>> {
    match source {
        ScanSource::Frames { dir } => {
            let frames = DirectoryFrameSource::open(dir)
                .with_context(|| format!("Failed to open frame folder {}", dir.display()))?
                .with_fps(REPLAY_FPS);
            Ok(Box::new(frames))
        }
        ScanSource::Camera { index } => open_camera(*index),
    }
}

#[cfg(feature = "camera")]
fn open_camera(index: u32) -> Result<Box<dyn FrameSource>> {
    let camera = qrlink_core::scan::CameraFrameSource::open(index)
        .with_context(|| format!("Failed to open camera #{index}"))?;
    Ok(Box::new(camera))
}

#[cfg(not(feature = "camera"))]
fn open_camera(index: u32) -> Result<Box<dyn FrameSource>> {
    anyhow::bail!("Camera #{index} unavailable: built without the `camera` feature")
}
