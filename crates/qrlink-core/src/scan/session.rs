use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};
use std::thread;

use image::DynamicImage;
use tracing::{debug, info, warn};

use super::latest::LatestFrame;
use super::source::FrameSource;
use crate::decode::{decode_image, ScanOutcome};
use crate::error::{QrLinkError, Result};

/// One-shot latch: only the first caller of [`ScanLatch::fire`] wins.
#[derive(Debug, Default)]
pub struct ScanLatch {
    fired: AtomicBool,
}

impl ScanLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` for exactly one caller over the latch's lifetime.
    pub fn fire(&self) -> bool {
        self.fired
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    pub fn is_fired(&self) -> bool {
        self.fired.load(Ordering::Acquire)
    }
}

#[derive(Clone, Debug)]
pub struct SessionOptions {
    /// Decoder threads pulling from the frame slot.
    pub analyzers: usize,
    /// Stop after this many analyzed frames.
    pub max_frames: Option<u64>,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            analyzers: 1,
            max_frames: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionOutcome {
    /// First payload decoded from the stream.
    Detected(String),
    /// The stream ended (or hit `max_frames`) without a code.
    Exhausted,
    Cancelled,
}

#[derive(Clone, Debug)]
pub struct SessionReport {
    pub outcome: SessionOutcome,
    pub frames_captured: u64,
    pub frames_analyzed: u64,
    /// Frames replaced in the slot before an analyzer got to them.
    pub frames_dropped: u64,
    /// Set when capture stopped because the source failed.
    pub source_error: Option<String>,
}

struct Shared {
    slot: LatestFrame<DynamicImage>,
    latch: ScanLatch,
    detected: Mutex<Option<String>>,
    analyzed: AtomicU64,
}

/// Pull frames from `source` and decode them until the first QR hit.
///
/// Capture runs on the calling thread, so the source does not need to be
/// `Send`. `options.analyzers` threads decode frames from a keep-latest
/// slot and call `on_frame` for each frame they analyze. The first non-empty
/// payload to win the latch ends the session: the slot is shut down and
/// capture stops. Every later hit is ignored.
pub fn run_session<S, F>(
    source: &mut S,
    options: &SessionOptions,
    cancel: &AtomicBool,
    on_frame: F,
) -> Result<SessionReport>
where
    S: FrameSource + ?Sized,
    F: Fn(&DynamicImage) + Sync,
{
    let shared = Shared {
        slot: LatestFrame::new(),
        latch: ScanLatch::new(),
        detected: Mutex::new(None),
        analyzed: AtomicU64::new(0),
    };
    let analyzers = options.analyzers.max(1);
    let mut captured = 0u64;
    let mut source_error = None;

    info!(source = %source.describe(), analyzers, "scan session started");

    thread::scope(|scope| {
        for worker in 0..analyzers {
            let shared_ref = &shared;
            let on_frame = &on_frame;
            let max_frames = options.max_frames;
            let spawned = thread::Builder::new()
                .name(format!("qrlink-analyzer-{worker}"))
                .spawn_scoped(scope, move || {
                    analyze_frames(shared_ref, cancel, max_frames, on_frame);
                });
            if let Err(e) = spawned {
                // Release the analyzers already blocked on the slot.
                shared.slot.shutdown();
                return Err(QrLinkError::Io(e));
            }
        }

        while !cancel.load(Ordering::Relaxed) && !shared.latch.is_fired() {
            match source.next_frame() {
                Ok(Some(frame)) => {
                    captured += 1;
                    if !shared.slot.offer(frame) {
                        break;
                    }
                }
                Ok(None) => {
                    debug!(captured, "frame source exhausted");
                    break;
                }
                Err(e) => {
                    warn!("frame capture failed: {e}");
                    source_error = Some(e.to_string());
                    break;
                }
            }
        }

        if cancel.load(Ordering::Relaxed) {
            shared.slot.shutdown();
        } else {
            shared.slot.close();
        }
        Ok::<(), QrLinkError>(())
    })?;

    let detected = shared
        .detected
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .take();
    let outcome = match detected {
        Some(text) => SessionOutcome::Detected(text),
        None if cancel.load(Ordering::Relaxed) => SessionOutcome::Cancelled,
        None => SessionOutcome::Exhausted,
    };

    let report = SessionReport {
        outcome,
        frames_captured: captured,
        frames_analyzed: shared.analyzed.load(Ordering::Relaxed),
        frames_dropped: shared.slot.dropped(),
        source_error,
    };
    info!(
        outcome = ?report.outcome,
        captured = report.frames_captured,
        analyzed = report.frames_analyzed,
        dropped = report.frames_dropped,
        "scan session finished"
    );
    Ok(report)
}

fn analyze_frames<F>(shared: &Shared, cancel: &AtomicBool, max_frames: Option<u64>, on_frame: &F)
where
    F: Fn(&DynamicImage) + Sync,
{
    while let Some(frame) = shared.slot.take() {
        if cancel.load(Ordering::Relaxed) || shared.latch.is_fired() {
            break;
        }

        let Some(seen) = claim_frame(&shared.analyzed, max_frames) else {
            shared.slot.shutdown();
            break;
        };
        on_frame(&frame);

        match decode_image(&frame) {
            Ok(ScanOutcome::Found(text)) => {
                if shared.latch.fire() {
                    debug!(frame = seen, "QR code detected");
                    *shared
                        .detected
                        .lock()
                        .unwrap_or_else(PoisonError::into_inner) = Some(text);
                    shared.slot.shutdown();
                    break;
                }
                debug!(frame = seen, "ignoring hit after session already latched");
            }
            Ok(ScanOutcome::NotFound) => {}
            Err(e) => debug!(frame = seen, "frame decode failed: {e}"),
        }

        if max_frames.is_some_and(|max| seen >= max) {
            shared.slot.shutdown();
            break;
        }
    }
}

/// Reserve the next analyzed-frame number, or `None` once `max_frames` are
/// already taken.
fn claim_frame(analyzed: &AtomicU64, max_frames: Option<u64>) -> Option<u64> {
    analyzed
        .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| {
            max_frames.map_or(true, |max| n < max).then_some(n + 1)
        })
        .ok()
        .map(|previous| previous + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn claim_frame_stops_at_limit() {
        let analyzed = AtomicU64::new(0);
        assert_eq!(claim_frame(&analyzed, Some(2)), Some(1));
        assert_eq!(claim_frame(&analyzed, Some(2)), Some(2));
        assert_eq!(claim_frame(&analyzed, Some(2)), None);
        assert_eq!(analyzed.load(Ordering::Relaxed), 2);
        assert_eq!(claim_frame(&analyzed, None), Some(3));
    }
}
