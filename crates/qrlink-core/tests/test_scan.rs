#[allow(dead_code)]
mod common;

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use tempfile::TempDir;

use qrlink_core::decode::ScanOutcome;
use qrlink_core::error::QrLinkError;
use qrlink_core::scan::{
    run_session, scan_file, DirectoryFrameSource, FrameSource, MemoryFrameSource, ScanLatch,
    SessionOptions, SessionOutcome,
};

// ---------------------------------------------------------------------------
// Gallery
// ---------------------------------------------------------------------------

#[test]
fn test_scan_file_finds_code() {
    let dir = TempDir::new().unwrap();
    let path = common::write_frame(dir.path(), "code.png", &common::qr_frame("gallery pick"));
    assert_eq!(
        scan_file(&path).unwrap(),
        ScanOutcome::Found("gallery pick".into())
    );
}

#[test]
fn test_scan_file_without_code_is_not_found() {
    let dir = TempDir::new().unwrap();
    let path = common::write_frame(dir.path(), "blank.png", &common::blank_frame());
    assert_eq!(scan_file(&path).unwrap(), ScanOutcome::NotFound);
}

#[test]
fn test_scan_file_rejects_non_image() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("notes.png");
    std::fs::write(&path, b"definitely not a png").unwrap();
    let err = scan_file(&path).unwrap_err();
    assert!(matches!(err, QrLinkError::Image(_)), "got: {err}");
}

#[test]
fn test_scan_file_missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let err = scan_file(&dir.path().join("missing.png")).unwrap_err();
    assert!(matches!(err, QrLinkError::Io(_) | QrLinkError::Image(_)), "got: {err}");
}

// ---------------------------------------------------------------------------
// Latch
// ---------------------------------------------------------------------------

#[test]
fn test_latch_fires_once_across_threads() {
    let latch = ScanLatch::new();
    let wins = AtomicUsize::new(0);
    std::thread::scope(|s| {
        for _ in 0..8 {
            s.spawn(|| {
                if latch.fire() {
                    wins.fetch_add(1, Ordering::Relaxed);
                }
            });
        }
    });
    assert_eq!(wins.load(Ordering::Relaxed), 1);
    assert!(latch.is_fired());
}

// ---------------------------------------------------------------------------
// Sessions
// ---------------------------------------------------------------------------

#[test]
fn test_session_detects_code_after_blank_frames() {
    let mut source = MemoryFrameSource::new([
        common::blank_frame(),
        common::blank_frame(),
        common::qr_frame("from the camera"),
    ]);
    let cancel = AtomicBool::new(false);
    let report = run_session(&mut source, &SessionOptions::default(), &cancel, |_| {}).unwrap();

    assert_eq!(
        report.outcome,
        SessionOutcome::Detected("from the camera".into())
    );
    assert_eq!(report.frames_captured, 3);
    assert!(report.source_error.is_none());
}

#[test]
fn test_session_acts_on_one_hit_only() {
    let frames = (0..6).map(|i| common::qr_frame(&format!("payload {i}")));
    let mut source = MemoryFrameSource::new(frames);
    let cancel = AtomicBool::new(false);
    let options = SessionOptions {
        analyzers: 3,
        max_frames: None,
    };
    let report = run_session(&mut source, &options, &cancel, |_| {}).unwrap();

    match report.outcome {
        SessionOutcome::Detected(text) => assert!(text.starts_with("payload "), "got: {text}"),
        other => panic!("expected a detection, got {other:?}"),
    }
    assert!(report.frames_analyzed >= 1);
    assert!(report.frames_captured <= 6);
}

#[test]
fn test_session_without_code_is_exhausted() {
    let mut source = MemoryFrameSource::new((0..4).map(|_| common::blank_frame()));
    let cancel = AtomicBool::new(false);
    let seen = AtomicUsize::new(0);
    let report = run_session(&mut source, &SessionOptions::default(), &cancel, |_| {
        seen.fetch_add(1, Ordering::Relaxed);
    })
    .unwrap();

    assert_eq!(report.outcome, SessionOutcome::Exhausted);
    assert_eq!(report.frames_captured, 4);
    assert_eq!(
        report.frames_analyzed + report.frames_dropped,
        report.frames_captured
    );
    assert_eq!(seen.load(Ordering::Relaxed) as u64, report.frames_analyzed);
}

#[test]
fn test_session_honours_max_frames() {
    let frames = (0..20).map(|_| common::blank_frame());
    let mut source = MemoryFrameSource::new(frames)
        .with_interval(std::time::Duration::from_millis(5));
    let cancel = AtomicBool::new(false);
    let options = SessionOptions {
        analyzers: 1,
        max_frames: Some(2),
    };
    let report = run_session(&mut source, &options, &cancel, |_| {}).unwrap();
    assert_eq!(report.outcome, SessionOutcome::Exhausted);
    assert_eq!(report.frames_analyzed, 2);
}

#[test]
fn test_session_max_frames_holds_across_analyzers() {
    for _ in 0..10 {
        let frames = (0..40).map(|_| common::blank_frame());
        let mut source = MemoryFrameSource::new(frames);
        let cancel = AtomicBool::new(false);
        let seen = AtomicUsize::new(0);
        let options = SessionOptions {
            analyzers: 4,
            max_frames: Some(2),
        };
        let report = run_session(&mut source, &options, &cancel, |_| {
            seen.fetch_add(1, Ordering::Relaxed);
        })
        .unwrap();
        assert_eq!(report.outcome, SessionOutcome::Exhausted);
        assert!(report.frames_analyzed <= 2, "analyzed {}", report.frames_analyzed);
        assert_eq!(seen.load(Ordering::Relaxed) as u64, report.frames_analyzed);
    }
}

#[test]
fn test_session_cancelled_mid_stream() {
    let frames = (0..200).map(|_| common::blank_frame());
    let mut source =
        MemoryFrameSource::new(frames).with_interval(std::time::Duration::from_millis(2));
    let cancel = AtomicBool::new(false);
    let report = run_session(&mut source, &SessionOptions::default(), &cancel, |_| {
        cancel.store(true, Ordering::Relaxed);
    })
    .unwrap();
    assert_eq!(report.outcome, SessionOutcome::Cancelled);
    assert!(report.frames_captured > 0);
    assert!(report.frames_captured < 200);
}

#[test]
fn test_session_cancelled_before_start() {
    let mut source = MemoryFrameSource::new([common::qr_frame("never seen")]);
    let cancel = AtomicBool::new(true);
    let report = run_session(&mut source, &SessionOptions::default(), &cancel, |_| {}).unwrap();
    assert_eq!(report.outcome, SessionOutcome::Cancelled);
    assert_eq!(report.frames_captured, 0);
}

struct FailingSource {
    served: usize,
}

impl FrameSource for FailingSource {
    fn next_frame(&mut self) -> qrlink_core::error::Result<Option<image::DynamicImage>> {
        if self.served == 0 {
            self.served += 1;
            return Ok(Some(common::blank_frame()));
        }
        Err(QrLinkError::Camera("device unplugged".into()))
    }

    fn describe(&self) -> String {
        "flaky camera".into()
    }
}

#[test]
fn test_session_reports_source_failure() {
    let mut source = FailingSource { served: 0 };
    let cancel = AtomicBool::new(false);
    let report = run_session(&mut source, &SessionOptions::default(), &cancel, |_| {}).unwrap();
    assert_eq!(report.outcome, SessionOutcome::Exhausted);
    let err = report.source_error.expect("source error recorded");
    assert!(err.contains("device unplugged"), "got: {err}");
}

#[test]
fn test_directory_source_replays_frames_in_name_order() {
    let dir = TempDir::new().unwrap();
    common::write_frame(dir.path(), "frame_002.png", &common::qr_frame("second"));
    common::write_frame(dir.path(), "frame_001.png", &common::blank_frame());
    std::fs::write(dir.path().join("README.txt"), "not a frame").unwrap();

    let mut source = DirectoryFrameSource::open(dir.path()).unwrap();
    assert_eq!(source.remaining(), 2);

    let cancel = AtomicBool::new(false);
    let report = run_session(&mut source, &SessionOptions::default(), &cancel, |_| {}).unwrap();
    assert_eq!(report.outcome, SessionOutcome::Detected("second".into()));
}
