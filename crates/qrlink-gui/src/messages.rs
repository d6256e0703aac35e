use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use qrlink_core::config::{AppConfig, EncodeConfig, RemoteConfig, StorageConfig};
use qrlink_core::remote::SendOutcome;
use qrlink_core::scan::SessionOptions;

use crate::states::ScanId;

/// Where a live scan pulls its frames from.
#[derive(Clone, Debug)]
pub enum ScanSource {
    Camera { index: u32 },
    /// A folder of images replayed as a stream.
    Frames { dir: PathBuf },
}

/// Commands sent from UI thread to worker thread.
pub enum WorkerCommand {
    /// Encode text and keep the image for a later save.
    Generate { text: String, config: EncodeConfig },

    /// Store the last generated image in the pictures directory.
    SaveImage { storage: StorageConfig },

    /// Decode a picked image file once.
    ScanImage { path: PathBuf },

    /// Start a live scan session; it runs until the first hit or `cancel`.
    StartScan {
        session: ScanId,
        source: ScanSource,
        options: SessionOptions,
        cancel: Arc<AtomicBool>,
    },

    SendRemote { text: String, remote: RemoteConfig },
    OpenLink { text: String },
    Share { text: String },
}

/// Results sent from worker thread back to UI thread.
pub enum WorkerResult {
    Generated { image: egui::ColorImage, modules: usize },
    ImageSaved { path: PathBuf },

    /// A payload was decoded from a picked file.
    Decoded { text: String },
    NotFound { message: String },

    /// First payload of live session `session`.
    ScanDetected { session: ScanId, text: String },
    /// Downscaled frame for the camera preview.
    Preview {
        session: ScanId,
        image: egui::ColorImage,
    },
    /// The live session ended without a payload.
    ScanStopped { session: ScanId, message: String },

    /// A folder of frames was picked to stand in for the camera.
    FramesFolderPicked { dir: PathBuf },
    ConfigImported { config: Box<AppConfig> },

    Sent { outcome: SendOutcome },
    Toast { message: String },
    Error { message: String },
    Log { message: String },
}
