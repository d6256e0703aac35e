use std::path::Path;

use tracing::{debug, info};

use crate::decode::{decode_image, ScanOutcome};
use crate::error::Result;
use crate::io::image_io::load_image;

/// Decode a QR code from a picked image file, once.
pub fn scan_file(path: &Path) -> Result<ScanOutcome> {
    let image = load_image(path)?;
    debug!(
        path = %path.display(),
        width = image.width(),
        height = image.height(),
        "scanning image file"
    );

    let outcome = decode_image(&image)?;
    match &outcome {
        ScanOutcome::Found(text) => info!(chars = text.chars().count(), "QR code found in image"),
        ScanOutcome::NotFound => info!(path = %path.display(), "no QR code found in image"),
    }
    Ok(outcome)
}
