use image::{DynamicImage, GrayImage};
use tracing::debug;

use crate::consts::LOW_CONTRAST_RANGE;
use crate::error::{QrLinkError, Result};

/// Result of looking for a QR code in one image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScanOutcome {
    /// First non-empty payload found in the image.
    Found(String),
    NotFound,
}

impl ScanOutcome {
    pub fn found(&self) -> Option<&str> {
        match self {
            Self::Found(text) => Some(text),
            Self::NotFound => None,
        }
    }
}

/// Decode the first QR code in a color or grayscale image.
pub fn decode_image(image: &DynamicImage) -> Result<ScanOutcome> {
    decode_luma(image.to_luma8())
}

/// Decode the first QR code in an 8-bit grayscale image.
///
/// Grids that fail to decode are skipped. When grids were detected but none
/// of them decoded, the image counts as unreadable rather than empty.
pub fn decode_luma(mut image: GrayImage) -> Result<ScanOutcome> {
    stretch_contrast(&mut image);

    let mut prepared = rqrr::PreparedImage::prepare(image);
    let grids = prepared.detect_grids();
    debug!(grids = grids.len(), "QR grids detected");

    if grids.is_empty() {
        return Ok(ScanOutcome::NotFound);
    }

    let mut last_error = None;
    for grid in &grids {
        match grid.decode() {
            Ok((_meta, content)) if !content.is_empty() => {
                return Ok(ScanOutcome::Found(content));
            }
            Ok(_) => {}
            Err(e) => last_error = Some(format!("{e:?}")),
        }
    }

    match last_error {
        Some(reason) => Err(QrLinkError::Decode(reason)),
        None => Ok(ScanOutcome::NotFound),
    }
}

/// Stretch a washed-out frame to the full 0..=255 range in place.
fn stretch_contrast(image: &mut GrayImage) {
    let (min, max) = image
        .pixels()
        .fold((u8::MAX, u8::MIN), |(lo, hi), p| (lo.min(p[0]), hi.max(p[0])));
    let range = max.saturating_sub(min);
    if range == 0 || range >= LOW_CONTRAST_RANGE {
        return;
    }

    let scale = 255.0 / range as f32;
    for pixel in image.pixels_mut() {
        pixel[0] = ((pixel[0] - min) as f32 * scale).round().min(255.0) as u8;
    }
}
