use std::path::{Path, PathBuf};

use image::{DynamicImage, GrayImage, Luma};
use qrlink_core::config::EncodeConfig;
use qrlink_core::encode::generate;

/// A frame showing a QR code for `text`, small enough to decode quickly.
pub fn qr_frame(text: &str) -> DynamicImage {
    let config = EncodeConfig {
        size: 256,
        ..EncodeConfig::default()
    };
    let code = generate(text, &config).expect("encode test payload");
    DynamicImage::ImageLuma8(code.image)
}

/// A featureless light frame.
pub fn blank_frame() -> DynamicImage {
    DynamicImage::ImageLuma8(GrayImage::from_pixel(128, 128, Luma([235])))
}

/// Write `frame` as PNG into `dir` under `name`.
pub fn write_frame(dir: &Path, name: &str, frame: &DynamicImage) -> PathBuf {
    let path = dir.join(name);
    frame.save(&path).expect("write test frame");
    path
}
