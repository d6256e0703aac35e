use std::path::{Path, PathBuf};

use image::{DynamicImage, GrayImage, ImageFormat};
use tracing::info;

use crate::config::StorageConfig;
use crate::consts::SAVED_IMAGE_PREFIX;
use crate::error::Result;

/// Load any supported image file.
pub fn load_image(path: &Path) -> Result<DynamicImage> {
    Ok(image::open(path)?)
}

/// Save a grayscale image as PNG regardless of the path's extension.
pub fn save_png(image: &GrayImage, path: &Path) -> Result<()> {
    image.save_with_format(path, ImageFormat::Png)?;
    Ok(())
}

/// `QRCode_<millis>.png`
pub fn timestamped_name(millis: i64) -> String {
    format!("{SAVED_IMAGE_PREFIX}{millis}.png")
}

/// Directory saved QR images go to.
///
/// The configured directory wins, then the platform pictures directory,
/// then `~/Pictures`, then the working directory.
pub fn pictures_dir(config: &StorageConfig) -> PathBuf {
    if let Some(ref dir) = config.pictures_dir {
        return dir.clone();
    }
    dirs::picture_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join("Pictures")))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Store `image` as a timestamped PNG in the pictures directory.
pub fn save_to_pictures(image: &GrayImage, config: &StorageConfig) -> Result<PathBuf> {
    let dir = pictures_dir(config);
    std::fs::create_dir_all(&dir)?;

    let millis = chrono::Utc::now().timestamp_millis();
    let path = dir.join(timestamped_name(millis));
    save_png(image, &path)?;

    info!(path = %path.display(), "QR image saved");
    Ok(path)
}
