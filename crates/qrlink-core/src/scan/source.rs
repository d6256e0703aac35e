use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use image::DynamicImage;
use tracing::debug;

use crate::error::Result;
use crate::io::image_io::load_image;

/// A stream of captured frames, pulled by a scan session.
pub trait FrameSource {
    /// The next frame, or `None` once the stream has ended.
    fn next_frame(&mut self) -> Result<Option<DynamicImage>>;

    /// Human-readable name for logs and status lines.
    fn describe(&self) -> String;
}

impl<S: FrameSource + ?Sized> FrameSource for Box<S> {
    fn next_frame(&mut self) -> Result<Option<DynamicImage>> {
        (**self).next_frame()
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

const FRAME_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "gif", "webp"];

/// Sleeps so that consecutive frames are at least `interval` apart.
#[derive(Debug, Default)]
struct Pacer {
    interval: Option<Duration>,
    last: Option<Instant>,
}

impl Pacer {
    fn wait(&mut self) {
        if let (Some(interval), Some(last)) = (self.interval, self.last) {
            let elapsed = last.elapsed();
            if elapsed < interval {
                std::thread::sleep(interval - elapsed);
            }
        }
        self.last = Some(Instant::now());
    }
}

/// Replays the image files of a directory, in file name order, as a stream.
pub struct DirectoryFrameSource {
    dir: PathBuf,
    files: VecDeque<PathBuf>,
    pacer: Pacer,
}

impl DirectoryFrameSource {
    pub fn open(dir: &Path) -> Result<Self> {
        let mut files: Vec<PathBuf> = std::fs::read_dir(dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.is_file() && is_frame_file(path))
            .collect();
        files.sort();

        debug!(dir = %dir.display(), frames = files.len(), "frame directory opened");
        Ok(Self {
            dir: dir.to_path_buf(),
            files: files.into(),
            pacer: Pacer::default(),
        })
    }

    /// Emit at most `fps` frames per second.
    pub fn with_fps(mut self, fps: f32) -> Self {
        if fps > 0.0 {
            self.pacer.interval = Some(Duration::from_secs_f32(1.0 / fps));
        }
        self
    }

    pub fn remaining(&self) -> usize {
        self.files.len()
    }
}

fn is_frame_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| FRAME_EXTENSIONS.iter().any(|f| f.eq_ignore_ascii_case(ext)))
}

impl FrameSource for DirectoryFrameSource {
    fn next_frame(&mut self) -> Result<Option<DynamicImage>> {
        let Some(path) = self.files.pop_front() else {
            return Ok(None);
        };
        self.pacer.wait();
        load_image(&path).map(Some)
    }

    fn describe(&self) -> String {
        format!("frames in {}", self.dir.display())
    }
}

/// Frames already held in memory.
#[derive(Default)]
pub struct MemoryFrameSource {
    frames: VecDeque<DynamicImage>,
    pacer: Pacer,
}

impl MemoryFrameSource {
    pub fn new(frames: impl IntoIterator<Item = DynamicImage>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
            pacer: Pacer::default(),
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.pacer.interval = Some(interval);
        self
    }
}

impl FrameSource for MemoryFrameSource {
    fn next_frame(&mut self) -> Result<Option<DynamicImage>> {
        let frame = self.frames.pop_front();
        if frame.is_some() {
            self.pacer.wait();
        }
        Ok(frame)
    }

    fn describe(&self) -> String {
        format!("{} in-memory frames", self.frames.len())
    }
}

#[cfg(feature = "camera")]
pub use camera::CameraFrameSource;

#[cfg(feature = "camera")]
mod camera {
    use image::{DynamicImage, RgbImage};
    use nokhwa::pixel_format::RgbFormat;
    use nokhwa::utils::{CameraIndex, RequestedFormat, RequestedFormatType};
    use nokhwa::Camera;
    use tracing::{info, warn};

    use super::FrameSource;
    use crate::error::{QrLinkError, Result};

    /// Live frames from a local camera.
    pub struct CameraFrameSource {
        camera: Camera,
        index: u32,
    }

    impl CameraFrameSource {
        /// Open camera `index` at its highest frame rate and start streaming.
        pub fn open(index: u32) -> Result<Self> {
            let requested =
                RequestedFormat::new::<RgbFormat>(RequestedFormatType::AbsoluteHighestFrameRate);
            let mut camera = Camera::new(CameraIndex::Index(index), requested)
                .map_err(|e| QrLinkError::Camera(e.to_string()))?;
            camera
                .open_stream()
                .map_err(|e| QrLinkError::Camera(e.to_string()))?;

            info!(index, format = ?camera.camera_format(), "camera stream opened");
            Ok(Self { camera, index })
        }
    }

    impl FrameSource for CameraFrameSource {
        fn next_frame(&mut self) -> Result<Option<DynamicImage>> {
            let buffer = self
                .camera
                .frame()
                .map_err(|e| QrLinkError::Camera(e.to_string()))?;
            let decoded = buffer
                .decode_image::<RgbFormat>()
                .map_err(|e| QrLinkError::Camera(e.to_string()))?;

            let (width, height) = (decoded.width(), decoded.height());
            let rgb = RgbImage::from_raw(width, height, decoded.into_raw()).ok_or_else(|| {
                QrLinkError::Camera(format!("short frame buffer for {width}x{height}"))
            })?;
            Ok(Some(DynamicImage::ImageRgb8(rgb)))
        }

        fn describe(&self) -> String {
            format!("camera #{}", self.index)
        }
    }

    impl Drop for CameraFrameSource {
        fn drop(&mut self) {
            if let Err(e) = self.camera.stop_stream() {
                warn!(index = self.index, "failed to stop camera stream: {e}");
            }
        }
    }
}
