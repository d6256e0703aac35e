pub mod gallery;
pub mod latest;
pub mod session;
pub mod source;

pub use gallery::scan_file;
pub use latest::LatestFrame;
pub use session::{run_session, ScanLatch, SessionOptions, SessionOutcome, SessionReport};
pub use source::{DirectoryFrameSource, FrameSource, MemoryFrameSource};

#[cfg(feature = "camera")]
pub use source::CameraFrameSource;
