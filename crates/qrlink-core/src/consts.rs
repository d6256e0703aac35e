/// Edge length in pixels of a generated QR image.
pub const DEFAULT_QR_SIZE: u32 = 512;

/// Light modules around the symbol on every side, as ISO/IEC 18004 requires.
pub const DEFAULT_QUIET_ZONE: u32 = 4;

/// Endpoint of the bundled collector server.
pub const DEFAULT_REMOTE_ENDPOINT: &str = "http://127.0.0.1:8000/qr";

/// Content type of the remote send request body.
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// File name prefix for images stored in the pictures directory.
pub const SAVED_IMAGE_PREFIX: &str = "QRCode_";

/// Luma range under which a frame gets contrast-stretched before detection.
pub const LOW_CONTRAST_RANGE: u8 = 200;

/// Schemes accepted by web link detection.
pub const WEB_URL_SCHEMES: [&str; 3] = ["http", "https", "rtsp"];

/// How long a short-lived process keeps serving the clipboard selection on
/// Linux when no clipboard manager takes it over.
pub const CLIPBOARD_HOLD: std::time::Duration = std::time::Duration::from_secs(10);

/// Subject line of the share draft.
pub const SHARE_SUBJECT: &str = "QR Code";

/// Pixel value of a dark module.
pub const DARK: u8 = 0;

/// Pixel value of a light module.
pub const LIGHT: u8 = 255;
