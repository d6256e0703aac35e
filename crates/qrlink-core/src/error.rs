use thiserror::Error;

#[derive(Error, Debug)]
pub enum QrLinkError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image format error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Nothing to encode: input text is empty")]
    EmptyInput,

    #[error("Failed to encode QR code: {0}")]
    Encode(String),

    #[error("Failed to process image: {0}")]
    Decode(String),

    #[error("Camera error: {0}")]
    Camera(String),

    #[error("Not a link: {0}")]
    NotAUrl(String),

    #[error("Clipboard error: {0}")]
    Clipboard(String),

    #[error("Failed to launch {target}: {reason}")]
    Launch { target: String, reason: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, QrLinkError>;
