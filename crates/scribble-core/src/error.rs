//! Error types shared by every scribble crate.

use thiserror::Error;

/// Result alias for surface, codec, and persistence operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Stored data is not a usable `data:image/...;base64,` URL.
    #[error("malformed encoded image: {0}")]
    MalformedImage(String),

    /// The data URL names a media type the codec cannot decode.
    #[error("unsupported media type `{0}`")]
    UnsupportedMediaType(String),

    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("image codec failed: {0}")]
    Image(#[from] image::ImageError),

    /// The host's own encode/decode/draw primitive reported a failure.
    #[error("surface operation failed: {0}")]
    Surface(String),
}
