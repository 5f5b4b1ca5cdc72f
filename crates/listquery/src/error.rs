//! Error types for the listquery crate.

use thiserror::Error;

/// Errors raised while decoding an encoded filter or sort parameter.
///
/// Only the strict decoders surface these. The request-level constructors on
/// [`ListQuery`](crate::ListQuery) log them and fall back to defaults.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The percent-escaped text did not decode to UTF-8.
    #[error("invalid percent-encoding: {0}")]
    Unescape(#[from] std::string::FromUtf8Error),

    /// The payload is not standard base64.
    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),

    /// The decoded bytes are not the expected JSON shape.
    #[error("invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for decoding operations.
pub type Result<T> = std::result::Result<T, DecodeError>;
