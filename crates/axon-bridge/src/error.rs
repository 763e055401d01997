//! Bridge error types

use thiserror::Error;

/// Why a prefix-matched payload could not be decoded.
///
/// Every variant resolves to the `invalid` wire response at the bridge
/// boundary; nothing here propagates into host-wide error handling.
#[derive(Error, Debug)]
pub enum PayloadError {
    #[error("Base64 decode failed: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Decoded payload is {size} bytes, ceiling is {ceiling}")]
    Oversized { size: usize, ceiling: usize },

    #[error("Decoded payload is not valid UTF-8: {0}")]
    NotUtf8(#[from] std::string::FromUtf8Error),
}
