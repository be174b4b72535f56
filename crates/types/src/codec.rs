//! Serialization of stored registry values.
//!
//! Channel records are stored as postcard bytes; the format is opaque to
//! the rest of the registry, which only goes through [`encode`] and
//! [`decode`]. Decode failures are surfaced, never retried.

use serde::{de::DeserializeOwned, Serialize};
use snafu::Snafu;

/// Error raised when a stored value cannot be encoded or decoded.
#[derive(Debug, Snafu)]
pub enum CodecError {
    /// Encoding a record failed.
    #[snafu(display("failed to encode record: {source}"))]
    Encode {
        /// The underlying postcard error.
        source: postcard::Error,
    },

    /// Decoding stored record bytes failed.
    #[snafu(display("failed to decode record: {source}"))]
    Decode {
        /// The underlying postcard error.
        source: postcard::Error,
    },

    /// A stored timestamp did not have the fixed 8-byte width.
    #[snafu(display("invalid timestamp encoding: expected 8 bytes, got {actual}"))]
    TimestampWidth {
        /// Width of the stored value.
        actual: usize,
    },

    /// A stored key was not valid UTF-8.
    #[snafu(display("invalid descriptor encoding: {source}"))]
    DescriptorUtf8 {
        /// The underlying UTF-8 error.
        source: std::str::Utf8Error,
    },
}

/// Encodes a record to its stored byte representation.
///
/// # Errors
///
/// Returns [`CodecError::Encode`] if serialization fails.
pub fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, CodecError> {
    postcard::to_allocvec(value).map_err(|source| CodecError::Encode { source })
}

/// Decodes a record from its stored byte representation.
///
/// # Errors
///
/// Returns [`CodecError::Decode`] if deserialization fails.
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, CodecError> {
    postcard::from_bytes(bytes).map_err(|source| CodecError::Decode { source })
}
