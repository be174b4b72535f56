//! Millisecond-resolution UTC timestamps and their storage codec.
//!
//! The registry stores, per descriptor, the instant of the last accepted
//! relay as milliseconds since the Unix epoch. On disk a timestamp is a
//! fixed 8-byte little-endian unsigned integer; the codec is an exact
//! bit-for-bit round trip over the full `u64` range.

use std::fmt;

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::codec::CodecError;

/// Width of an encoded timestamp in the store.
pub const ENCODED_LEN: usize = 8;

/// Milliseconds since the Unix epoch, UTC.
///
/// A timestamp present in the registry is always strictly positive; zero is
/// representable by the codec but never stored.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Timestamp(u64);

impl Timestamp {
    /// Creates a timestamp from a raw millisecond count.
    #[inline]
    pub const fn new(millis: u64) -> Self {
        Self(millis)
    }

    /// Returns the raw millisecond count.
    #[inline]
    pub const fn millis(self) -> u64 {
        self.0
    }

    /// Whether the timestamp lies strictly after the epoch.
    #[inline]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Encodes the timestamp as fixed-width little-endian bytes.
    pub const fn encode(self) -> [u8; ENCODED_LEN] {
        self.0.to_le_bytes()
    }

    /// Decodes a timestamp from its fixed-width little-endian encoding.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::TimestampWidth`] when `data` is not exactly
    /// eight bytes.
    pub fn decode(data: &[u8]) -> Result<Self, CodecError> {
        let bytes: [u8; ENCODED_LEN] = data
            .try_into()
            .map_err(|_| CodecError::TimestampWidth { actual: data.len() })?;
        Ok(Self(u64::from_le_bytes(bytes)))
    }

    /// Converts to the corresponding UTC instant: epoch + floor(ms/1000)
    /// seconds + (ms mod 1000) milliseconds.
    ///
    /// Returns `None` for millisecond counts beyond the representable
    /// calendar range.
    pub fn to_datetime(self) -> Option<DateTime<Utc>> {
        let millis = i64::try_from(self.0).ok()?;
        Utc.timestamp_millis_opt(millis).single()
    }

    /// Converts a UTC instant to a timestamp, truncating to millisecond
    /// resolution.
    ///
    /// Returns `None` for instants before the epoch.
    pub fn from_datetime(instant: DateTime<Utc>) -> Option<Self> {
        u64::try_from(instant.timestamp_millis()).ok().map(Self)
    }
}

impl From<u64> for Timestamp {
    #[inline]
    fn from(millis: u64) -> Self {
        Self(millis)
    }
}

impl From<Timestamp> for u64 {
    #[inline]
    fn from(timestamp: Timestamp) -> Self {
        timestamp.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}
