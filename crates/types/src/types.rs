//! Core type definitions for the channel registry.
//!
//! - [`Access`]: capability tag restricting which operations a transaction
//!   may perform
//! - [`Descriptor`]: unique identifying key for a channel
//! - [`Address`], [`Channel`]: a route's addressing and throttle policy

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::codec::CodecError;

// ============================================================================
// Access Control
// ============================================================================

/// Access rights stamped on every transaction of an environment.
///
/// The level is fixed when the environment is opened: the control plane
/// opens with [`Access::Control`], the relay plane with [`Access::Relay`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Access {
    /// Full channel read/write and timestamp read.
    Control,
    /// Channel read and timestamp read/write.
    Relay,
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Access::Control => write!(f, "control"),
            Access::Relay => write!(f, "relay"),
        }
    }
}

// ============================================================================
// Descriptor
// ============================================================================

/// Unique identifying string for a channel (a rate-limited message route).
///
/// The raw byte representation of the string is used verbatim as the table
/// key, so channel iteration order (and therefore pagination order) is
/// ascending byte-lexicographic order of the descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Descriptor(String);

impl Descriptor {
    /// Creates a descriptor from a string value.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the descriptor string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the encoded table key: the raw bytes of the string.
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Decodes a table key back into a descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::DescriptorUtf8`] when the key bytes are not
    /// valid UTF-8.
    pub fn decode(data: &[u8]) -> Result<Self, CodecError> {
        let value = std::str::from_utf8(data)
            .map_err(|source| CodecError::DescriptorUtf8 { source })?;
        Ok(Self(value.to_string()))
    }
}

impl fmt::Display for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Descriptor {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for Descriptor {
    fn from(value: String) -> Self {
        Self(value)
    }
}

// ============================================================================
// Channel
// ============================================================================

/// A mail address with an optional display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    /// The mail address itself.
    pub email: String,
    /// Display name, if any.
    pub name: Option<String>,
}

/// Configuration record describing a route's addressing and throttle policy.
///
/// Stored keyed on its descriptor; the stored descriptor always equals the
/// lookup key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    /// Unique key of the route.
    pub descriptor: Descriptor,
    /// Bearer token the relay plane authenticates senders with.
    pub token: String,
    /// Address the relayed messages are sent from.
    pub sender: Address,
    /// Primary recipients.
    pub recipients: Vec<Address>,
    /// Carbon-copy recipients.
    pub cc: Vec<Address>,
    /// Blind-carbon-copy recipients.
    pub bcc: Vec<Address>,
    /// Delivery domain of the route.
    pub domain: String,
    /// Minimal period between two relayed messages, in seconds.
    ///
    /// Changing this value on an existing channel invalidates the route's
    /// observed rate-limit history.
    pub min_period: f32,
    /// Maximal accepted message size, in bytes.
    pub max_size: i32,
}
