//! Core types, codecs, and configuration for the RelayDB channel registry.
//!
//! This crate provides the foundational types used throughout the registry:
//! - The [`Access`] capability tag and [`Descriptor`] channel key
//! - [`Channel`] configuration records and their [`Address`] entries
//! - Millisecond [`Timestamp`] with its fixed-layout byte codec
//! - Record serialization via postcard
//! - Registry configuration

pub mod codec;
pub mod config;
pub mod timestamp;
pub mod types;

// Re-export commonly used types at crate root
pub use codec::CodecError;
pub use config::{ConfigError, RegistryConfig};
pub use timestamp::Timestamp;
pub use types::{Access, Address, Channel, Descriptor};
