//! Registry configuration.
//!
//! Loaded from TOML or built programmatically; values are validated at
//! construction time via the fallible builder, with post-deserialization
//! validation available through [`RegistryConfig::validate`].

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use snafu::Snafu;

/// Configuration validation error.
#[derive(Debug, Snafu)]
pub enum ConfigError {
    /// A configuration value is invalid.
    #[snafu(display("invalid config: {message}"))]
    Validation {
        /// Description of the validation failure.
        message: String,
    },
}

/// Minimum engine cache size: 1 MB.
const MIN_CACHE_SIZE_BYTES: usize = 1024 * 1024;

fn default_cache_size() -> usize {
    64 * 1024 * 1024
}

/// Configuration for a registry environment.
///
/// # Validation Rules
///
/// - `cache_size_bytes` must be >= 1 MB (1,048,576 bytes)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Directory holding the registry store. Must exist before the
    /// registry is initialized.
    pub data_dir: PathBuf,
    /// Engine page-cache size in bytes.
    #[serde(default = "default_cache_size")]
    pub cache_size_bytes: usize,
}

#[bon::bon]
impl RegistryConfig {
    /// Creates a registry configuration with validation.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] if `cache_size_bytes` < 1 MB.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use relaydb_types::RegistryConfig;
    /// let config = RegistryConfig::builder()
    ///     .data_dir("/var/lib/relaydb")
    ///     .build()
    ///     .expect("valid registry config");
    /// ```
    #[builder]
    pub fn new(
        #[builder(into)] data_dir: PathBuf,
        #[builder(default = default_cache_size())] cache_size_bytes: usize,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            data_dir,
            cache_size_bytes,
        };
        config.validate()?;
        Ok(config)
    }
}

impl RegistryConfig {
    /// Validates the configuration values.
    ///
    /// Call after deserialization to ensure values are within valid ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] if any value is out of range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cache_size_bytes < MIN_CACHE_SIZE_BYTES {
            return Err(ConfigError::Validation {
                message: format!(
                    "cache_size_bytes must be >= {} (1 MB), got {}",
                    MIN_CACHE_SIZE_BYTES, self.cache_size_bytes
                ),
            });
        }
        Ok(())
    }
}
