//! Configuration for KLV streams
//!
//! The key width is not carried in the stream itself, so the encoder and the
//! decoder of one stream must agree on it out of band.

use crate::error::{KlvError, Result};

/// Default key width: 16 bytes, the size of a SMPTE universal label
pub const DEFAULT_KEY_WIDTH: usize = 16;

/// Default upper bound for a single value (16 MB)
pub const DEFAULT_MAX_VALUE_LENGTH: u64 = 16 * 1024 * 1024;

/// Parameters shared by the encoder and decoder of a stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecConfig {
    // -------------------------------------------------------------------------
    // Format Configuration
    // -------------------------------------------------------------------------
    /// Fixed key width in bytes
    pub key_width: usize,

    // -------------------------------------------------------------------------
    // Resource Limits
    // -------------------------------------------------------------------------
    /// Largest value length the decoder will allocate for.
    /// Larger declared lengths are rejected before reading the value.
    pub max_value_length: u64,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            key_width: DEFAULT_KEY_WIDTH,
            max_value_length: DEFAULT_MAX_VALUE_LENGTH,
        }
    }
}

impl CodecConfig {
    /// Create a config with the given key width and default limits
    pub fn new(key_width: usize) -> Self {
        Self {
            key_width,
            ..Self::default()
        }
    }

    /// Create a new config builder
    pub fn builder() -> CodecConfigBuilder {
        CodecConfigBuilder::default()
    }

    /// Check that the config describes a usable stream
    pub fn validate(&self) -> Result<()> {
        if self.key_width == 0 {
            return Err(KlvError::Config("key width must be positive".to_string()));
        }
        Ok(())
    }
}

/// Builder for CodecConfig
#[derive(Default)]
pub struct CodecConfigBuilder {
    config: CodecConfig,
}

impl CodecConfigBuilder {
    /// Set the key width (in bytes)
    pub fn key_width(mut self, width: usize) -> Self {
        self.config.key_width = width;
        self
    }

    /// Set the maximum value length (in bytes)
    pub fn max_value_length(mut self, max: u64) -> Self {
        self.config.max_value_length = max;
        self
    }

    pub fn build(self) -> CodecConfig {
        self.config
    }
}
