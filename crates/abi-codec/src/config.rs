// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Codec limits.
//!
//! Supports both programmatic and file-based configuration. The limits
//! bound the work a single encode/decode may perform on untrusted input.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Limits applied while loading schemas and converting values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodecConfig {
    /// Maximum nesting of composite values (struct/array/optional/variant).
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Maximum element count accepted for a decoded array.
    #[serde(default = "default_max_array_len")]
    pub max_array_len: usize,

    /// Maximum depth of type-name resolution while loading a schema.
    #[serde(default = "default_max_resolve_depth")]
    pub max_resolve_depth: usize,
}

fn default_max_depth() -> usize {
    128
}

fn default_max_array_len() -> usize {
    1 << 20
}

fn default_max_resolve_depth() -> usize {
    32
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            max_array_len: default_max_array_len(),
            max_resolve_depth: default_max_resolve_depth(),
        }
    }
}

impl CodecConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_depth == 0 {
            return Err(ConfigError::Invalid("max_depth must be at least 1".into()));
        }
        if self.max_resolve_depth == 0 {
            return Err(ConfigError::Invalid(
                "max_resolve_depth must be at least 1".into(),
            ));
        }
        if self.max_array_len > u32::MAX as usize {
            return Err(ConfigError::Invalid(format!(
                "max_array_len {} exceeds the varuint32 range",
                self.max_array_len
            )));
        }
        Ok(())
    }
}
