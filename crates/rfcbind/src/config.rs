// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Marshaling configuration.
//!
//! Supports both programmatic and file-based configuration. A file tunes the
//! probe buffer sizes used for variable-length fields and can override the
//! wire layout of fields that were registered in code:
//!
//! ```toml
//! string_probe_len = 256
//!
//! [[overrides]]
//! record = "GlBalanceInput"
//! property = "company_code"
//! wire_name = "COMP_CODE"
//! length = 4
//! alignment = "left"
//! padding = "0"
//! ```

use crate::mapper::{Alignment, WireType};
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

/// Marshaling configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarshalConfig {
    /// Initial buffer size (UTF-16 units) when reading `string` fields.
    #[serde(default = "default_probe_len")]
    pub string_probe_len: usize,

    /// Initial buffer size (bytes) when reading `xstring` fields.
    #[serde(default = "default_probe_len")]
    pub xstring_probe_len: usize,

    /// Field layout overrides applied to registered types.
    #[serde(default)]
    pub overrides: Vec<FieldOverride>,
}

fn default_probe_len() -> usize {
    1024
}

impl Default for MarshalConfig {
    fn default() -> Self {
        Self {
            string_probe_len: default_probe_len(),
            xstring_probe_len: default_probe_len(),
            overrides: Vec::new(),
        }
    }
}

impl MarshalConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.string_probe_len == 0 {
            return Err(ConfigError::Invalid(
                "string_probe_len must be greater than zero".into(),
            ));
        }
        if self.xstring_probe_len == 0 {
            return Err(ConfigError::Invalid(
                "xstring_probe_len must be greater than zero".into(),
            ));
        }

        for (i, ov) in self.overrides.iter().enumerate() {
            if ov.record.is_empty() || ov.property.is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "Override {} needs both record and property",
                    i
                )));
            }
            if ov.padding.is_some_and(|c| u16::try_from(u32::from(c)).is_err()) {
                return Err(ConfigError::Invalid(format!(
                    "Override {} ({}.{}) has padding outside the basic multilingual plane",
                    i, ov.record, ov.property
                )));
            }
            if ov.wire_name.as_deref() == Some("") {
                return Err(ConfigError::Invalid(format!(
                    "Override {} ({}.{}) has empty wire_name",
                    i, ov.record, ov.property
                )));
            }
        }

        Ok(())
    }

    /// Add a field override.
    pub fn add_override(&mut self, field: FieldOverride) {
        self.overrides.push(field);
    }
}

/// Layout override for one registered field.
///
/// `record` is the short type name of the record (`GlBalanceInput`) or, when
/// two registered records share a short name, the full type path;
/// `property` is the Rust field name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldOverride {
    pub record: String,
    pub property: String,
    #[serde(default)]
    pub wire_name: Option<String>,
    #[serde(default)]
    pub wire_type: Option<WireType>,
    #[serde(default)]
    pub length: Option<usize>,
    #[serde(default)]
    pub alignment: Option<Alignment>,
    #[serde(default)]
    pub padding: Option<char>,
}

impl FieldOverride {
    /// Override targeting `record.property` that changes nothing yet.
    pub fn new(record: impl Into<String>, property: impl Into<String>) -> Self {
        Self {
            record: record.into(),
            property: property.into(),
            wire_name: None,
            wire_type: None,
            length: None,
            alignment: None,
            padding: None,
        }
    }

    /// Replace the wire name.
    pub fn wire_name(mut self, name: impl Into<String>) -> Self {
        self.wire_name = Some(name.into());
        self
    }

    /// Replace the wire type.
    pub fn wire_type(mut self, wire_type: WireType) -> Self {
        self.wire_type = Some(wire_type);
        self
    }

    /// Replace the fixed `char` length.
    pub fn length(mut self, length: usize) -> Self {
        self.length = Some(length);
        self
    }

    /// Replace alignment and padding.
    pub fn alignment(mut self, alignment: Alignment, padding: char) -> Self {
        self.alignment = Some(alignment);
        self.padding = Some(padding);
        self
    }
}
