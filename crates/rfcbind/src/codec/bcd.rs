// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use super::RfcString;
use crate::container::DataContainer;
use crate::error::{CodecError, CodecResult};
use bigdecimal::BigDecimal;
use std::fmt;
use std::str::FromStr;

/// Packed decimal field (`bcd`).
///
/// The container converts packed decimals to and from text, so the value
/// travels through the `string` codec in plain decimal notation with a `.`
/// separator and no grouping.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct RfcBcd(pub BigDecimal);

impl RfcBcd {
    /// Wrap a decimal value.
    pub fn new(value: BigDecimal) -> Self {
        Self(value)
    }

    /// Decimal value.
    pub fn value(&self) -> &BigDecimal {
        &self.0
    }

    /// Unwrap the decimal value.
    pub fn into_inner(self) -> BigDecimal {
        self.0
    }

    /// Write the value in plain notation through the `string` codec.
    pub fn set_field(&self, container: &dyn DataContainer, name: &str) -> CodecResult<()> {
        RfcString::new(self.to_string()).set_field(container, name)
    }

    /// Read and parse the field; `probe_len` is the first buffer size tried.
    pub fn get_field(
        container: &dyn DataContainer,
        name: &str,
        probe_len: usize,
    ) -> CodecResult<Self> {
        RfcString::get_field(container, name, probe_len)?.as_str().parse()
    }
}

impl From<BigDecimal> for RfcBcd {
    fn from(value: BigDecimal) -> Self {
        Self(value)
    }
}

impl FromStr for RfcBcd {
    type Err = CodecError;

    /// Surrounding blanks are ignored; an empty value is malformed.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(CodecError::MalformedDecimal(s.to_string()));
        }
        BigDecimal::from_str(trimmed)
            .map(Self)
            .map_err(|_| CodecError::MalformedDecimal(s.to_string()))
    }
}

impl fmt::Display for RfcBcd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_plain_string())
    }
}
