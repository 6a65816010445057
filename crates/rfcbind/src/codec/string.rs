// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use super::read_probed;
use crate::container::{from_sap, to_sap, DataContainer};
use crate::error::CodecResult;
use std::fmt;

/// Variable-length string field (`string`).
///
/// Written verbatim with its own length. Reads start with a probe buffer of
/// the given size and retry once with the size the container reports.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct RfcString(pub String);

impl RfcString {
    /// Wrap a text value.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Text value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Unwrap the text value.
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Write the whole value with its own length.
    pub fn set_field(&self, container: &dyn DataContainer, name: &str) -> CodecResult<()> {
        container.set_string(name, &to_sap(&self.0))?;
        Ok(())
    }

    /// Read the field, retrying once with the reported length.
    pub fn get_field(
        container: &dyn DataContainer,
        name: &str,
        probe_len: usize,
    ) -> CodecResult<Self> {
        let units = read_probed(name, probe_len, |buf| container.get_string(name, buf))?;
        Ok(Self(from_sap(&units)))
    }
}

impl fmt::Display for RfcString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Variable-length byte string field (`xstring`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct RfcXString(pub Vec<u8>);

impl RfcXString {
    /// Wrap a byte value.
    pub fn new(value: impl Into<Vec<u8>>) -> Self {
        Self(value.into())
    }

    /// Byte value.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Unwrap the byte value.
    pub fn into_inner(self) -> Vec<u8> {
        self.0
    }

    /// Write the whole value with its own length.
    pub fn set_field(&self, container: &dyn DataContainer, name: &str) -> CodecResult<()> {
        container.set_xstring(name, &self.0)?;
        Ok(())
    }

    /// Read the field, retrying once with the reported length.
    pub fn get_field(
        container: &dyn DataContainer,
        name: &str,
        probe_len: usize,
    ) -> CodecResult<Self> {
        let bytes = read_probed(name, probe_len, |buf| container.get_xstring(name, buf))?;
        Ok(Self(bytes))
    }
}
