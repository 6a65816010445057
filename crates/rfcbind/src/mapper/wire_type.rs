// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Remote field type tags.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Declared type of a remote field.
///
/// Discriminants are the remote library's `RFCTYPE` codes.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WireType {
    /// Fixed-length character field (`RFCTYPE_CHAR`).
    Char = 0,
    /// `YYYYMMDD` date (`RFCTYPE_DATE`).
    Date = 1,
    /// Packed decimal, exchanged as text (`RFCTYPE_BCD`).
    Bcd = 2,
    /// `HHMMSS` time (`RFCTYPE_TIME`).
    Time = 3,
    Table = 5,
    /// 4-byte integer (`RFCTYPE_INT`).
    Int = 8,
    Structure = 17,
    /// Variable-length string (`RFCTYPE_STRING`).
    String = 29,
    /// Variable-length byte string (`RFCTYPE_XSTRING`).
    XString = 30,
    /// 8-byte integer (`RFCTYPE_INT8`).
    Int8 = 31,
}

impl WireType {
    pub const ALL: [WireType; 10] = [
        Self::Char,
        Self::Date,
        Self::Bcd,
        Self::Time,
        Self::Table,
        Self::Int,
        Self::Structure,
        Self::String,
        Self::XString,
        Self::Int8,
    ];

    /// Native `RFCTYPE` code.
    pub fn code(self) -> u32 {
        self as u32
    }

    /// Convert a native `RFCTYPE` code. Types the engine does not marshal
    /// (floats, numeric text, ...) yield `None`.
    pub fn from_code(code: u32) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.code() == code)
    }

    /// Lower-case name, as used in configuration files.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Char => "char",
            Self::Date => "date",
            Self::Bcd => "bcd",
            Self::Time => "time",
            Self::Table => "table",
            Self::Int => "int",
            Self::Structure => "structure",
            Self::String => "string",
            Self::XString => "xstring",
            Self::Int8 => "int8",
        }
    }

    /// True for types whose values are fixed-width character buffers.
    pub fn is_fixed_length(self) -> bool {
        matches!(self, Self::Char)
    }
}

impl fmt::Display for WireType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
