// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! BAPI return messages.
//!
//! Business API functions report their outcome in a `RETURN` parameter of
//! type `BAPIRET2` (or one of its predecessors). [`BapiReturn`] covers the
//! fields common to all of them.

use crate::error::Result;
use crate::field;
use crate::mapper::{Alignment, RfcMapper, WireType};
use std::fmt;

/// Severity of a BAPI message (`TYPE` field).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BapiMessageType {
    Success,
    Error,
    Warning,
    Info,
    Abort,
}

impl BapiMessageType {
    /// Parse the one-letter code (`S`, `E`, `W`, `I`, `A`).
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "S" => Some(Self::Success),
            "E" => Some(Self::Error),
            "W" => Some(Self::Warning),
            "I" => Some(Self::Info),
            "A" => Some(Self::Abort),
            _ => None,
        }
    }

    /// One-letter code.
    pub fn code(self) -> &'static str {
        match self {
            Self::Success => "S",
            Self::Error => "E",
            Self::Warning => "W",
            Self::Info => "I",
            Self::Abort => "A",
        }
    }

    /// True for `E` and `A`.
    pub fn is_error(self) -> bool {
        matches!(self, Self::Error | Self::Abort)
    }
}

impl fmt::Display for BapiMessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Standard BAPI return structure.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BapiReturn {
    pub message_type: Option<String>,
    pub code: Option<String>,
    pub message: Option<String>,
    pub log_no: Option<String>,
    pub log_msg_no: Option<String>,
    pub message_v1: Option<String>,
    pub message_v2: Option<String>,
    pub message_v3: Option<String>,
    pub message_v4: Option<String>,
}

impl BapiReturn {
    /// Parsed message type; `None` when blank or unknown.
    pub fn kind(&self) -> Option<BapiMessageType> {
        self.message_type.as_deref().and_then(BapiMessageType::from_code)
    }

    /// True for `E` and `A` messages.
    pub fn is_error(&self) -> bool {
        self.kind().is_some_and(BapiMessageType::is_error)
    }

    /// Message text without trailing padding.
    pub fn text(&self) -> &str {
        self.message.as_deref().map_or("", str::trim_end)
    }
}

impl fmt::Display for BapiReturn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind() {
            Some(kind) => write!(f, "[{}] {}", kind, self.text()),
            None => f.write_str(self.text()),
        }
    }
}

impl RfcMapper {
    /// Register [`BapiReturn`] with the `BAPIRET2` layout.
    pub fn map_bapi_return(&mut self) -> Result<()> {
        let mut b = self.register::<BapiReturn>();
        let layout = [
            (field!(BapiReturn, message_type), "TYPE", 1),
            (field!(BapiReturn, code), "CODE", 5),
            (field!(BapiReturn, message), "MESSAGE", 220),
            (field!(BapiReturn, log_no), "LOG_NO", 20),
            (field!(BapiReturn, log_msg_no), "LOG_MSG_NO", 6),
            (field!(BapiReturn, message_v1), "MESSAGE_V1", 50),
            (field!(BapiReturn, message_v2), "MESSAGE_V2", 50),
            (field!(BapiReturn, message_v3), "MESSAGE_V3", 50),
            (field!(BapiReturn, message_v4), "MESSAGE_V4", 50),
        ];
        for (selector, wire_name, length) in layout {
            b.field(selector)?
                .wire_name(wire_name)
                .wire_type(WireType::Char)
                .length(length)
                .alignment(Alignment::Left, ' ');
        }
        Ok(())
    }
}
