// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Status record reported by the external container library.

use std::fmt;
use thiserror::Error;

/// Return codes of the remote function library (`RFC_RC`).
///
/// Discriminants match the native values so that a binding can convert a
/// raw code with [`ReturnCode::from_raw`].
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ReturnCode {
    #[default]
    Ok = 0,
    CommunicationFailure = 1,
    LogonFailure = 2,
    AbapRuntimeFailure = 3,
    AbapMessage = 4,
    AbapException = 5,
    Closed = 6,
    Canceled = 7,
    Timeout = 8,
    MemoryInsufficient = 9,
    VersionMismatch = 10,
    InvalidProtocol = 11,
    SerializationFailure = 12,
    InvalidHandle = 13,
    Retry = 14,
    ExternalFailure = 15,
    Executed = 16,
    NotFound = 17,
    NotSupported = 18,
    IllegalState = 19,
    InvalidParameter = 20,
    CodepageConversionFailure = 21,
    ConversionFailure = 22,
    BufferTooSmall = 23,
    TableMoveBof = 24,
    TableMoveEof = 25,
    StartSapguiFailure = 26,
    AbapClassException = 27,
    UnknownError = 28,
    AuthorizationFailure = 29,
}

impl ReturnCode {
    const ALL: [ReturnCode; 30] = [
        Self::Ok,
        Self::CommunicationFailure,
        Self::LogonFailure,
        Self::AbapRuntimeFailure,
        Self::AbapMessage,
        Self::AbapException,
        Self::Closed,
        Self::Canceled,
        Self::Timeout,
        Self::MemoryInsufficient,
        Self::VersionMismatch,
        Self::InvalidProtocol,
        Self::SerializationFailure,
        Self::InvalidHandle,
        Self::Retry,
        Self::ExternalFailure,
        Self::Executed,
        Self::NotFound,
        Self::NotSupported,
        Self::IllegalState,
        Self::InvalidParameter,
        Self::CodepageConversionFailure,
        Self::ConversionFailure,
        Self::BufferTooSmall,
        Self::TableMoveBof,
        Self::TableMoveEof,
        Self::StartSapguiFailure,
        Self::AbapClassException,
        Self::UnknownError,
        Self::AuthorizationFailure,
    ];

    /// Convert a raw native code. Unknown values yield `None`.
    pub fn from_raw(raw: u32) -> Option<Self> {
        Self::ALL.get(raw as usize).copied()
    }

    /// Native symbolic name (`RFC_OK`, `RFC_BUFFER_TOO_SMALL`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "RFC_OK",
            Self::CommunicationFailure => "RFC_COMMUNICATION_FAILURE",
            Self::LogonFailure => "RFC_LOGON_FAILURE",
            Self::AbapRuntimeFailure => "RFC_ABAP_RUNTIME_FAILURE",
            Self::AbapMessage => "RFC_ABAP_MESSAGE",
            Self::AbapException => "RFC_ABAP_EXCEPTION",
            Self::Closed => "RFC_CLOSED",
            Self::Canceled => "RFC_CANCELED",
            Self::Timeout => "RFC_TIMEOUT",
            Self::MemoryInsufficient => "RFC_MEMORY_INSUFFICIENT",
            Self::VersionMismatch => "RFC_VERSION_MISMATCH",
            Self::InvalidProtocol => "RFC_INVALID_PROTOCOL",
            Self::SerializationFailure => "RFC_SERIALIZATION_FAILURE",
            Self::InvalidHandle => "RFC_INVALID_HANDLE",
            Self::Retry => "RFC_RETRY",
            Self::ExternalFailure => "RFC_EXTERNAL_FAILURE",
            Self::Executed => "RFC_EXECUTED",
            Self::NotFound => "RFC_NOT_FOUND",
            Self::NotSupported => "RFC_NOT_SUPPORTED",
            Self::IllegalState => "RFC_ILLEGAL_STATE",
            Self::InvalidParameter => "RFC_INVALID_PARAMETER",
            Self::CodepageConversionFailure => "RFC_CODEPAGE_CONVERSION_FAILURE",
            Self::ConversionFailure => "RFC_CONVERSION_FAILURE",
            Self::BufferTooSmall => "RFC_BUFFER_TOO_SMALL",
            Self::TableMoveBof => "RFC_TABLE_MOVE_BOF",
            Self::TableMoveEof => "RFC_TABLE_MOVE_EOF",
            Self::StartSapguiFailure => "RFC_START_SAPGUI_FAILURE",
            Self::AbapClassException => "RFC_ABAP_CLASS_EXCEPTION",
            Self::UnknownError => "RFC_UNKNOWN_ERROR",
            Self::AuthorizationFailure => "RFC_AUTHORIZATION_FAILURE",
        }
    }
}

impl fmt::Display for ReturnCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error groups of the remote function library (`RFC_ERROR_GROUP`).
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ErrorGroup {
    #[default]
    Ok = 0,
    AbapApplicationFailure = 1,
    AbapRuntimeFailure = 2,
    LogonFailure = 3,
    CommunicationFailure = 4,
    ExternalRuntimeFailure = 5,
    ExternalApplicationFailure = 6,
    ExternalAuthorizationFailure = 7,
}

/// Error record filled in by every container operation (`RFC_ERROR_INFO`).
#[derive(Debug, Clone, PartialEq, Eq, Default, Error)]
#[error("{code}: {message}")]
pub struct ErrorInfo {
    pub code: ReturnCode,
    pub group: ErrorGroup,
    pub key: String,
    pub message: String,
    pub abap_msg_class: String,
    pub abap_msg_type: String,
    pub abap_msg_number: String,
    pub abap_msg_v1: String,
    pub abap_msg_v2: String,
    pub abap_msg_v3: String,
    pub abap_msg_v4: String,
}

impl ErrorInfo {
    /// Build an error raised locally by a container implementation.
    pub fn new(code: ReturnCode, message: impl Into<String>) -> Self {
        Self {
            code,
            group: ErrorGroup::ExternalRuntimeFailure,
            key: code.as_str().to_string(),
            message: message.into(),
            ..Self::default()
        }
    }

    /// True for `RFC_OK`.
    pub fn is_ok(&self) -> bool {
        self.code == ReturnCode::Ok
    }
}
