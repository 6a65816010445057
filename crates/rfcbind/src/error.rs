// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Error taxonomy of the marshaling engine.

use crate::container::ErrorInfo;
use crate::mapper::{FieldDescriptor, WireType};
use std::fmt;
use thiserror::Error;

/// Identifies the field being processed when an error occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRef {
    /// Application-side property name.
    pub property: String,
    /// Remote field name.
    pub wire_name: String,
}

impl FieldRef {
    /// Reference to `property`, sent as `wire_name`.
    pub fn new(property: impl Into<String>, wire_name: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            wire_name: wire_name.into(),
        }
    }
}

impl From<&FieldDescriptor> for FieldRef {
    fn from(descriptor: &FieldDescriptor) -> Self {
        Self::new(descriptor.property(), descriptor.wire_name())
    }
}

impl fmt::Display for FieldRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.property, self.wire_name)
    }
}

/// Errors raised while registering schemas or marshaling records.
#[derive(Debug, Error)]
pub enum MarshalError {
    #[error(
        "no schema registered for type {type_name}{}",
        field.as_ref().map(|f| format!(" (field {})", f)).unwrap_or_default()
    )]
    SchemaNotFound {
        type_name: String,
        /// Structure or table field that refers to the type, if any.
        field: Option<FieldRef>,
    },

    #[error("invalid field selector {selector:?} on {type_name}: {reason}")]
    InvalidFieldSelector {
        type_name: String,
        selector: String,
        reason: String,
    },

    #[error(
        "unsupported wire type {} for field {field}",
        wire_type.as_ref().map_or("<unset>", |w| w.as_str())
    )]
    UnsupportedWireType {
        field: FieldRef,
        wire_type: Option<WireType>,
    },

    #[error("field {field} has no fixed length")]
    MissingLength { field: FieldRef },

    #[error("malformed date {value:?} in field {field}")]
    MalformedDate { field: FieldRef, value: String },

    #[error("malformed time {value:?} in field {field}")]
    MalformedTime { field: FieldRef, value: String },

    #[error("malformed decimal {value:?} in field {field}")]
    MalformedDecimal { field: FieldRef, value: String },

    #[error("field {field} still too large after resizing buffer to {required} units")]
    BufferRetryExhausted { field: FieldRef, required: usize },

    #[error("container operation on field {field} failed: {source}")]
    ContainerOperationFailed {
        field: FieldRef,
        #[source]
        source: ErrorInfo,
    },
}

impl MarshalError {
    pub(crate) fn schema_not_found(type_name: impl Into<String>) -> Self {
        MarshalError::SchemaNotFound {
            type_name: type_name.into(),
            field: None,
        }
    }

    /// Attach the structure or table field through which a nested record
    /// type was looked up. Errors that already name a field are kept.
    pub(crate) fn via(self, field: &FieldDescriptor) -> Self {
        match self {
            MarshalError::SchemaNotFound {
                type_name,
                field: None,
            } => MarshalError::SchemaNotFound {
                type_name,
                field: Some(field.into()),
            },
            other => other,
        }
    }

    /// Wraps a failed container call on `field`.
    pub(crate) fn container(field: &FieldDescriptor) -> impl FnOnce(ErrorInfo) -> MarshalError + '_ {
        move |source| MarshalError::ContainerOperationFailed {
            field: field.into(),
            source,
        }
    }

    /// Field the error is attached to, if any.
    pub fn field(&self) -> Option<&FieldRef> {
        match self {
            Self::SchemaNotFound { field, .. } => field.as_ref(),
            Self::InvalidFieldSelector { .. } => None,
            Self::UnsupportedWireType { field, .. }
            | Self::MissingLength { field }
            | Self::MalformedDate { field, .. }
            | Self::MalformedTime { field, .. }
            | Self::MalformedDecimal { field, .. }
            | Self::BufferRetryExhausted { field, .. }
            | Self::ContainerOperationFailed { field, .. } => Some(field),
        }
    }
}

/// Field-agnostic failure reported by a codec.
///
/// Codecs do not know which record field they serve; the encoder and
/// decoder attach that with [`CodecError::at`].
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("malformed date {0:?}")]
    MalformedDate(String),

    #[error("malformed time {0:?}")]
    MalformedTime(String),

    #[error("malformed decimal {0:?}")]
    MalformedDecimal(String),

    #[error("buffer of {capacity} units still too small, {required} required")]
    BufferRetryExhausted { required: usize, capacity: usize },

    #[error(transparent)]
    Container(#[from] ErrorInfo),
}

impl CodecError {
    /// Attach the field being processed.
    pub fn at(self, field: impl Into<FieldRef>) -> MarshalError {
        let field = field.into();
        match self {
            Self::MalformedDate(value) => MarshalError::MalformedDate { field, value },
            Self::MalformedTime(value) => MarshalError::MalformedTime { field, value },
            Self::MalformedDecimal(value) => MarshalError::MalformedDecimal { field, value },
            Self::BufferRetryExhausted { required, .. } => {
                MarshalError::BufferRetryExhausted { field, required }
            }
            Self::Container(source) => MarshalError::ContainerOperationFailed { field, source },
        }
    }
}

pub type Result<T> = std::result::Result<T, MarshalError>;

/// Result of a codec operation.
pub type CodecResult<T> = std::result::Result<T, CodecError>;
