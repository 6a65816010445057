// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # rfcbind - typed parameter marshaling for RFC containers
//!
//! Remote function libraries in the RFC family expose call parameters as a
//! tree of untyped containers: every field is addressed by name, and the
//! caller has to know its wire type and width. `rfcbind` maps plain Rust
//! structs onto that tree.
//!
//! ## Quick Start
//!
//! ```rust
//! use rfcbind::container::MemoryContainer;
//! use rfcbind::{field, Decoder, Encoder, RfcMapper, WireType};
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct Vendor {
//!     id: Option<String>,
//!     year: i32,
//! }
//!
//! let mut mapper = RfcMapper::new();
//! let mut vendor = mapper.register::<Vendor>();
//! vendor
//!     .field(field!(Vendor, id))?
//!     .wire_name("LIFNR")
//!     .wire_type(WireType::Char)
//!     .length(10);
//! vendor
//!     .field(field!(Vendor, year))?
//!     .wire_name("GJAHR")
//!     .wire_type(WireType::Int);
//!
//! let container = MemoryContainer::new();
//! let input = Vendor {
//!     id: Some("0000100042".into()),
//!     year: 2024,
//! };
//! Encoder::new(&mapper).encode(&container, Some(&input))?;
//! let output: Vendor = Decoder::new(&mapper).decode(&container)?;
//! assert_eq!(output, input);
//! # Ok::<(), rfcbind::MarshalError>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! +---------------------------------------------------------------------+
//! |   FunctionCall (function name, shared + call-scoped mapper)         |
//! +---------------------------------------------------------------------+
//! |   Encoder / Decoder (record graph <-> container graph)              |
//! +---------------------------------------------------------------------+
//! |   RfcMapper (record type -> ordered FieldDescriptors + accessors)   |
//! +---------------------------------------------------------------------+
//! |   Codecs: char | date | time | bcd | string | xstring | int | int8 |
//! +---------------------------------------------------------------------+
//! |   DataContainer / TableContainer (native binding or in-memory)      |
//! +---------------------------------------------------------------------+
//! ```
//!
//! ## Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`RfcMapper`] | Schema registry, filled through [`RfcMapper::register`] |
//! | [`SharedMapper`] | Thread-safe process-wide registry |
//! | [`Encoder`] | Writes a record into a container |
//! | [`Decoder`] | Builds a record from a container |
//! | [`FunctionCall`] | Per-call scope with mapper override |
//! | [`MarshalConfig`] | Probe sizes and field overrides (TOML) |
//!
//! ## Modules Overview
//!
//! - [`mapper`] - registry, descriptors and the builder API
//! - [`codec`] - one codec per primitive wire type
//! - [`container`] - external container interface and in-memory container
//! - [`bapi`] - BAPI `RETURN` structure
//! - [`config`] - configuration

/// BAPI return structure and its mapping.
pub mod bapi;
/// Codecs for the primitive wire types.
pub mod codec;
/// Marshaling configuration (probe sizes, field overrides).
pub mod config;
/// External parameter container interface.
pub mod container;
mod decoder;
mod encoder;
/// Error types.
pub mod error;
mod function;
/// Schema registry and builder API.
pub mod mapper;

pub use bapi::{BapiMessageType, BapiReturn};
pub use config::{ConfigError, FieldOverride, MarshalConfig};
pub use decoder::Decoder;
pub use encoder::Encoder;
pub use error::{CodecError, FieldRef, MarshalError, Result};
pub use function::FunctionCall;
pub use mapper::{
    Alignment, FieldDescriptor, FieldValue, PropertyBuilder, Record, RfcMapper, Scalar,
    ScalarKind, ScalarValue, Selector, SharedMapper, TypeBuilder, WireType,
};

#[cfg(test)]
mod tests;
