// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Field descriptors: how one record field appears on the wire.

use super::WireType;
use serde::{Deserialize, Serialize};

/// Placement of a short `char` value inside its fixed-width field.
///
/// The padding character occupies one UTF-16 unit per position; padding
/// outside the basic multilingual plane is written as a blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    /// Value written as is; no padding.
    None,
    /// Value first, padding after.
    Left,
    /// Padding first, value after.
    #[default]
    Right,
}

/// Padding character used when none is configured.
pub const DEFAULT_PADDING: char = ' ';

/// Wire layout of one record field.
///
/// Created by [`TypeBuilder`](super::TypeBuilder) and adjusted through
/// [`PropertyBuilder`](super::PropertyBuilder) or configuration overrides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    property: &'static str,
    wire_name: String,
    wire_type: Option<WireType>,
    length: usize,
    alignment: Alignment,
    padding: char,
}

impl FieldDescriptor {
    /// Descriptor with defaults: upper-cased property as wire name, no wire
    /// type, no length, right alignment padded with blanks.
    pub fn new(property: &'static str) -> Self {
        Self {
            property,
            wire_name: property.to_uppercase(),
            wire_type: None,
            length: 0,
            alignment: Alignment::default(),
            padding: DEFAULT_PADDING,
        }
    }

    /// Rust field name.
    pub fn property(&self) -> &'static str {
        self.property
    }

    /// Remote field name.
    pub fn wire_name(&self) -> &str {
        &self.wire_name
    }

    /// `None` until a wire type is assigned.
    pub fn wire_type(&self) -> Option<WireType> {
        self.wire_type
    }

    /// Fixed character length; 0 when unset.
    pub fn length(&self) -> usize {
        self.length
    }

    /// Placement of short `char` values.
    pub fn alignment(&self) -> Alignment {
        self.alignment
    }

    /// Fill character for short `char` values.
    pub fn padding(&self) -> char {
        self.padding
    }

    pub(crate) fn set_wire_name(&mut self, name: impl Into<String>) {
        self.wire_name = name.into();
    }

    pub(crate) fn set_wire_type(&mut self, wire_type: WireType) {
        self.wire_type = Some(wire_type);
    }

    pub(crate) fn set_length(&mut self, length: usize) {
        self.length = length;
    }

    pub(crate) fn set_alignment(&mut self, alignment: Alignment, padding: char) {
        self.alignment = alignment;
        self.padding = padding;
    }
}
