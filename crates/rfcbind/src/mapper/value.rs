// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Value kinds of record fields.
//!
//! Every mapped field has a value kind derived from its Rust type. The kind
//! decides which wire types the field may be mapped to and which codec reads
//! and writes it.

use super::WireType;
use bigdecimal::BigDecimal;
use chrono::{NaiveDate, NaiveTime};
use std::any::TypeId;
use std::fmt;

/// Identity of a registered record type.
#[derive(Clone, Copy)]
pub struct RecordType {
    id: TypeId,
    name: &'static str,
}

impl RecordType {
    /// Identity of `T`.
    pub fn of<T: 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// Underlying `TypeId`.
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Full type path, as reported by `std::any::type_name`.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Type name without module path or generic arguments.
    pub fn short_name(&self) -> &'static str {
        short_type_name(self.name)
    }
}

impl PartialEq for RecordType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for RecordType {}

impl fmt::Debug for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

pub(crate) fn short_type_name(full: &'static str) -> &'static str {
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

/// Kind of a scalar field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Text,
    Int,
    Int8,
    Date,
    Time,
    Decimal,
    Bytes,
}

/// Kind of any mapped field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Scalar(ScalarKind),
    /// Nested record (structure).
    Record(RecordType),
    /// Sequence of records (table rows).
    Rows(RecordType),
}

impl ValueKind {
    /// Whether a field of this kind can be mapped to `wire_type`.
    pub fn accepts(&self, wire_type: WireType) -> bool {
        match self {
            Self::Scalar(kind) => matches!(
                (kind, wire_type),
                (ScalarKind::Text, WireType::Char | WireType::String)
                    | (ScalarKind::Int, WireType::Int)
                    | (ScalarKind::Int8, WireType::Int8)
                    | (ScalarKind::Date, WireType::Date)
                    | (ScalarKind::Time, WireType::Time)
                    | (ScalarKind::Decimal, WireType::Bcd)
                    | (ScalarKind::Bytes, WireType::XString)
            ),
            Self::Record(_) => wire_type == WireType::Structure,
            Self::Rows(_) => wire_type == WireType::Table,
        }
    }
}

/// Borrowed scalar read from a record field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar<'a> {
    /// No value; the field is skipped on encode.
    Absent,
    Text(&'a str),
    Int(i32),
    Int8(i64),
    Date(NaiveDate),
    Time(NaiveTime),
    Decimal(&'a BigDecimal),
    Bytes(&'a [u8]),
}

/// Owned scalar produced by a decoder.
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarValue {
    Text(String),
    Int(i32),
    Int8(i64),
    Date(NaiveDate),
    Time(NaiveTime),
    Decimal(BigDecimal),
    Bytes(Vec<u8>),
}

/// A Rust type that can be stored in a scalar record field.
///
/// Implemented for the supported primitive field types and for `Option` of
/// each of them. Implement it for newtypes to map them directly:
///
/// ```
/// use rfcbind::{FieldValue, Scalar, ScalarKind, ScalarValue};
///
/// #[derive(Default)]
/// struct CompanyCode(String);
///
/// impl FieldValue for CompanyCode {
///     const KIND: ScalarKind = ScalarKind::Text;
///
///     fn to_scalar(&self) -> Scalar<'_> {
///         Scalar::Text(&self.0)
///     }
///
///     fn from_scalar(value: ScalarValue) -> Option<Self> {
///         match value {
///             ScalarValue::Text(s) => Some(CompanyCode(s)),
///             _ => None,
///         }
///     }
/// }
/// ```
pub trait FieldValue: Sized {
    const KIND: ScalarKind;

    fn to_scalar(&self) -> Scalar<'_>;

    /// `None` when `value` is not of kind [`Self::KIND`].
    fn from_scalar(value: ScalarValue) -> Option<Self>;
}

macro_rules! impl_field_value {
    ($ty:ty, $kind:ident, $this:ident => $to:expr) => {
        impl FieldValue for $ty {
            const KIND: ScalarKind = ScalarKind::$kind;

            fn to_scalar(&self) -> Scalar<'_> {
                let $this = self;
                Scalar::$kind($to)
            }

            fn from_scalar(value: ScalarValue) -> Option<Self> {
                match value {
                    ScalarValue::$kind(v) => Some(v),
                    _ => None,
                }
            }
        }
    };
}

impl_field_value!(String, Text, s => s.as_str());
impl_field_value!(i32, Int, v => *v);
impl_field_value!(i64, Int8, v => *v);
impl_field_value!(NaiveDate, Date, d => *d);
impl_field_value!(NaiveTime, Time, t => *t);
impl_field_value!(BigDecimal, Decimal, d => d);
impl_field_value!(Vec<u8>, Bytes, b => b.as_slice());

impl<V: FieldValue> FieldValue for Option<V> {
    const KIND: ScalarKind = V::KIND;

    fn to_scalar(&self) -> Scalar<'_> {
        match self {
            Some(v) => v.to_scalar(),
            None => Scalar::Absent,
        }
    }

    fn from_scalar(value: ScalarValue) -> Option<Self> {
        V::from_scalar(value).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Customer;

    #[test]
    fn short_names_drop_path_and_generics() {
        assert_eq!(RecordType::of::<Customer>().short_name(), "Customer");
        assert_eq!(short_type_name("a::b::Page<a::Row>"), "Page");
        assert_eq!(short_type_name("Plain"), "Plain");
    }

    #[test]
    fn kinds_accept_compatible_wire_types() {
        let text = ValueKind::Scalar(ScalarKind::Text);
        assert!(text.accepts(WireType::Char));
        assert!(text.accepts(WireType::String));
        assert!(!text.accepts(WireType::Int));

        let decimal = ValueKind::Scalar(ScalarKind::Decimal);
        assert!(decimal.accepts(WireType::Bcd));
        assert!(!decimal.accepts(WireType::String));

        let rows = ValueKind::Rows(RecordType::of::<Customer>());
        assert!(rows.accepts(WireType::Table));
        assert!(!rows.accepts(WireType::Structure));
    }

    #[test]
    fn option_maps_none_to_absent() {
        let missing: Option<String> = None;
        assert_eq!(missing.to_scalar(), Scalar::Absent);
        assert_eq!(Some(7i32).to_scalar(), Scalar::Int(7));
        assert_eq!(
            Option::<i64>::from_scalar(ScalarValue::Int8(9)),
            Some(Some(9))
        );
        assert_eq!(i32::from_scalar(ScalarValue::Int8(9)), None);
    }
}
