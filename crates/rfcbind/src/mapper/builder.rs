// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Fluent registration API.
//!
//! ```
//! use rfcbind::{field, Alignment, RfcMapper, WireType};
//!
//! #[derive(Default)]
//! struct Customer {
//!     id: String,
//!     name: Option<String>,
//! }
//!
//! let mut mapper = RfcMapper::new();
//! let mut customer = mapper.register::<Customer>();
//! customer
//!     .field(field!(Customer, id))?
//!     .wire_name("KUNNR")
//!     .wire_type(WireType::Char)
//!     .length(10)
//!     .alignment(Alignment::Right, '0');
//! customer
//!     .field(field!(Customer, name))?
//!     .wire_name("NAME1")
//!     .wire_type(WireType::Char)
//!     .length(35)
//!     .alignment(Alignment::Left, ' ');
//! # Ok::<(), rfcbind::MarshalError>(())
//! ```

use super::access::{Access, ScalarAccess, StructureAccess, TableAccess};
use super::{Alignment, FieldDescriptor, FieldValue, Member, Record, RecordSchema, WireType};
use crate::error::{MarshalError, Result};
use std::marker::PhantomData;

/// Typed accessor pair for one field of `T`, plus the field's name.
///
/// Usually produced by [`field!`](crate::field).
pub struct Selector<T, V> {
    name: &'static str,
    get: fn(&T) -> &V,
    get_mut: fn(&mut T) -> &mut V,
}

impl<T, V> Selector<T, V> {
    /// A leading `r#` on `name` is dropped.
    pub fn new(name: &'static str, get: fn(&T) -> &V, get_mut: fn(&mut T) -> &mut V) -> Self {
        Self {
            name: name.strip_prefix("r#").unwrap_or(name),
            get,
            get_mut,
        }
    }

    /// Rust field name, without `r#`.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

/// Build a [`Selector`] for `$record.$field`.
///
/// ```
/// # use rfcbind::field;
/// #[derive(Default)]
/// struct Header {
///     r#type: String,
/// }
///
/// let selector = field!(Header, r#type);
/// assert_eq!(selector.name(), "type");
/// ```
#[macro_export]
macro_rules! field {
    ($record:ty, $field:ident) => {
        $crate::Selector::<$record, _>::new(
            stringify!($field),
            |r| &r.$field,
            |r| &mut r.$field,
        )
    };
}

/// Registers the fields of record type `T`.
///
/// Obtained from [`RfcMapper::register`](super::RfcMapper::register).
pub struct TypeBuilder<'m, T> {
    schema: &'m mut RecordSchema,
    _record: PhantomData<fn() -> T>,
}

impl<'m, T: Record> TypeBuilder<'m, T> {
    pub(crate) fn new(schema: &'m mut RecordSchema) -> Self {
        Self {
            schema,
            _record: PhantomData,
        }
    }

    /// Map a scalar field. Mapping the same field again returns its existing
    /// descriptor.
    pub fn field<V: FieldValue + 'static>(
        &mut self,
        selector: Selector<T, V>,
    ) -> Result<PropertyBuilder<'_>> {
        let access = ScalarAccess::new(selector.get, selector.get_mut);
        self.member(selector.name, Box::new(access), None)
    }

    /// Map a nested record field as a `structure`.
    pub fn structure<S: Record>(&mut self, selector: Selector<T, S>) -> Result<PropertyBuilder<'_>> {
        let access = StructureAccess::new(selector.get, selector.get_mut);
        self.member(selector.name, Box::new(access), Some(WireType::Structure))
    }

    /// Map a record sequence field as a `table`.
    pub fn table<S: Record>(&mut self, selector: Selector<T, Vec<S>>) -> Result<PropertyBuilder<'_>> {
        let access = TableAccess::new(selector.get, selector.get_mut);
        self.member(selector.name, Box::new(access), Some(WireType::Table))
    }

    fn member(
        &mut self,
        name: &'static str,
        access: Box<dyn Access>,
        preset: Option<WireType>,
    ) -> Result<PropertyBuilder<'_>> {
        let type_name = self.schema.record().name();
        if !is_identifier(name) {
            return Err(MarshalError::InvalidFieldSelector {
                type_name: type_name.to_string(),
                selector: name.to_string(),
                reason: "not a field name".into(),
            });
        }

        let members = self.schema.members_mut();
        let index = match members.iter().position(|m| m.descriptor.property() == name) {
            Some(index) => {
                let existing = members[index].access.kind();
                if existing != access.kind() {
                    return Err(MarshalError::InvalidFieldSelector {
                        type_name: type_name.to_string(),
                        selector: name.to_string(),
                        reason: format!(
                            "already mapped as {:?}, selector yields {:?}",
                            existing,
                            access.kind()
                        ),
                    });
                }
                members[index].access = access;
                index
            }
            None => {
                let mut descriptor = FieldDescriptor::new(name);
                if let Some(wire_type) = preset {
                    descriptor.set_wire_type(wire_type);
                }
                log::trace!("[TypeBuilder::member] {}.{}", type_name, name);
                members.push(Member { descriptor, access });
                members.len() - 1
            }
        };

        Ok(PropertyBuilder {
            descriptor: &mut members[index].descriptor,
        })
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    name != "_" && chars.all(|c| c.is_alphanumeric() || c == '_')
}

/// Adjusts the descriptor of one mapped field.
pub struct PropertyBuilder<'a> {
    descriptor: &'a mut FieldDescriptor,
}

impl PropertyBuilder<'_> {
    /// Remote field name (defaults to the upper-cased field name).
    pub fn wire_name(self, name: impl Into<String>) -> Self {
        self.descriptor.set_wire_name(name);
        self
    }

    /// Wire type used to encode and decode the field.
    pub fn wire_type(self, wire_type: WireType) -> Self {
        self.descriptor.set_wire_type(wire_type);
        self
    }

    /// Fixed character length of a `char` field.
    pub fn length(self, length: usize) -> Self {
        self.descriptor.set_length(length);
        self
    }

    /// Placement and fill character of short `char` values.
    pub fn alignment(self, alignment: Alignment, padding: char) -> Self {
        self.descriptor.set_alignment(alignment, padding);
        self
    }

    /// Write `char` values without padding.
    pub fn no_alignment(self) -> Self {
        let padding = self.descriptor.padding();
        self.descriptor.set_alignment(Alignment::None, padding);
        self
    }

    /// Descriptor as configured so far.
    pub fn descriptor(&self) -> &FieldDescriptor {
        self.descriptor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapper::RfcMapper;

    #[derive(Default)]
    struct Item {
        code: String,
        qty: i32,
    }

    #[derive(Default)]
    struct Order {
        number: String,
        lines: Vec<Item>,
    }

    #[test]
    fn identifiers() {
        assert!(is_identifier("company_code"));
        assert!(is_identifier("_x"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("_"));
        assert!(!is_identifier("1st"));
        assert!(!is_identifier("a.b"));
    }

    #[test]
    fn field_is_get_or_add() {
        let mut mapper = RfcMapper::new();
        {
            let mut b = mapper.register::<Item>();
            b.field(field!(Item, code)).unwrap().wire_name("MATNR").length(18);
            // second selection keeps the descriptor
            let again = b.field(field!(Item, code)).unwrap().wire_type(WireType::Char);
            assert_eq!(again.descriptor().wire_name(), "MATNR");
            assert_eq!(again.descriptor().length(), 18);
        }
        assert_eq!(mapper.descriptors::<Item>().unwrap().len(), 1);
    }

    #[test]
    fn kind_conflict_is_rejected() {
        let mut mapper = RfcMapper::new();
        let mut b = mapper.register::<Item>();
        b.field(field!(Item, qty)).unwrap();

        let wrong = Selector::<Item, String>::new("qty", |i| &i.code, |i| &mut i.code);
        let err = b.field(wrong).err().unwrap();
        assert!(matches!(err, MarshalError::InvalidFieldSelector { .. }));
    }

    #[test]
    fn bad_selector_name_is_rejected() {
        let mut mapper = RfcMapper::new();
        let mut b = mapper.register::<Item>();
        let bad = Selector::<Item, String>::new("code.len", |i| &i.code, |i| &mut i.code);
        match b.field(bad) {
            Err(MarshalError::InvalidFieldSelector { selector, .. }) => {
                assert_eq!(selector, "code.len");
            }
            _ => panic!("expected InvalidFieldSelector"),
        }
    }

    #[test]
    fn table_presets_wire_type() {
        let mut mapper = RfcMapper::new();
        {
            let mut b = mapper.register::<Order>();
            b.field(field!(Order, number)).unwrap().wire_type(WireType::Char).length(10);
            let lines = b.table(field!(Order, lines)).unwrap().wire_name("ITEMS");
            assert_eq!(lines.descriptor().wire_type(), Some(WireType::Table));
        }
        let descriptors = mapper.descriptors::<Order>().unwrap();
        assert_eq!(descriptors[0].wire_name(), "NUMBER");
        assert_eq!(descriptors[1].wire_name(), "ITEMS");
    }
}
