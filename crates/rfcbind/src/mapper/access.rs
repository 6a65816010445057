// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type-erased field accessors.
//!
//! The registry stores schemas of many record types side by side, so the
//! typed accessor pair of each field is hidden behind [`Access`], which
//! works on `&dyn Any` and downcasts to the concrete record type.

use super::value::{FieldValue, RecordType, Scalar, ScalarValue, ValueKind};
use std::any::Any;

/// Field value borrowed from a record for encoding.
pub(crate) enum Slot<'r> {
    Scalar(Scalar<'r>),
    Record(&'r dyn Any),
    Rows(Vec<&'r dyn Any>),
}

/// Field value produced by the decoder.
pub(crate) enum Decoded {
    Scalar(ScalarValue),
    Record(Box<dyn Any>),
    Rows(Vec<Box<dyn Any>>),
}

pub(crate) trait Access: Send + Sync {
    fn kind(&self) -> ValueKind;

    /// `None` if `record` is not of the owning type.
    fn read<'r>(&self, record: &'r dyn Any) -> Option<Slot<'r>>;

    /// Store `value` into the field. `false` if the record or value does not
    /// match the field.
    fn assign(&self, record: &mut dyn Any, value: Decoded) -> bool;
}

pub(crate) struct ScalarAccess<T, V> {
    get: fn(&T) -> &V,
    get_mut: fn(&mut T) -> &mut V,
}

impl<T, V> ScalarAccess<T, V> {
    pub(crate) fn new(get: fn(&T) -> &V, get_mut: fn(&mut T) -> &mut V) -> Self {
        Self { get, get_mut }
    }
}

impl<T: 'static, V: FieldValue + 'static> Access for ScalarAccess<T, V> {
    fn kind(&self) -> ValueKind {
        ValueKind::Scalar(V::KIND)
    }

    fn read<'r>(&self, record: &'r dyn Any) -> Option<Slot<'r>> {
        let record = record.downcast_ref::<T>()?;
        Some(Slot::Scalar((self.get)(record).to_scalar()))
    }

    fn assign(&self, record: &mut dyn Any, value: Decoded) -> bool {
        let (Some(record), Decoded::Scalar(value)) = (record.downcast_mut::<T>(), value) else {
            return false;
        };
        match V::from_scalar(value) {
            Some(value) => {
                *(self.get_mut)(record) = value;
                true
            }
            None => false,
        }
    }
}

pub(crate) struct StructureAccess<T, S> {
    get: fn(&T) -> &S,
    get_mut: fn(&mut T) -> &mut S,
}

impl<T, S> StructureAccess<T, S> {
    pub(crate) fn new(get: fn(&T) -> &S, get_mut: fn(&mut T) -> &mut S) -> Self {
        Self { get, get_mut }
    }
}

impl<T: 'static, S: 'static> Access for StructureAccess<T, S> {
    fn kind(&self) -> ValueKind {
        ValueKind::Record(RecordType::of::<S>())
    }

    fn read<'r>(&self, record: &'r dyn Any) -> Option<Slot<'r>> {
        let record = record.downcast_ref::<T>()?;
        Some(Slot::Record((self.get)(record)))
    }

    fn assign(&self, record: &mut dyn Any, value: Decoded) -> bool {
        let (Some(record), Decoded::Record(nested)) = (record.downcast_mut::<T>(), value) else {
            return false;
        };
        match nested.downcast::<S>() {
            Ok(nested) => {
                *(self.get_mut)(record) = *nested;
                true
            }
            Err(_) => false,
        }
    }
}

pub(crate) struct TableAccess<T, S> {
    get: fn(&T) -> &Vec<S>,
    get_mut: fn(&mut T) -> &mut Vec<S>,
}

impl<T, S> TableAccess<T, S> {
    pub(crate) fn new(get: fn(&T) -> &Vec<S>, get_mut: fn(&mut T) -> &mut Vec<S>) -> Self {
        Self { get, get_mut }
    }
}

impl<T: 'static, S: 'static> Access for TableAccess<T, S> {
    fn kind(&self) -> ValueKind {
        ValueKind::Rows(RecordType::of::<S>())
    }

    fn read<'r>(&self, record: &'r dyn Any) -> Option<Slot<'r>> {
        let record = record.downcast_ref::<T>()?;
        let rows = (self.get)(record).iter().map(|row| row as &dyn Any).collect();
        Some(Slot::Rows(rows))
    }

    fn assign(&self, record: &mut dyn Any, value: Decoded) -> bool {
        let (Some(record), Decoded::Rows(rows)) = (record.downcast_mut::<T>(), value) else {
            return false;
        };
        let mut typed = Vec::with_capacity(rows.len());
        for row in rows {
            match row.downcast::<S>() {
                Ok(row) => typed.push(*row),
                Err(_) => return false,
            }
        }
        *(self.get_mut)(record) = typed;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapper::ScalarKind;

    #[derive(Default)]
    struct Line {
        qty: i32,
    }

    #[derive(Default)]
    struct Order {
        id: Option<String>,
        lines: Vec<Line>,
    }

    #[test]
    fn scalar_access_reads_and_assigns() {
        let access = ScalarAccess::new(|o: &Order| &o.id, |o: &mut Order| &mut o.id);
        assert_eq!(access.kind(), ValueKind::Scalar(ScalarKind::Text));

        let mut order = Order::default();
        assert!(matches!(
            access.read(&order),
            Some(Slot::Scalar(Scalar::Absent))
        ));
        assert!(access.assign(&mut order, Decoded::Scalar(ScalarValue::Text("42".into()))));
        assert_eq!(order.id.as_deref(), Some("42"));

        // wrong value kind or wrong record type
        assert!(!access.assign(&mut order, Decoded::Scalar(ScalarValue::Int(1))));
        let mut line = Line::default();
        assert!(access.read(&line).is_none());
        assert!(!access.assign(&mut line, Decoded::Scalar(ScalarValue::Text("x".into()))));
    }

    #[test]
    fn table_access_replaces_rows() {
        let access = TableAccess::new(|o: &Order| &o.lines, |o: &mut Order| &mut o.lines);
        let mut order = Order::default();
        let rows: Vec<Box<dyn Any>> = vec![Box::new(Line { qty: 1 }), Box::new(Line { qty: 2 })];
        assert!(access.assign(&mut order, Decoded::Rows(rows)));
        assert_eq!(order.lines.iter().map(|l| l.qty).collect::<Vec<_>>(), vec![1, 2]);

        match access.read(&order) {
            Some(Slot::Rows(rows)) => assert_eq!(rows.len(), 2),
            _ => panic!("expected rows"),
        }
    }
}
