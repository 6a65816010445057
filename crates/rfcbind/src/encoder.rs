// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Record to container.
//!
//! Walks a record and its registered schema and writes every mapped field
//! into the container, recursing into structures and tables. Fields are
//! written in registration order; the first failure aborts the record.

use crate::codec::{RfcBcd, RfcChar, RfcDate, RfcInt, RfcInt8, RfcString, RfcTime, RfcXString};
use crate::container::DataContainer;
use crate::error::{MarshalError, Result};
use crate::mapper::{Layers, Member, Record, RecordType, RfcMapper, Scalar, Slot, WireType};
use std::any::Any;

/// Writes records into containers.
#[derive(Clone, Copy)]
pub struct Encoder<'a> {
    layers: Layers<'a>,
}

impl<'a> Encoder<'a> {
    /// Encoder over a single mapper.
    pub fn new(mapper: &'a RfcMapper) -> Self {
        Self::layered(mapper, None)
    }

    /// Encoder that looks schemas up in `local` first, then in `shared`.
    pub fn layered(shared: &'a RfcMapper, local: Option<&'a RfcMapper>) -> Self {
        Self {
            layers: Layers::new(shared, local),
        }
    }

    /// Write `record` into `container`. `None` leaves the container as is.
    pub fn encode<T: Record>(&self, container: &dyn DataContainer, record: Option<&T>) -> Result<()> {
        match record {
            Some(record) => self.encode_record(container, RecordType::of::<T>(), record),
            None => {
                log::trace!("[Encoder::encode] {} omitted", std::any::type_name::<T>());
                Ok(())
            }
        }
    }

    fn encode_record(
        &self,
        container: &dyn DataContainer,
        record_type: RecordType,
        record: &dyn Any,
    ) -> Result<()> {
        let schema = self.layers.schema(record_type)?;
        log::trace!(
            "[Encoder::encode] {} ({} fields)",
            record_type.short_name(),
            schema.members().len()
        );
        for member in schema.members() {
            self.encode_member(container, member, record)?;
        }
        Ok(())
    }

    fn encode_member(&self, container: &dyn DataContainer, member: &Member, record: &dyn Any) -> Result<()> {
        let d = &member.descriptor;
        let wire_type = member.wire_type()?;
        let name = d.wire_name();
        let unsupported = || MarshalError::UnsupportedWireType {
            field: d.into(),
            wire_type: Some(wire_type),
        };
        let slot = member.access.read(record).ok_or_else(unsupported)?;

        let written = match (wire_type, slot) {
            (_, Slot::Scalar(Scalar::Absent)) => Ok(()),
            (WireType::Char, Slot::Scalar(Scalar::Text(text))) => RfcChar::new(member.fixed_length()?)
                .aligned(d.alignment(), d.padding())
                .set_field(container, name, text),
            (WireType::String, Slot::Scalar(Scalar::Text(text))) => {
                RfcString::new(text).set_field(container, name)
            }
            (WireType::Int, Slot::Scalar(Scalar::Int(v))) => RfcInt(v).set_field(container, name),
            (WireType::Int8, Slot::Scalar(Scalar::Int8(v))) => RfcInt8(v).set_field(container, name),
            (WireType::Date, Slot::Scalar(Scalar::Date(v))) => RfcDate::from(v).set_field(container, name),
            (WireType::Time, Slot::Scalar(Scalar::Time(v))) => RfcTime::from(v).set_field(container, name),
            (WireType::Bcd, Slot::Scalar(Scalar::Decimal(v))) => {
                RfcBcd::new(v.clone()).set_field(container, name)
            }
            (WireType::XString, Slot::Scalar(Scalar::Bytes(v))) => {
                RfcXString::new(v).set_field(container, name)
            }
            (WireType::Structure, Slot::Record(nested)) => {
                let child = container
                    .get_structure(name)
                    .map_err(MarshalError::container(d))?;
                return self
                    .encode_record(&*child, member.nested()?, nested)
                    .map_err(|e| e.via(d));
            }
            (WireType::Table, Slot::Rows(rows)) => {
                let row_type = member.nested()?;
                let table = container.get_table(name).map_err(MarshalError::container(d))?;
                log::debug!("[Encoder::encode] {}: {} rows", name, rows.len());
                for row in rows {
                    let handle = table.append_row().map_err(MarshalError::container(d))?;
                    self.encode_record(&*handle, row_type, row)
                        .map_err(|e| e.via(d))?;
                }
                return Ok(());
            }
            _ => return Err(unsupported()),
        };
        written.map_err(|e| e.at(d))
    }
}
