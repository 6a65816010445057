// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Container to record.
//!
//! Starts from `T::default()` and fills every mapped field from the
//! container. Date and time sentinels leave the field at its default.
//! Tables are sized by the row count the container reports.

use crate::codec::{RfcBcd, RfcChar, RfcDate, RfcInt, RfcInt8, RfcString, RfcTime, RfcXString};
use crate::container::DataContainer;
use crate::error::{MarshalError, Result};
use crate::mapper::{Decoded, Layers, Member, Record, RecordType, RfcMapper, ScalarValue, WireType};
use std::any::Any;

/// Reads records out of containers.
#[derive(Clone, Copy)]
pub struct Decoder<'a> {
    layers: Layers<'a>,
}

impl<'a> Decoder<'a> {
    /// Decoder over a single mapper.
    pub fn new(mapper: &'a RfcMapper) -> Self {
        Self::layered(mapper, None)
    }

    /// Decoder that looks schemas up in `local` first, then in `shared`.
    pub fn layered(shared: &'a RfcMapper, local: Option<&'a RfcMapper>) -> Self {
        Self {
            layers: Layers::new(shared, local),
        }
    }

    /// Materialize a `T` from `container`.
    pub fn decode<T: Record>(&self, container: &dyn DataContainer) -> Result<T> {
        let record_type = RecordType::of::<T>();
        let record = self.decode_record(container, record_type)?;
        record
            .downcast::<T>()
            .map(|record| *record)
            .map_err(|_| MarshalError::schema_not_found(record_type.name()))
    }

    fn decode_record(&self, container: &dyn DataContainer, record_type: RecordType) -> Result<Box<dyn Any>> {
        let schema = self.layers.schema(record_type)?;
        log::trace!(
            "[Decoder::decode] {} ({} fields)",
            record_type.short_name(),
            schema.members().len()
        );

        let mut record = schema.instantiate();
        for member in schema.members() {
            let Some(value) = self.decode_member(container, member)? else {
                continue;
            };
            if !member.access.assign(record.as_mut(), value) {
                return Err(MarshalError::UnsupportedWireType {
                    field: (&member.descriptor).into(),
                    wire_type: member.descriptor.wire_type(),
                });
            }
        }
        Ok(record)
    }

    /// `Ok(None)` when the field holds a "no value" sentinel.
    fn decode_member(&self, container: &dyn DataContainer, member: &Member) -> Result<Option<Decoded>> {
        let d = &member.descriptor;
        let wire_type = member.wire_type()?;
        let name = d.wire_name();
        let config = self.layers.config();

        let value = match wire_type {
            WireType::Char => RfcChar::new(member.fixed_length()?)
                .aligned(d.alignment(), d.padding())
                .get_field(container, name)
                .map(ScalarValue::Text),
            WireType::String => RfcString::get_field(container, name, config.string_probe_len)
                .map(|s| ScalarValue::Text(s.into_inner())),
            WireType::Int => RfcInt::get_field(container, name).map(|v| ScalarValue::Int(v.0)),
            WireType::Int8 => RfcInt8::get_field(container, name).map(|v| ScalarValue::Int8(v.0)),
            WireType::Date => match RfcDate::get_field(container, name).map_err(|e| e.at(d))?.value() {
                Some(date) => Ok(ScalarValue::Date(date)),
                None => return Ok(None),
            },
            WireType::Time => match RfcTime::get_field(container, name).map_err(|e| e.at(d))?.value() {
                Some(time) => Ok(ScalarValue::Time(time)),
                None => return Ok(None),
            },
            WireType::Bcd => RfcBcd::get_field(container, name, config.string_probe_len)
                .map(|v| ScalarValue::Decimal(v.into_inner())),
            WireType::XString => RfcXString::get_field(container, name, config.xstring_probe_len)
                .map(|v| ScalarValue::Bytes(v.into_inner())),
            WireType::Structure => {
                let child = container
                    .get_structure(name)
                    .map_err(MarshalError::container(d))?;
                let nested = self
                    .decode_record(&*child, member.nested()?)
                    .map_err(|e| e.via(d))?;
                return Ok(Some(Decoded::Record(nested)));
            }
            WireType::Table => return self.decode_table(container, member).map(Some),
        };
        value.map(|v| Some(Decoded::Scalar(v))).map_err(|e| e.at(d))
    }

    fn decode_table(&self, container: &dyn DataContainer, member: &Member) -> Result<Decoded> {
        let d = &member.descriptor;
        let row_type = member.nested()?;
        let table = container
            .get_table(d.wire_name())
            .map_err(MarshalError::container(d))?;
        let count = table.row_count().map_err(MarshalError::container(d))?;
        log::debug!("[Decoder::decode] {}: {} rows", d.wire_name(), count);

        let mut rows = Vec::with_capacity(count);
        for index in 0..count {
            table.move_to(index).map_err(MarshalError::container(d))?;
            let row = table.current_row().map_err(MarshalError::container(d))?;
            rows.push(self.decode_record(&*row, row_type).map_err(|e| e.via(d))?);
        }
        Ok(Decoded::Rows(rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::{to_sap, MemoryContainer, ReturnCode};
    use crate::field;
    use bigdecimal::BigDecimal;
    use chrono::NaiveTime;
    use std::str::FromStr;

    #[derive(Default, Debug, PartialEq)]
    struct Line {
        pos: i32,
        text: Option<String>,
    }

    #[derive(Default, Debug, PartialEq)]
    struct Doc {
        amount: Option<BigDecimal>,
        entered: Option<NaiveTime>,
        blob: Vec<u8>,
        lines: Vec<Line>,
    }

    fn mapper() -> RfcMapper {
        let mut mapper = RfcMapper::new();
        let mut line = mapper.register::<Line>();
        line.field(field!(Line, pos)).unwrap().wire_name("POSNR").wire_type(WireType::Int);
        line.field(field!(Line, text))
            .unwrap()
            .wire_type(WireType::Char)
            .length(6);

        let mut doc = mapper.register::<Doc>();
        doc.field(field!(Doc, amount)).unwrap().wire_name("WRBTR").wire_type(WireType::Bcd);
        doc.field(field!(Doc, entered)).unwrap().wire_name("CPUTM").wire_type(WireType::Time);
        doc.field(field!(Doc, blob)).unwrap().wire_type(WireType::XString);
        doc.table(field!(Doc, lines)).unwrap().wire_name("ITEMS");
        mapper
    }

    #[test]
    fn reads_scalars_and_rows() {
        let mapper = mapper();
        let container = MemoryContainer::new();
        container.set_string("WRBTR", &to_sap("99.95")).unwrap();
        container.set_time("CPUTM", &[0x31, 0x32, 0x30, 0x30, 0x30, 0x30]).unwrap();
        container.set_xstring("BLOB", &[0xde, 0xad]).unwrap();
        {
            let items = container.get_table("ITEMS").unwrap();
            for (pos, text) in [(10, "first"), (20, "second")] {
                let row = items.append_row().unwrap();
                row.set_int("POSNR", pos).unwrap();
                row.set_chars("TEXT", &to_sap(text)).unwrap();
            }
        }

        let doc: Doc = Decoder::new(&mapper).decode(&container).unwrap();
        assert_eq!(doc.amount, Some(BigDecimal::from_str("99.95").unwrap()));
        assert_eq!(doc.entered, NaiveTime::from_hms_opt(12, 0, 0));
        assert_eq!(doc.blob, vec![0xde, 0xad]);
        assert_eq!(
            doc.lines,
            vec![
                Line {
                    pos: 10,
                    text: Some("first ".into())
                },
                Line {
                    pos: 20,
                    text: Some("second".into())
                },
            ]
        );
    }

    #[test]
    fn time_sentinel_keeps_default() {
        let mapper = mapper();
        let container = MemoryContainer::new();
        container.set_string("WRBTR", &to_sap("0")).unwrap();
        let doc: Doc = Decoder::new(&mapper).decode(&container).unwrap();
        assert_eq!(doc.entered, None);
        assert!(doc.lines.is_empty());
    }

    #[test]
    fn malformed_decimal_names_field() {
        let mapper = mapper();
        let container = MemoryContainer::new();
        container.set_string("WRBTR", &to_sap("12,5")).unwrap();
        let err = Decoder::new(&mapper).decode::<Doc>(&container).unwrap_err();
        match err {
            MarshalError::MalformedDecimal { field, value } => {
                assert_eq!(field.wire_name, "WRBTR");
                assert_eq!(value, "12,5");
            }
            other => panic!("unexpected {other}"),
        }
    }

    #[test]
    fn malformed_time_aborts_record() {
        let mapper = mapper();
        let container = MemoryContainer::new();
        container.set_string("WRBTR", &to_sap("1")).unwrap();
        container.set_time("CPUTM", &[0x32, 0x35, 0x36, 0x31, 0x30, 0x30]).unwrap();
        let err = Decoder::new(&mapper).decode::<Doc>(&container).unwrap_err();
        match err {
            MarshalError::MalformedTime { field, value } => {
                assert_eq!(field.property, "entered");
                assert_eq!(field.wire_name, "CPUTM");
                assert_eq!(value, "256100");
            }
            other => panic!("unexpected {other}"),
        }
    }

    #[test]
    fn missing_row_schema_names_table_field() {
        let mut mapper = RfcMapper::new();
        mapper.register::<Doc>().table(field!(Doc, lines)).unwrap().wire_name("ITEMS");
        let container = MemoryContainer::new();
        container.get_table("ITEMS").unwrap().append_row().unwrap();
        match Decoder::new(&mapper).decode::<Doc>(&container).unwrap_err() {
            MarshalError::SchemaNotFound { type_name, field } => {
                assert!(type_name.ends_with("Line"));
                let field = field.unwrap();
                assert_eq!((field.property.as_str(), field.wire_name.as_str()), ("lines", "ITEMS"));
            }
            other => panic!("unexpected {other}"),
        }
    }

    #[test]
    fn strict_container_failure_is_wrapped() {
        let mapper = mapper();
        let container = MemoryContainer::strict();
        let err = Decoder::new(&mapper).decode::<Line>(&container).unwrap_err();
        match err {
            MarshalError::ContainerOperationFailed { field, source } => {
                assert_eq!(field.property, "pos");
                assert_eq!(source.code, ReturnCode::NotFound);
            }
            other => panic!("unexpected {other}"),
        }
    }

    #[test]
    fn unknown_type_is_schema_not_found() {
        let mapper = mapper();
        let err = Decoder::new(&mapper)
            .decode::<String>(&MemoryContainer::new())
            .unwrap_err();
        assert!(err.to_string().contains("String"));
    }
}
