// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Workflow tests across registry, encoder and decoder.

use super::*;
use crate::field;
use crate::container::{to_sap, DataContainer, MemoryContainer};
use bigdecimal::BigDecimal;
use chrono::{NaiveDate, NaiveTime};
use std::str::FromStr;
use std::thread;

#[derive(Debug, Default, Clone, PartialEq)]
struct Address {
    city: Option<String>,
    postal_code: Option<String>,
}

#[derive(Debug, Default, Clone, PartialEq)]
struct Item {
    position: i32,
    material: Option<String>,
    quantity: BigDecimal,
}

#[derive(Debug, Default, Clone, PartialEq)]
struct SalesOrder {
    number: Option<String>,
    doc_id: i64,
    created_on: Option<NaiveDate>,
    created_at: Option<NaiveTime>,
    net_value: Option<BigDecimal>,
    note: Option<String>,
    attachment: Vec<u8>,
    ship_to: Address,
    items: Vec<Item>,
}

fn register_all(mapper: &mut RfcMapper) -> Result<()> {
    let mut address = mapper.register::<Address>();
    address
        .field(field!(Address, city))?
        .wire_type(WireType::Char)
        .length(25)
        .alignment(Alignment::Left, ' ');
    address
        .field(field!(Address, postal_code))?
        .wire_name("POSTL_COD1")
        .wire_type(WireType::Char)
        .length(10)
        .alignment(Alignment::Left, ' ');

    let mut item = mapper.register::<Item>();
    item.field(field!(Item, position))?
        .wire_name("ITM_NUMBER")
        .wire_type(WireType::Int);
    item.field(field!(Item, material))?
        .wire_type(WireType::Char)
        .length(18)
        .alignment(Alignment::Right, '0');
    item.field(field!(Item, quantity))?
        .wire_name("REQ_QTY")
        .wire_type(WireType::Bcd);

    let mut order = mapper.register::<SalesOrder>();
    order
        .field(field!(SalesOrder, number))?
        .wire_name("VBELN")
        .wire_type(WireType::Char)
        .length(10)
        .alignment(Alignment::Right, '0');
    order
        .field(field!(SalesOrder, doc_id))?
        .wire_type(WireType::Int8);
    order
        .field(field!(SalesOrder, created_on))?
        .wire_name("ERDAT")
        .wire_type(WireType::Date);
    order
        .field(field!(SalesOrder, created_at))?
        .wire_name("ERZET")
        .wire_type(WireType::Time);
    order
        .field(field!(SalesOrder, net_value))?
        .wire_name("NETWR")
        .wire_type(WireType::Bcd);
    order
        .field(field!(SalesOrder, note))?
        .wire_type(WireType::String);
    order
        .field(field!(SalesOrder, attachment))?
        .wire_type(WireType::XString);
    order
        .structure(field!(SalesOrder, ship_to))?
        .wire_name("SHIP_TO");
    order
        .table(field!(SalesOrder, items))?
        .wire_name("ORDER_ITEMS");
    Ok(())
}

fn mapper() -> RfcMapper {
    let mut mapper = RfcMapper::new();
    register_all(&mut mapper).expect("register");
    mapper
}

fn dec(s: &str) -> BigDecimal {
    BigDecimal::from_str(s).expect("decimal")
}

fn sample_order() -> SalesOrder {
    SalesOrder {
        number: Some("0000004711".into()),
        doc_id: 9_000_000_001,
        created_on: NaiveDate::from_ymd_opt(2023, 11, 30),
        created_at: NaiveTime::from_hms_opt(16, 45, 12),
        net_value: Some(dec("140423.2101")),
        note: Some("deliver to dock 4".into()),
        attachment: vec![0x25, 0x50, 0x44, 0x46],
        ship_to: Address {
            city: Some("Walldorf".into()),
            postal_code: Some("69190".into()),
        },
        items: (1..=3)
            .map(|i| Item {
                position: i * 10,
                material: Some(format!("MAT-{i}")),
                quantity: dec(&format!("{i}.500")),
            })
            .collect(),
    }
}

fn trim(value: &Option<String>) -> Option<String> {
    value.as_ref().map(|s| s.trim_end().to_string())
}

#[test]
fn test_full_workflow() {
    // 1. Register schemas
    let mapper = mapper();
    assert_eq!(mapper.len(), 3);

    // 2. Encode
    let order = sample_order();
    let container = MemoryContainer::new();
    Encoder::new(&mapper)
        .encode(&container, Some(&order))
        .expect("encode");

    // 3. Inspect the wire side
    assert_eq!(container.text("VBELN").as_deref(), Some("0000004711"));
    assert_eq!(container.text("ERDAT").as_deref(), Some("20231130"));
    assert_eq!(container.text("ERZET").as_deref(), Some("164512"));
    assert_eq!(container.text("NETWR").as_deref(), Some("140423.2101"));
    let ship_to = container.structure("SHIP_TO").expect("SHIP_TO");
    assert_eq!(
        ship_to.text("CITY").as_deref(),
        Some("Walldorf                 ")
    );
    let items = container.table("ORDER_ITEMS").expect("ORDER_ITEMS");
    assert_eq!(items.len(), 3);
    let second = items.row(1).expect("row 1");
    assert_eq!(second.get_int("ITM_NUMBER").unwrap(), 20);
    assert_eq!(second.text("MATERIAL").as_deref(), Some("0000000000000MAT-2"));
    assert_eq!(second.text("REQ_QTY").as_deref(), Some("2.500"));

    // 4. Decode
    let decoded: SalesOrder = Decoder::new(&mapper).decode(&container).expect("decode");

    // 5. Everything but char padding survives unchanged
    assert_eq!(decoded.number, order.number);
    assert_eq!(decoded.doc_id, order.doc_id);
    assert_eq!(decoded.created_on, order.created_on);
    assert_eq!(decoded.created_at, order.created_at);
    assert_eq!(decoded.net_value, order.net_value);
    assert_eq!(decoded.note, order.note);
    assert_eq!(decoded.attachment, order.attachment);
    assert_eq!(trim(&decoded.ship_to.city), order.ship_to.city);
    assert_eq!(trim(&decoded.ship_to.postal_code), order.ship_to.postal_code);
    assert_eq!(decoded.items.len(), 3);
    for (got, want) in decoded.items.iter().zip(&order.items) {
        assert_eq!(got.position, want.position);
        assert_eq!(got.quantity, want.quantity);
        let material = got.material.as_deref().map(|m| m.trim_start_matches('0'));
        assert_eq!(material, want.material.as_deref());
    }
}

#[test]
fn test_sentinels_round_trip() {
    let mapper = mapper();
    let order = SalesOrder {
        net_value: Some(dec("0")),
        ..Default::default()
    };
    let container = MemoryContainer::new();
    Encoder::new(&mapper).encode(&container, Some(&order)).unwrap();

    // absent date and time are not written; the container default is zeros
    assert!(!container.contains("ERDAT"));
    let decoded: SalesOrder = Decoder::new(&mapper).decode(&container).unwrap();
    assert_eq!(decoded.created_on, None);
    assert_eq!(decoded.created_at, None);

    // blank wire values decode to absent as well
    container.set_date("ERDAT", &[b' ' as u16; 8]).unwrap();
    container.set_time("ERZET", &[b' ' as u16; 6]).unwrap();
    let decoded: SalesOrder = Decoder::new(&mapper).decode(&container).unwrap();
    assert_eq!(decoded.created_on, None);
    assert_eq!(decoded.created_at, None);
}

#[test]
fn test_char_truncation() {
    let mapper = mapper();
    let order = SalesOrder {
        number: Some("12345678901234".into()),
        net_value: Some(dec("1")),
        ..Default::default()
    };
    let container = MemoryContainer::new();
    Encoder::new(&mapper).encode(&container, Some(&order)).unwrap();
    assert_eq!(container.text("VBELN").as_deref(), Some("1234567890"));
}

#[test]
fn test_table_rows_follow_container() {
    let mapper = mapper();
    let container = MemoryContainer::new();
    container.set_string("NETWR", &to_sap("5")).unwrap();
    {
        let table = container.get_table("ORDER_ITEMS").unwrap();
        for i in 0..5 {
            let row = table.append_row().unwrap();
            row.set_int("ITM_NUMBER", i).unwrap();
            row.set_string("REQ_QTY", &to_sap("1")).unwrap();
        }
        // cursor is left on the last row; the decoder repositions it
        assert_eq!(table.row_count().unwrap(), 5);
    }

    let decoded: SalesOrder = Decoder::new(&mapper).decode(&container).unwrap();
    let positions: Vec<_> = decoded.items.iter().map(|i| i.position).collect();
    assert_eq!(positions, vec![0, 1, 2, 3, 4]);
}

#[test]
fn test_long_note_uses_retry_path() {
    let mut mapper = mapper();
    let config = MarshalConfig {
        string_probe_len: 8,
        ..Default::default()
    };
    mapper.apply_config(&config).unwrap();

    let order = SalesOrder {
        note: Some("a note longer than eight units".into()),
        net_value: Some(dec("1")),
        ..Default::default()
    };
    let container = MemoryContainer::new();
    Encoder::new(&mapper).encode(&container, Some(&order)).unwrap();
    let decoded: SalesOrder = Decoder::new(&mapper).decode(&container).unwrap();
    assert_eq!(decoded.note, order.note);
    assert!(container.probe_misses() >= 1);
}

#[test]
fn test_config_override_end_to_end() {
    let mut mapper = mapper();
    let config = MarshalConfig::from_toml_str(
        r#"
        [[overrides]]
        record = "Address"
        property = "city"
        wire_name = "CITY1"
        length = 4
        "#,
    )
    .unwrap();
    mapper.apply_config(&config).unwrap();

    let order = SalesOrder {
        net_value: Some(dec("1")),
        ship_to: Address {
            city: Some("Heidelberg".into()),
            postal_code: None,
        },
        ..Default::default()
    };
    let container = MemoryContainer::new();
    Encoder::new(&mapper).encode(&container, Some(&order)).unwrap();
    let ship_to = container.structure("SHIP_TO").unwrap();
    assert_eq!(ship_to.text("CITY1").as_deref(), Some("Heid"));
    assert!(!ship_to.contains("CITY"));
}

#[test]
fn test_missing_nested_schema() {
    let mut mapper = RfcMapper::new();
    mapper
        .register::<SalesOrder>()
        .structure(field!(SalesOrder, ship_to))
        .unwrap();
    let err = Encoder::new(&mapper)
        .encode(&MemoryContainer::new(), Some(&SalesOrder::default()))
        .unwrap_err();
    match err {
        MarshalError::SchemaNotFound { type_name, field } => {
            assert!(type_name.ends_with("Address"));
            assert_eq!(field.map(|f| f.wire_name), Some("SHIP_TO".to_string()));
        }
        other => panic!("unexpected {other}"),
    }
}

#[test]
fn test_shared_mapper_across_threads() {
    let shared = SharedMapper::new(mapper());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let shared = shared.clone();
            thread::spawn(move || {
                let mut order = sample_order();
                order.doc_id = i;
                let container = MemoryContainer::new();
                let call = FunctionCall::new("BAPI_SALESORDER_GETLIST", &shared);
                call.set_input(&container, Some(&order)).expect("encode");
                let back: SalesOrder = call.get_output(&container).expect("decode");
                back.doc_id
            })
        })
        .collect();

    let mut ids: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    ids.sort_unstable();
    assert_eq!(ids, vec![0, 1, 2, 3]);
}
