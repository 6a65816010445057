// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! In-memory parameter container.
//!
//! Behaves like a function handle of the remote library whose metadata is
//! discovered lazily: fields come into existence when first written, and
//! structures and tables when first requested. Reading a field that was
//! never written returns the remote defaults (blank CHAR, `00000000` DATS,
//! `000000` TIMS, zero integers, empty strings) unless the container was
//! created with [`MemoryContainer::strict`], in which case the read fails
//! with `RFC_NOT_FOUND`.
//!
//! Handles are cheap clones sharing the same node, so a structure handle
//! obtained through [`DataContainer::get_structure`] and the one returned
//! by [`MemoryContainer::structure`] observe the same data.

use super::{DataContainer, ErrorInfo, Fetched, RfcResult, ReturnCode, SapUc, TableContainer};
use parking_lot::Mutex;
use std::sync::Arc;

const BLANK: SapUc = b' ' as SapUc;
const ZERO: SapUc = b'0' as SapUc;

#[derive(Debug, Clone)]
enum Value {
    Chars(Vec<SapUc>),
    Int(i32),
    Int8(i64),
    Date([SapUc; 8]),
    Time([SapUc; 6]),
    String(Vec<SapUc>),
    XString(Vec<u8>),
    Structure(MemoryContainer),
    Table(MemoryTable),
}

impl Value {
    fn type_name(&self) -> &'static str {
        match self {
            Self::Chars(_) => "CHAR",
            Self::Int(_) => "INT",
            Self::Int8(_) => "INT8",
            Self::Date(_) => "DATE",
            Self::Time(_) => "TIME",
            Self::String(_) => "STRING",
            Self::XString(_) => "XSTRING",
            Self::Structure(_) => "STRUCTURE",
            Self::Table(_) => "TABLE",
        }
    }
}

#[derive(Debug, Default)]
struct Node {
    fields: Vec<(String, Value)>,
    strict: bool,
    probe_misses: usize,
}

impl Node {
    fn get(&self, name: &str) -> Option<&Value> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    fn put(&mut self, name: &str, value: Value) {
        match self.fields.iter_mut().find(|(n, _)| n == name) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((name.to_string(), value)),
        }
    }

    /// Resolve a scalar read: `Ok(None)` means "never written, use default".
    fn read(&self, name: &str) -> RfcResult<Option<&Value>> {
        match self.get(name) {
            Some(value) => Ok(Some(value)),
            None if self.strict => Err(not_found(name)),
            None => Ok(None),
        }
    }
}

fn not_found(name: &str) -> ErrorInfo {
    ErrorInfo::new(ReturnCode::NotFound, format!("field {} not found", name))
}

fn mismatch(name: &str, expected: &str, found: &Value) -> ErrorInfo {
    ErrorInfo::new(
        ReturnCode::InvalidParameter,
        format!(
            "field {} is of type {}, not {}",
            name,
            found.type_name(),
            expected
        ),
    )
}

/// In-memory [`DataContainer`].
#[derive(Debug, Clone, Default)]
pub struct MemoryContainer {
    node: Arc<Mutex<Node>>,
}

impl MemoryContainer {
    /// Permissive container: unwritten fields read as remote defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Strict container: reading an unwritten scalar field fails with
    /// `RFC_NOT_FOUND`. Nested structures and rows inherit the mode.
    pub fn strict() -> Self {
        Self::with_mode(true)
    }

    fn with_mode(strict: bool) -> Self {
        Self {
            node: Arc::new(Mutex::new(Node {
                strict,
                ..Node::default()
            })),
        }
    }

    /// Names of all fields written or requested so far, in creation order.
    pub fn field_names(&self) -> Vec<String> {
        self.node
            .lock()
            .fields
            .iter()
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// True if `name` was written or requested.
    pub fn contains(&self, name: &str) -> bool {
        self.node.lock().get(name).is_some()
    }

    /// Stored text of a CHAR, STRING, DATE or TIME field.
    pub fn text(&self, name: &str) -> Option<String> {
        match self.node.lock().get(name)? {
            Value::Chars(v) | Value::String(v) => Some(super::from_sap(v)),
            Value::Date(v) => Some(super::from_sap(v)),
            Value::Time(v) => Some(super::from_sap(v)),
            _ => None,
        }
    }

    /// Nested structure stored under `name`, if it exists.
    pub fn structure(&self, name: &str) -> Option<MemoryContainer> {
        match self.node.lock().get(name)? {
            Value::Structure(c) => Some(c.clone()),
            _ => None,
        }
    }

    /// Table stored under `name`, if it exists.
    pub fn table(&self, name: &str) -> Option<MemoryTable> {
        match self.node.lock().get(name)? {
            Value::Table(t) => Some(t.clone()),
            _ => None,
        }
    }

    /// Number of variable-length reads answered with `TooSmall`.
    pub fn probe_misses(&self) -> usize {
        self.node.lock().probe_misses
    }

    fn put(&self, name: &str, value: Value) -> RfcResult<()> {
        self.node.lock().put(name, value);
        Ok(())
    }

    fn fetch_into<T: Copy>(&self, name: &str, stored: &[T], buffer: &mut [T]) -> Fetched {
        if stored.len() > buffer.len() {
            self.node.lock().probe_misses += 1;
            log::trace!(
                "[MemoryContainer::fetch] {}: buffer {} < {}",
                name,
                buffer.len(),
                stored.len()
            );
            return Fetched::TooSmall(stored.len());
        }
        buffer[..stored.len()].copy_from_slice(stored);
        Fetched::Complete(stored.len())
    }
}

impl DataContainer for MemoryContainer {
    fn get_structure(&self, name: &str) -> RfcResult<Box<dyn DataContainer + '_>> {
        let mut node = self.node.lock();
        let child = match node.get(name) {
            Some(Value::Structure(c)) => c.clone(),
            Some(other) => return Err(mismatch(name, "STRUCTURE", other)),
            None => {
                let child = MemoryContainer::with_mode(node.strict);
                node.put(name, Value::Structure(child.clone()));
                child
            }
        };
        Ok(Box::new(child))
    }

    fn get_table(&self, name: &str) -> RfcResult<Box<dyn TableContainer + '_>> {
        let mut node = self.node.lock();
        let table = match node.get(name) {
            Some(Value::Table(t)) => t.clone(),
            Some(other) => return Err(mismatch(name, "TABLE", other)),
            None => {
                let table = MemoryTable::with_mode(node.strict);
                node.put(name, Value::Table(table.clone()));
                table
            }
        };
        Ok(Box::new(table))
    }

    fn set_chars(&self, name: &str, value: &[SapUc]) -> RfcResult<()> {
        self.put(name, Value::Chars(value.to_vec()))
    }

    fn get_chars(&self, name: &str, buffer: &mut [SapUc]) -> RfcResult<()> {
        let node = self.node.lock();
        match node.read(name)? {
            Some(Value::Chars(stored)) => {
                if stored.len() > buffer.len() {
                    return Err(ErrorInfo::new(
                        ReturnCode::BufferTooSmall,
                        format!("field {} holds {} characters", name, stored.len()),
                    ));
                }
                buffer[..stored.len()].copy_from_slice(stored);
                buffer[stored.len()..].fill(BLANK);
                Ok(())
            }
            Some(other) => Err(mismatch(name, "CHAR", other)),
            None => {
                buffer.fill(BLANK);
                Ok(())
            }
        }
    }

    fn set_int(&self, name: &str, value: i32) -> RfcResult<()> {
        self.put(name, Value::Int(value))
    }

    fn get_int(&self, name: &str) -> RfcResult<i32> {
        match self.node.lock().read(name)? {
            Some(Value::Int(v)) => Ok(*v),
            Some(other) => Err(mismatch(name, "INT", other)),
            None => Ok(0),
        }
    }

    fn set_int8(&self, name: &str, value: i64) -> RfcResult<()> {
        self.put(name, Value::Int8(value))
    }

    fn get_int8(&self, name: &str) -> RfcResult<i64> {
        match self.node.lock().read(name)? {
            Some(Value::Int8(v)) => Ok(*v),
            Some(other) => Err(mismatch(name, "INT8", other)),
            None => Ok(0),
        }
    }

    fn set_date(&self, name: &str, value: &[SapUc; 8]) -> RfcResult<()> {
        self.put(name, Value::Date(*value))
    }

    fn get_date(&self, name: &str, buffer: &mut [SapUc; 8]) -> RfcResult<()> {
        match self.node.lock().read(name)? {
            Some(Value::Date(v)) => *buffer = *v,
            Some(other) => return Err(mismatch(name, "DATE", other)),
            None => buffer.fill(ZERO),
        }
        Ok(())
    }

    fn set_time(&self, name: &str, value: &[SapUc; 6]) -> RfcResult<()> {
        self.put(name, Value::Time(*value))
    }

    fn get_time(&self, name: &str, buffer: &mut [SapUc; 6]) -> RfcResult<()> {
        match self.node.lock().read(name)? {
            Some(Value::Time(v)) => *buffer = *v,
            Some(other) => return Err(mismatch(name, "TIME", other)),
            None => buffer.fill(ZERO),
        }
        Ok(())
    }

    fn set_string(&self, name: &str, value: &[SapUc]) -> RfcResult<()> {
        self.put(name, Value::String(value.to_vec()))
    }

    fn get_string(&self, name: &str, buffer: &mut [SapUc]) -> RfcResult<Fetched> {
        let stored = match self.node.lock().read(name)? {
            Some(Value::String(v)) => v.clone(),
            Some(other) => return Err(mismatch(name, "STRING", other)),
            None => Vec::new(),
        };
        Ok(self.fetch_into(name, &stored, buffer))
    }

    fn set_xstring(&self, name: &str, value: &[u8]) -> RfcResult<()> {
        self.put(name, Value::XString(value.to_vec()))
    }

    fn get_xstring(&self, name: &str, buffer: &mut [u8]) -> RfcResult<Fetched> {
        let stored = match self.node.lock().read(name)? {
            Some(Value::XString(v)) => v.clone(),
            Some(other) => return Err(mismatch(name, "XSTRING", other)),
            None => Vec::new(),
        };
        Ok(self.fetch_into(name, &stored, buffer))
    }
}

#[derive(Debug, Default)]
struct TableState {
    rows: Vec<MemoryContainer>,
    cursor: Option<usize>,
    strict: bool,
}

/// In-memory [`TableContainer`].
#[derive(Debug, Clone, Default)]
pub struct MemoryTable {
    state: Arc<Mutex<TableState>>,
}

impl MemoryTable {
    fn with_mode(strict: bool) -> Self {
        Self {
            state: Arc::new(Mutex::new(TableState {
                strict,
                ..TableState::default()
            })),
        }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.state.lock().rows.len()
    }

    /// True if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Row handle at `index`, without moving the cursor.
    pub fn row(&self, index: usize) -> Option<MemoryContainer> {
        self.state.lock().rows.get(index).cloned()
    }
}

impl TableContainer for MemoryTable {
    fn row_count(&self) -> RfcResult<usize> {
        Ok(self.len())
    }

    fn move_to(&self, index: usize) -> RfcResult<()> {
        let mut state = self.state.lock();
        if index >= state.rows.len() {
            return Err(ErrorInfo::new(
                ReturnCode::TableMoveEof,
                format!("row {} beyond table end ({})", index, state.rows.len()),
            ));
        }
        state.cursor = Some(index);
        Ok(())
    }

    fn current_row(&self) -> RfcResult<Box<dyn DataContainer + '_>> {
        let state = self.state.lock();
        match state.cursor.and_then(|i| state.rows.get(i)) {
            Some(row) => Ok(Box::new(row.clone())),
            None => Err(ErrorInfo::new(
                ReturnCode::IllegalState,
                "table cursor is not positioned on a row",
            )),
        }
    }

    fn append_row(&self) -> RfcResult<Box<dyn DataContainer + '_>> {
        let mut state = self.state.lock();
        let row = MemoryContainer::with_mode(state.strict);
        state.rows.push(row.clone());
        state.cursor = Some(state.rows.len() - 1);
        Ok(Box::new(row))
    }
}
