// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! External parameter container interface.
//!
//! The remote function library exposes its parameters as a tree of opaque
//! handles: the function's top-level parameter list, nested structures, and
//! tables whose rows are again structures. Every field is addressed by its
//! wire name only; the caller must already know the field's type and width.
//!
//! [`DataContainer`] and [`TableContainer`] describe that surface. A native
//! binding implements them over raw handles; [`MemoryContainer`] implements
//! them in memory for tests and tooling.
//!
//! Child handles borrow their parent (`Box<dyn DataContainer + '_>`), so a
//! handle obtained during an encode or decode call cannot outlive it.

mod error_info;
mod memory;

pub use error_info::{ErrorGroup, ErrorInfo, ReturnCode};
pub use memory::{MemoryContainer, MemoryTable};

/// Character unit of the remote library (UTF-16 code unit).
pub type SapUc = u16;

/// Result of a container operation.
pub type RfcResult<T> = Result<T, ErrorInfo>;

/// Outcome of reading a variable-length field into a caller-sized buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fetched {
    /// The value fit; this many units were written.
    Complete(usize),
    /// The buffer was too small; the value needs exactly this many units.
    TooSmall(usize),
}

/// One level of the remote parameter tree: the top-level parameter list, a
/// structure, or a single table row.
pub trait DataContainer {
    /// Handle to the structure stored under `name`.
    fn get_structure(&self, name: &str) -> RfcResult<Box<dyn DataContainer + '_>>;

    /// Handle to the table stored under `name`.
    fn get_table(&self, name: &str) -> RfcResult<Box<dyn TableContainer + '_>>;

    /// Write a fixed-length character field.
    fn set_chars(&self, name: &str, value: &[SapUc]) -> RfcResult<()>;

    /// Read a fixed-length character field into `buffer`. Units past the
    /// stored value are left as the container fills them (blank for CHAR).
    fn get_chars(&self, name: &str, buffer: &mut [SapUc]) -> RfcResult<()>;

    fn set_int(&self, name: &str, value: i32) -> RfcResult<()>;

    fn get_int(&self, name: &str) -> RfcResult<i32>;

    fn set_int8(&self, name: &str, value: i64) -> RfcResult<()>;

    fn get_int8(&self, name: &str) -> RfcResult<i64>;

    /// Write a DATS field (`YYYYMMDD`).
    fn set_date(&self, name: &str, value: &[SapUc; 8]) -> RfcResult<()>;

    fn get_date(&self, name: &str, buffer: &mut [SapUc; 8]) -> RfcResult<()>;

    /// Write a TIMS field (`HHMMSS`).
    fn set_time(&self, name: &str, value: &[SapUc; 6]) -> RfcResult<()>;

    fn get_time(&self, name: &str, buffer: &mut [SapUc; 6]) -> RfcResult<()>;

    /// Write a variable-length string (also used for packed decimals).
    fn set_string(&self, name: &str, value: &[SapUc]) -> RfcResult<()>;

    /// Read a variable-length string. The container cannot report the
    /// length up front; an undersized buffer yields [`Fetched::TooSmall`]
    /// with the exact required length.
    fn get_string(&self, name: &str, buffer: &mut [SapUc]) -> RfcResult<Fetched>;

    /// Write a variable-length byte string.
    fn set_xstring(&self, name: &str, value: &[u8]) -> RfcResult<()>;

    /// Read a variable-length byte string (same protocol as `get_string`).
    fn get_xstring(&self, name: &str, buffer: &mut [u8]) -> RfcResult<Fetched>;
}

/// A table parameter: an ordered list of rows with a cursor.
pub trait TableContainer {
    fn row_count(&self) -> RfcResult<usize>;

    /// Position the cursor on row `index`.
    fn move_to(&self, index: usize) -> RfcResult<()>;

    /// Handle to the row under the cursor.
    fn current_row(&self) -> RfcResult<Box<dyn DataContainer + '_>>;

    /// Append an empty row, move the cursor onto it and return its handle.
    fn append_row(&self) -> RfcResult<Box<dyn DataContainer + '_>>;
}

/// Encode text into container units.
pub fn to_sap(text: &str) -> Vec<SapUc> {
    text.encode_utf16().collect()
}

/// Decode container units into text. Unpaired surrogates are replaced.
pub fn from_sap(units: &[SapUc]) -> String {
    String::from_utf16_lossy(units)
}
