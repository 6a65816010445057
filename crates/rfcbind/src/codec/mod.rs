// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Codecs for the primitive wire types.
//!
//! Each codec reads and writes one named field of a [`DataContainer`] and
//! can be used on its own, outside of the record encoder and decoder:
//!
//! | Codec | Wire type | Rust value |
//! |---|---|---|
//! | [`RfcChar`] | `char` | fixed-width text |
//! | [`RfcDate`] | `date` | `Option<NaiveDate>` |
//! | [`RfcTime`] | `time` | `Option<NaiveTime>` |
//! | [`RfcBcd`] | `bcd` | `BigDecimal` |
//! | [`RfcString`] | `string` | `String` |
//! | [`RfcXString`] | `xstring` | `Vec<u8>` |
//! | [`RfcInt`] | `int` | `i32` |
//! | [`RfcInt8`] | `int8` | `i64` |
//!
//! Failures are reported as [`CodecError`](crate::CodecError) without field
//! context.
//!
//! [`DataContainer`]: crate::container::DataContainer

mod bcd;
mod chars;
mod date;
mod int;
mod string;
mod time;

pub use bcd::RfcBcd;
pub use chars::RfcChar;
pub use date::RfcDate;
pub use int::{RfcInt, RfcInt8};
pub use string::{RfcString, RfcXString};
pub use time::RfcTime;

use crate::container::{Fetched, RfcResult, SapUc};
use crate::error::{CodecError, CodecResult};

pub(crate) const BLANK: SapUc = b' ' as SapUc;

/// Read a variable-length value with the probe-then-retry protocol.
///
/// The first read uses a `probe_len` buffer. If the container answers that
/// the buffer is too small, the buffer is reallocated to the reported size
/// and the read is retried once.
pub(crate) fn read_probed<U: Copy + Default>(
    name: &str,
    probe_len: usize,
    mut fetch: impl FnMut(&mut [U]) -> RfcResult<Fetched>,
) -> CodecResult<Vec<U>> {
    let mut buffer = vec![U::default(); probe_len];
    let required = match fetch(&mut buffer)? {
        Fetched::Complete(len) => {
            buffer.truncate(len);
            return Ok(buffer);
        }
        Fetched::TooSmall(required) => required,
    };

    log::debug!(
        "[codec::read_probed] {}: {} units do not fit probe of {}, retrying",
        name,
        required,
        probe_len
    );
    buffer = vec![U::default(); required];
    match fetch(&mut buffer)? {
        Fetched::Complete(len) => {
            buffer.truncate(len);
            Ok(buffer)
        }
        Fetched::TooSmall(required) => Err(CodecError::BufferRetryExhausted {
            required,
            capacity: buffer.len(),
        }),
    }
}

/// True if `text` consists only of `unit` characters (or is empty).
pub(crate) fn all_of(text: &str, unit: char) -> bool {
    text.chars().all(|c| c == unit)
}
