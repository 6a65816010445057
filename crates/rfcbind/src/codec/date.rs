// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use super::{all_of, BLANK};
use crate::container::{from_sap, DataContainer, SapUc};
use crate::error::{CodecError, CodecResult};
use chrono::{Datelike, NaiveDate};
use std::fmt::{self, Write as _};
use std::str::FromStr;

const WIDTH: usize = 8;

/// `YYYYMMDD` date field (`date`).
///
/// The remote side has no null date: an all-blank or all-zero field means
/// "no date" and decodes to `RfcDate(None)`. `None` displays as `00000000`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RfcDate(pub Option<NaiveDate>);

impl RfcDate {
    /// Wrap an optional date.
    pub fn new(date: Option<NaiveDate>) -> Self {
        Self(date)
    }

    /// `None` for the "no date" sentinel.
    pub fn value(&self) -> Option<NaiveDate> {
        self.0
    }

    /// Wire form of the date.
    pub fn to_buffer(&self) -> CodecResult<[SapUc; WIDTH]> {
        let text = self.to_string();
        let mut buffer = [0; WIDTH];
        if text.len() != WIDTH || !text.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CodecError::MalformedDate(text));
        }
        for (slot, unit) in buffer.iter_mut().zip(text.encode_utf16()) {
            *slot = unit;
        }
        Ok(buffer)
    }

    /// Write the date. No-op for `None`.
    pub fn set_field(&self, container: &dyn DataContainer, name: &str) -> CodecResult<()> {
        if self.0.is_none() {
            return Ok(());
        }
        container.set_date(name, &self.to_buffer()?)?;
        Ok(())
    }

    /// Read the field; blank or zero dates yield `RfcDate(None)`.
    pub fn get_field(container: &dyn DataContainer, name: &str) -> CodecResult<Self> {
        let mut buffer = [BLANK; WIDTH];
        container.get_date(name, &mut buffer)?;
        from_sap(&buffer).parse()
    }
}

impl From<NaiveDate> for RfcDate {
    fn from(date: NaiveDate) -> Self {
        Self(Some(date))
    }
}

impl FromStr for RfcDate {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if all_of(s, ' ') || all_of(s, '0') {
            return Ok(Self(None));
        }

        let malformed = || CodecError::MalformedDate(s.to_string());
        if s.len() != WIDTH || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed());
        }
        let year = s[0..4].parse::<i32>().map_err(|_| malformed())?;
        let month = s[4..6].parse::<u32>().map_err(|_| malformed())?;
        let day = s[6..8].parse::<u32>().map_err(|_| malformed())?;
        NaiveDate::from_ymd_opt(year, month, day)
            .map(|d| Self(Some(d)))
            .ok_or_else(malformed)
    }
}

impl fmt::Display for RfcDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(d) => write!(f, "{:04}{:02}{:02}", d.year(), d.month(), d.day()),
            None => (0..WIDTH).try_for_each(|_| f.write_char('0')),
        }
    }
}
