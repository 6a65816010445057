// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use super::{all_of, BLANK};
use crate::container::{from_sap, DataContainer, SapUc};
use crate::error::{CodecError, CodecResult};
use chrono::{NaiveTime, Timelike};
use std::fmt::{self, Write as _};
use std::str::FromStr;

const WIDTH: usize = 6;

/// `HHMMSS` time field (`time`).
///
/// Same sentinel rules as [`RfcDate`](super::RfcDate): blank or zero decodes
/// to `None`, `None` displays as `000000`. Midnight therefore reads back as
/// `None`. Fractional seconds are dropped on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RfcTime(pub Option<NaiveTime>);

impl RfcTime {
    /// Wrap an optional time of day.
    pub fn new(time: Option<NaiveTime>) -> Self {
        Self(time)
    }

    /// `None` for the "no time" sentinel.
    pub fn value(&self) -> Option<NaiveTime> {
        self.0
    }

    /// Wire form of the time.
    pub fn to_buffer(&self) -> CodecResult<[SapUc; WIDTH]> {
        let text = self.to_string();
        if text.len() != WIDTH {
            return Err(CodecError::MalformedTime(text));
        }
        let mut buffer = [0; WIDTH];
        for (slot, unit) in buffer.iter_mut().zip(text.encode_utf16()) {
            *slot = unit;
        }
        Ok(buffer)
    }

    /// Write the time. No-op for `None`.
    pub fn set_field(&self, container: &dyn DataContainer, name: &str) -> CodecResult<()> {
        if self.0.is_none() {
            return Ok(());
        }
        container.set_time(name, &self.to_buffer()?)?;
        Ok(())
    }

    /// Read the field; blank or zero times yield `RfcTime(None)`.
    pub fn get_field(container: &dyn DataContainer, name: &str) -> CodecResult<Self> {
        let mut buffer = [BLANK; WIDTH];
        container.get_time(name, &mut buffer)?;
        from_sap(&buffer).parse()
    }
}

impl From<NaiveTime> for RfcTime {
    fn from(time: NaiveTime) -> Self {
        Self(Some(time))
    }
}

impl FromStr for RfcTime {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if all_of(s, ' ') || all_of(s, '0') {
            return Ok(Self(None));
        }

        let malformed = || CodecError::MalformedTime(s.to_string());
        if s.len() != WIDTH || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed());
        }
        let part = |range: std::ops::Range<usize>| s[range].parse::<u32>().map_err(|_| malformed());
        let (hour, minute, second) = (part(0..2)?, part(2..4)?, part(4..6)?);
        NaiveTime::from_hms_opt(hour, minute, second)
            .map(|t| Self(Some(t)))
            .ok_or_else(malformed)
    }
}

impl fmt::Display for RfcTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(t) => write!(f, "{:02}{:02}{:02}", t.hour(), t.minute(), t.second()),
            None => (0..WIDTH).try_for_each(|_| f.write_char('0')),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::MemoryContainer;

    fn hms(h: u32, m: u32, s: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, s).unwrap()
    }

    #[test]
    fn canonical_form() {
        assert_eq!(RfcTime::from(hms(7, 5, 9)).to_string(), "070509");
        assert_eq!(RfcTime(None).to_string(), "000000");
    }

    #[test]
    fn sentinels_decode_to_none() {
        assert_eq!("000000".parse::<RfcTime>().unwrap(), RfcTime(None));
        assert_eq!("      ".parse::<RfcTime>().unwrap(), RfcTime(None));
        assert_eq!("235959".parse::<RfcTime>().unwrap(), RfcTime::from(hms(23, 59, 59)));
    }

    #[test]
    fn malformed_inputs() {
        for bad in ["24000", "250000", "126000", "12:00:00", "1200ab"] {
            assert!(
                matches!(bad.parse::<RfcTime>(), Err(CodecError::MalformedTime(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn container_round_trip() {
        let container = MemoryContainer::new();
        RfcTime::from(hms(14, 30, 0)).set_field(&container, "UZEIT").unwrap();
        assert_eq!(container.text("UZEIT").as_deref(), Some("143000"));
        assert_eq!(
            RfcTime::get_field(&container, "UZEIT").unwrap().value(),
            Some(hms(14, 30, 0))
        );

        RfcTime(None).set_field(&container, "CPUTM").unwrap();
        assert!(!container.contains("CPUTM"));
        assert_eq!(RfcTime::get_field(&container, "CPUTM").unwrap(), RfcTime(None));
    }
}
