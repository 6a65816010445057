// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use super::BLANK;
use crate::container::{from_sap, DataContainer, SapUc};
use crate::error::CodecResult;
use crate::mapper::{Alignment, DEFAULT_PADDING};

/// Fixed-width character field (`char`).
///
/// Values longer than `length` are truncated silently, on a character
/// boundary: a character needing two units that does not fit is dropped
/// and its unit is padded like any other shortfall. Shorter values are
/// padded according to the alignment: `Left` appends padding, `Right`
/// prepends it, `None` writes the value without padding and leaves the
/// rest of the field to the container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RfcChar {
    length: usize,
    alignment: Alignment,
    padding: char,
}

impl RfcChar {
    /// Right-aligned, blank-padded field of `length` characters.
    pub fn new(length: usize) -> Self {
        Self {
            length,
            alignment: Alignment::default(),
            padding: DEFAULT_PADDING,
        }
    }

    /// Padding outside the basic multilingual plane is written as a blank.
    pub fn aligned(mut self, alignment: Alignment, padding: char) -> Self {
        self.alignment = alignment;
        self.padding = padding;
        self
    }

    /// Field width in UTF-16 units.
    pub fn length(&self) -> usize {
        self.length
    }

    /// Lay `value` out in the field.
    pub fn format(&self, value: &str) -> Vec<SapUc> {
        let mut units: Vec<SapUc> = Vec::with_capacity(self.length);
        let mut encoded = [0; 2];
        for ch in value.chars() {
            let unit = ch.encode_utf16(&mut encoded);
            // a surrogate pair is never split
            if units.len() + unit.len() > self.length {
                break;
            }
            units.extend_from_slice(unit);
        }
        let missing = self.length - units.len();
        if missing == 0 {
            return units;
        }

        let pad = pad_unit(self.padding);
        match self.alignment {
            Alignment::None => {}
            Alignment::Left => units.resize(self.length, pad),
            Alignment::Right => {
                units.splice(0..0, std::iter::repeat(pad).take(missing));
            }
        }
        units
    }

    /// Write `value` laid out by [`format`](Self::format).
    pub fn set_field(&self, container: &dyn DataContainer, name: &str, value: &str) -> CodecResult<()> {
        container.set_chars(name, &self.format(value))?;
        Ok(())
    }

    /// Read the whole field, padding included.
    pub fn get_field(&self, container: &dyn DataContainer, name: &str) -> CodecResult<String> {
        let mut buffer = vec![BLANK; self.length];
        container.get_chars(name, &mut buffer)?;
        Ok(from_sap(&buffer))
    }
}

/// Padding outside the basic multilingual plane cannot fill a single unit.
fn pad_unit(padding: char) -> SapUc {
    u16::try_from(u32::from(padding)).unwrap_or(BLANK)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::{to_sap, MemoryContainer};

    fn text(units: Vec<SapUc>) -> String {
        from_sap(&units)
    }

    #[test]
    fn left_and_right_alignment() {
        let left = RfcChar::new(5).aligned(Alignment::Left, '0');
        let right = RfcChar::new(5).aligned(Alignment::Right, '0');
        assert_eq!(text(left.format("AB")), "AB000");
        assert_eq!(text(right.format("AB")), "000AB");
    }

    #[test]
    fn default_pads_with_leading_blanks() {
        assert_eq!(text(RfcChar::new(4).format("10")), "  10");
    }

    #[test]
    fn no_alignment_writes_value_only() {
        let c = RfcChar::new(6).aligned(Alignment::None, '*');
        assert_eq!(text(c.format("AB")), "AB");
    }

    #[test]
    fn long_values_are_truncated() {
        let c = RfcChar::new(4).aligned(Alignment::Left, ' ');
        assert_eq!(text(c.format("ABCDEFG")), "ABCD");
        assert_eq!(text(c.format("ABCD")), "ABCD");
    }

    #[test]
    fn truncation_keeps_surrogate_pairs_whole() {
        let left = RfcChar::new(3).aligned(Alignment::Left, ' ');
        assert_eq!(text(left.format("AB\u{1F600}Z")), "AB ");
        assert_eq!(text(left.format("A\u{1F600}Z")), "A\u{1F600}");

        let right = RfcChar::new(3).aligned(Alignment::Right, '0');
        assert_eq!(text(right.format("AB\u{1F600}")), "0AB");

        let container = MemoryContainer::new();
        left.set_field(&container, "NAME", "AB\u{1F600}Z").unwrap();
        assert_eq!(left.get_field(&container, "NAME").unwrap(), "AB ");
    }

    #[test]
    fn wide_padding_falls_back_to_blank() {
        let c = RfcChar::new(4).aligned(Alignment::Left, '\u{1F600}');
        assert_eq!(text(c.format("AB")), "AB  ");
    }

    #[test]
    fn field_round_trip_keeps_padding() {
        let container = MemoryContainer::new();
        let c = RfcChar::new(10).aligned(Alignment::Left, ' ');
        c.set_field(&container, "GLACCT", "476000").unwrap();
        assert_eq!(container.text("GLACCT").as_deref(), Some("476000    "));
        assert_eq!(c.get_field(&container, "GLACCT").unwrap(), "476000    ");

        // unpadded write, container fills the tail with blanks
        let c = RfcChar::new(4).aligned(Alignment::None, ' ');
        container.set_chars("BUKRS", &to_sap("10")).unwrap();
        assert_eq!(c.get_field(&container, "BUKRS").unwrap(), "10  ");
    }
}
