// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use crate::container::DataContainer;
use crate::error::CodecResult;

/// 4-byte integer field (`int`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RfcInt(pub i32);

impl RfcInt {
    /// Write the integer.
    pub fn set_field(&self, container: &dyn DataContainer, name: &str) -> CodecResult<()> {
        container.set_int(name, self.0)?;
        Ok(())
    }

    /// Read the integer.
    pub fn get_field(container: &dyn DataContainer, name: &str) -> CodecResult<Self> {
        Ok(Self(container.get_int(name)?))
    }
}

impl From<i32> for RfcInt {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

/// 8-byte integer field (`int8`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RfcInt8(pub i64);

impl RfcInt8 {
    /// Write the 64-bit integer.
    pub fn set_field(&self, container: &dyn DataContainer, name: &str) -> CodecResult<()> {
        container.set_int8(name, self.0)?;
        Ok(())
    }

    /// Read the 64-bit integer.
    pub fn get_field(container: &dyn DataContainer, name: &str) -> CodecResult<Self> {
        Ok(Self(container.get_int8(name)?))
    }
}

impl From<i64> for RfcInt8 {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::MemoryContainer;

    #[test]
    fn pass_through() {
        let container = MemoryContainer::new();
        RfcInt(2024).set_field(&container, "GJAHR").unwrap();
        RfcInt8(i64::MIN).set_field(&container, "DOCNUM").unwrap();

        assert_eq!(RfcInt::get_field(&container, "GJAHR").unwrap(), RfcInt(2024));
        assert_eq!(RfcInt8::get_field(&container, "DOCNUM").unwrap().0, i64::MIN);
        assert!(RfcInt8::get_field(&container, "GJAHR").is_err());
    }
}
