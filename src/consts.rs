//! The closed set of BSON element types and the constants of the wire format.

use std::convert::TryFrom;

use crate::error::Error;

/// Width of a buffer big enough for any positional array key, including the
/// trailing `'\0'`.
pub const INT_KEY_SIZE: usize = 12;

/// Byte ending the element list of every document.
pub const TERMINATOR: u8 = 0x00;

/// Encoded widths of the fixed size payloads.
pub mod size {
    pub const BYTE: usize = 1;
    pub const INT32: usize = 4;
    pub const INT64: usize = 8;
    pub const DOUBLE: usize = 8;
    pub const DECIMAL128: usize = 16;
    /// Length prefix plus terminator of an empty document.
    pub const EMPTY_DOCUMENT: usize = INT32 + BYTE;
}

/// Formats a positional array key, always shorter than [`INT_KEY_SIZE`].
#[inline]
pub fn index_key(index: u32, buf: &mut itoa::Buffer) -> &str {
    buf.format(index)
}

/// Element type tag.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ElementType {
    Double = 0x01,
    /// Length prefixed, may contain `'\0'` bytes
    String = 0x02,
    Document = 0x03,
    Array = 0x04,
    Binary = 0x05,
    Boolean = 0x08,
    Null = 0x0A,
    Int32 = 0x10,
    Int64 = 0x12,
    /// Reserved, no accessor reads it and the validator rejects it
    Decimal128 = 0x13,
}

impl ElementType {
    pub fn from_u8(tag: u8) -> Option<Self> {
        use ElementType::*;
        let ty = match tag {
            0x01 => Double,
            0x02 => String,
            0x03 => Document,
            0x04 => Array,
            0x05 => Binary,
            0x08 => Boolean,
            0x0A => Null,
            0x10 => Int32,
            0x12 => Int64,
            0x13 => Decimal128,
            _ => return None,
        };
        Some(ty)
    }

    /// Payload width of types that don't carry a length prefix.
    pub fn fixed_size(self) -> Option<usize> {
        use ElementType::*;
        match self {
            Double => Some(size::DOUBLE),
            Boolean => Some(size::BYTE),
            Null => Some(0),
            Int32 => Some(size::INT32),
            Int64 => Some(size::INT64),
            Decimal128 => Some(size::DECIMAL128),
            String | Document | Array | Binary => None,
        }
    }

    pub fn is_document(self) -> bool {
        self == ElementType::Document || self == ElementType::Array
    }
}

impl TryFrom<u8> for ElementType {
    type Error = Error;

    fn try_from(tag: u8) -> std::result::Result<Self, Error> {
        ElementType::from_u8(tag).ok_or(Error)
    }
}

/// Binary payload subtype, only the generic one is supported.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BinarySubtype {
    Generic = 0x00,
}

/// Legal values of a boolean payload byte.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BooleanValue {
    False = 0x00,
    True = 0x01,
}

impl From<bool> for BooleanValue {
    fn from(b: bool) -> Self {
        if b {
            BooleanValue::True
        } else {
            BooleanValue::False
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_round_trip() {
        for tag in 0..=u8::MAX {
            if let Some(ty) = ElementType::from_u8(tag) {
                assert_eq!(ty as u8, tag);
            }
        }
        assert_eq!(ElementType::from_u8(0x11), None);
        assert!(ElementType::try_from(0x00).is_err());
    }

    #[test]
    fn index_key_fits() {
        let mut buf = itoa::Buffer::new();
        assert_eq!(index_key(0, &mut buf), "0");
        assert_eq!(index_key(8, &mut buf), "8");
        assert!(index_key(u32::MAX, &mut buf).len() < INT_KEY_SIZE);
    }
}
