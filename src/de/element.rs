use std::fmt;
use std::str;

use crate::consts::{size, BooleanValue, ElementType};
use crate::de::{Array, Document, Value};
use crate::endian::{checked_read_i32, read_f64, read_i32, read_i64};
use crate::error::{Error, Result};

/// Zero-copy view of one encoded element: type tag, name and payload.
///
/// The plain getters (`get_*`) trust the caller: the element type must have
/// been checked with [`ty`](Element::ty) or [`is`](Element::is) first.
/// Calling the wrong getter reinterprets the payload bytes as another type,
/// and on input that wasn't [validated](Document::valid) a getter may panic
/// on a slice bound. The `try_*` getters check the type and return `None`
/// on a mismatch without touching the payload.
#[derive(Copy, Clone)]
pub struct Element<'a> {
    buf: &'a [u8],
    start: usize,
    /// Name length without the `'\0'`, scanned once on construction
    name_len: usize,
}

/// Copies a cstring into `to`, truncating it when needed but always leaving
/// a `'\0'` at the end. Returns the number of bytes written.
fn copy_cstr(from: &[u8], to: &mut [u8]) -> usize {
    if to.is_empty() {
        return 0;
    }
    let n = from
        .iter()
        .position(|b| *b == 0)
        .unwrap_or(from.len())
        .min(to.len() - 1);
    to[..n].copy_from_slice(&from[..n]);
    to[n] = 0;
    n + 1
}

impl<'a> Element<'a> {
    pub(crate) fn at(buf: &'a [u8], start: usize) -> Self {
        let name = buf.get(start + size::BYTE..).unwrap_or(&[]);
        let name_len = name.iter().position(|b| *b == 0).unwrap_or(name.len());
        Element {
            buf,
            start,
            name_len,
        }
    }

    /// Offset of the type byte within the buffer.
    pub fn offset(&self) -> usize {
        self.start
    }

    /// Raw type tag.
    pub fn tag(&self) -> u8 {
        self.buf[self.start]
    }

    /// Element type, `None` for a tag outside of the catalog.
    pub fn ty(&self) -> Option<ElementType> {
        ElementType::from_u8(self.tag())
    }

    pub fn is(&self, ty: ElementType) -> bool {
        self.tag() == ty as u8
    }

    pub fn is_number(&self) -> bool {
        matches!(
            self.ty(),
            Some(ElementType::Int32) | Some(ElementType::Int64) | Some(ElementType::Double)
        )
    }

    pub fn is_int(&self) -> bool {
        matches!(
            self.ty(),
            Some(ElementType::Int32) | Some(ElementType::Int64)
        )
    }

    pub fn is_null(&self) -> bool {
        self.is(ElementType::Null)
    }

    /// Element name without its `'\0'`.
    pub fn name(&self) -> &'a [u8] {
        let start = self.start + size::BYTE;
        &self.buf[start..start + self.name_len]
    }

    /// Element name, `None` if it isn't utf8.
    pub fn name_str(&self) -> Option<&'a str> {
        str::from_utf8(self.name()).ok()
    }

    pub fn name_equals(&self, name: &str) -> bool {
        self.name() == name.as_bytes()
    }

    /// Copies the name into `out` as a cstring, truncated if `out` is too
    /// short. Returns the number of bytes written, `'\0'` included.
    pub fn copy_name_to(&self, out: &mut [u8]) -> usize {
        copy_cstr(self.name(), out)
    }

    /// Size of the name on the wire, `'\0'` included.
    pub fn name_size(&self) -> usize {
        self.name_len + 1
    }

    fn data_offset(&self) -> usize {
        self.start + size::BYTE + self.name_size()
    }

    /// Payload size or `None` when it can't be known: unknown tag or a
    /// length prefix past the end of the buffer.
    pub(crate) fn checked_data_size(&self) -> Option<usize> {
        let ty = self.ty()?;
        if let Some(n) = ty.fixed_size() {
            return Some(n);
        }

        let len = checked_read_i32(self.buf, self.data_offset())?.max(0) as usize;
        let n = match ty {
            // Documents and arrays count their own length prefix
            ty if ty.is_document() => len,
            ElementType::String => size::INT32 + len,
            ElementType::Binary => size::INT32 + size::BYTE + len,
            _ => unreachable!(),
        };
        Some(n)
    }

    /// Payload size in bytes, `0` for an unknown tag.
    pub fn data_size(&self) -> usize {
        self.checked_data_size().unwrap_or(0)
    }

    /// Size of the whole element: type byte, name and payload.
    pub fn size(&self) -> usize {
        size::BYTE + self.name_size() + self.data_size()
    }

    pub fn get_double(&self) -> f64 {
        read_f64(self.buf, self.data_offset())
    }

    pub fn get_int32(&self) -> i32 {
        read_i32(self.buf, self.data_offset())
    }

    pub fn get_int64(&self) -> i64 {
        read_i64(self.buf, self.data_offset())
    }

    pub fn get_bool(&self) -> bool {
        self.buf[self.data_offset()] == BooleanValue::True as u8
    }

    /// Any numeric type widened to `f64`.
    pub fn get_number(&self) -> f64 {
        match self.ty() {
            Some(ElementType::Int32) => self.get_int32() as f64,
            Some(ElementType::Int64) => self.get_int64() as f64,
            _ => self.get_double(),
        }
    }

    /// Either integer width widened to `i64`.
    pub fn get_int(&self) -> i64 {
        if self.is(ElementType::Int32) {
            self.get_int32() as i64
        } else {
            self.get_int64()
        }
    }

    fn data_len(&self) -> usize {
        read_i32(self.buf, self.data_offset()).max(0) as usize
    }

    /// String bytes without the trailing `'\0'`.
    pub fn get_str_bytes(&self) -> &'a [u8] {
        let start = self.data_offset() + size::INT32;
        let len = self.data_len().saturating_sub(1);
        &self.buf[start..start + len]
    }

    /// Utf8 checked string.
    pub fn get_str(&self) -> Result<&'a str> {
        str::from_utf8(self.get_str_bytes()).map_err(|_| Error.into())
    }

    pub fn str_equals(&self, s: &str) -> bool {
        self.get_str_bytes() == s.as_bytes()
    }

    /// Copies the string into `out` as a cstring, see
    /// [`copy_name_to`](Element::copy_name_to).
    pub fn copy_str_to(&self, out: &mut [u8]) -> usize {
        copy_cstr(self.get_str_bytes(), out)
    }

    pub fn get_binary(&self) -> &'a [u8] {
        let start = self.data_offset() + size::INT32 + size::BYTE;
        &self.buf[start..start + self.data_len()]
    }

    pub fn binary_subtype(&self) -> u8 {
        self.buf[self.data_offset() + size::INT32]
    }

    /// Copies as much of the binary payload as fits in `out`, returns the
    /// number of bytes copied.
    pub fn copy_binary_to(&self, out: &mut [u8]) -> usize {
        let bin = self.get_binary();
        let n = bin.len().min(out.len());
        out[..n].copy_from_slice(&bin[..n]);
        n
    }

    pub fn get_doc(&self) -> Document<'a> {
        Document::at(self.buf, self.data_offset())
    }

    pub fn get_arr(&self) -> Array<'a> {
        Array::at(self.buf, self.data_offset())
    }

    /// Decoded payload, `None` for an unknown or unsupported tag.
    pub fn value(&self) -> Option<Value<'a>> {
        let v = match self.ty()? {
            ElementType::Double => Value::Double(self.get_double()),
            ElementType::String => Value::String(self.get_str_bytes()),
            ElementType::Document => Value::Document(self.get_doc()),
            ElementType::Array => Value::Array(self.get_arr()),
            ElementType::Binary => Value::Binary(self.get_binary()),
            ElementType::Boolean => Value::Boolean(self.get_bool()),
            ElementType::Null => Value::Null,
            ElementType::Int32 => Value::Int32(self.get_int32()),
            ElementType::Int64 => Value::Int64(self.get_int64()),
            ElementType::Decimal128 => return None,
        };
        Some(v)
    }

    pub fn try_double(&self) -> Option<f64> {
        self.checked(ElementType::Double, Self::get_double)
    }

    pub fn try_int32(&self) -> Option<i32> {
        self.checked(ElementType::Int32, Self::get_int32)
    }

    pub fn try_int64(&self) -> Option<i64> {
        self.checked(ElementType::Int64, Self::get_int64)
    }

    pub fn try_bool(&self) -> Option<bool> {
        self.checked(ElementType::Boolean, Self::get_bool)
    }

    pub fn try_str_bytes(&self) -> Option<&'a [u8]> {
        self.checked(ElementType::String, Self::get_str_bytes)
    }

    /// `None` when the element isn't a string or isn't utf8.
    pub fn try_str(&self) -> Option<&'a str> {
        self.try_str_bytes().and_then(|b| str::from_utf8(b).ok())
    }

    pub fn try_binary(&self) -> Option<&'a [u8]> {
        self.checked(ElementType::Binary, Self::get_binary)
    }

    pub fn try_doc(&self) -> Option<Document<'a>> {
        self.checked(ElementType::Document, Self::get_doc)
    }

    pub fn try_arr(&self) -> Option<Array<'a>> {
        self.checked(ElementType::Array, Self::get_arr)
    }

    pub fn try_number(&self) -> Option<f64> {
        if self.is_number() {
            Some(self.get_number())
        } else {
            None
        }
    }

    pub fn try_int(&self) -> Option<i64> {
        if self.is_int() {
            Some(self.get_int())
        } else {
            None
        }
    }

    #[inline]
    fn checked<T>(&self, ty: ElementType, get: fn(&Self) -> T) -> Option<T> {
        if self.is(ty) {
            Some(get(self))
        } else {
            None
        }
    }
}

impl<'a> fmt::Debug for Element<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Element")
            .field("name", &String::from_utf8_lossy(self.name()))
            .field("value", &self.value())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // { "hello": "world" }
    const STR_DOC: [u8; 22] = [
        0x16, 0x00, 0x00, 0x00, 0x02, 0x68, 0x65, 0x6C, 0x6C, 0x6F, 0x00, //
        0x06, 0x00, 0x00, 0x00, 0x77, 0x6F, 0x72, 0x6C, 0x64, 0x00, 0x00,
    ];

    // { "a": <binary 1, 2, 3, 2, 1> }
    const BIN_DOC: [u8; 18] = [
        0x12, 0x00, 0x00, 0x00, 0x05, 0x61, 0x00, 0x05, 0x00, //
        0x00, 0x00, 0x00, 0x01, 0x02, 0x03, 0x02, 0x01, 0x00,
    ];

    #[test]
    fn string_element() {
        let el = Element::at(&STR_DOC, 4);
        assert_eq!(el.ty(), Some(ElementType::String));
        assert_eq!(el.name(), b"hello");
        assert_eq!(el.name_size(), 6);
        assert_eq!(el.data_size(), 10);
        assert_eq!(el.size(), 17);
        assert!(el.name_equals("hello"));
        assert!(!el.name_equals("hell"));
        assert_eq!(el.get_str().unwrap(), "world");
        assert!(el.str_equals("world"));
        assert_eq!(el.try_str(), Some("world"));
        assert_eq!(el.try_double(), None);
        assert_eq!(el.try_binary(), None);
    }

    #[test]
    fn copy_truncates() {
        let el = Element::at(&STR_DOC, 4);

        let mut name = [0xFFu8; 6];
        assert_eq!(el.copy_name_to(&mut name), 6);
        assert_eq!(&name, b"hello\0");

        let mut name = [0xFFu8; 4];
        assert_eq!(el.copy_name_to(&mut name), 4);
        assert_eq!(&name, b"hel\0");

        let mut value = [0xFFu8; 8];
        assert_eq!(el.copy_str_to(&mut value), 6);
        assert_eq!(&value[..6], b"world\0");

        assert_eq!(el.copy_str_to(&mut []), 0);
    }

    #[test]
    fn binary_element() {
        let el = Element::at(&BIN_DOC, 4);
        assert_eq!(el.ty(), Some(ElementType::Binary));
        assert_eq!(el.get_binary(), &[1, 2, 3, 2, 1]);
        assert_eq!(el.binary_subtype(), 0x00);
        assert_eq!(el.data_size(), 10);

        let mut out = [0u8; 3];
        assert_eq!(el.copy_binary_to(&mut out), 3);
        assert_eq!(out, [1, 2, 3]);

        let mut out = [0u8; 8];
        assert_eq!(el.copy_binary_to(&mut out), 5);
        assert_eq!(&out[..5], &[1, 2, 3, 2, 1]);
    }

    #[test]
    fn numbers_widen() {
        // { "i": 21 (int32) }
        let buf = [
            0x0C, 0x00, 0x00, 0x00, 0x10, 0x69, 0x00, 0x15, 0x00, 0x00, 0x00, 0x00,
        ];
        let el = Element::at(&buf, 4);
        assert!(el.is_number());
        assert!(el.is_int());
        assert_eq!(el.get_int(), 21);
        assert_eq!(el.get_number(), 21.0);
        assert_eq!(el.try_int64(), None);
        assert_eq!(el.try_int(), Some(21));
        assert_eq!(el.value(), Some(Value::Int32(21)));
    }

    #[test]
    fn unknown_tag() {
        let buf = [0x08, 0x00, 0x00, 0x00, 0x7F, 0x61, 0x00, 0x00];
        let el = Element::at(&buf, 4);
        assert_eq!(el.ty(), None);
        assert_eq!(el.tag(), 0x7F);
        assert_eq!(el.value(), None);
        assert_eq!(el.checked_data_size(), None);
        assert_eq!(el.data_size(), 0);
    }
}
