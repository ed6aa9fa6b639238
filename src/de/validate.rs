//! Structural validation of untrusted input.
//!
//! The validator walks the same grammar the iterators do, but checks every
//! read against the end of the buffer before making it. Iterators never call
//! it, validating is the caller's decision.

use tracing::trace;

use crate::consts::{size, BinarySubtype, BooleanValue, ElementType, INT_KEY_SIZE, TERMINATOR};
use crate::endian::read_i32;

/// How strict validation is.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ValidationOptions {
    /// Every declared document length must equal the bytes actually
    /// consumed, from the length prefix through the terminator.
    pub require_exact_length: bool,
    /// Array element names must be their positional index.
    pub require_array_index_names: bool,
}

impl ValidationOptions {
    /// Every check enabled.
    pub const STRICT: Self = ValidationOptions {
        require_exact_length: true,
        require_array_index_names: true,
    };

    /// Only the grammar and the buffer bounds are checked.
    pub const fn lenient() -> Self {
        ValidationOptions {
            require_exact_length: false,
            require_array_index_names: false,
        }
    }
}

impl Default for ValidationOptions {
    fn default() -> Self {
        ValidationOptions::STRICT
    }
}

/// Validates the document whose length prefix is at `offset`.
pub(crate) fn document(
    buf: &[u8],
    offset: usize,
    array: bool,
    options: ValidationOptions,
) -> bool {
    let mut current = offset;
    Validator { buf, options }.walk(&mut current, array)
}

struct Validator<'a> {
    buf: &'a [u8],
    options: ValidationOptions,
}

/// A document whose terminator hasn't been reached yet.
struct Frame {
    /// Offset of the length prefix
    start: usize,
    declared: i32,
    array: bool,
    /// Position of the next element
    index: usize,
}

impl<'a> Validator<'a> {
    /// `true` when `len` bytes can be read at `current`.
    #[inline]
    fn fits(&self, current: usize, len: usize) -> bool {
        current
            .checked_add(len)
            .map_or(false, |end| end <= self.buf.len())
    }

    /// Reads the length prefix of a document starting at `current`.
    fn open(&self, current: &mut usize, array: bool) -> Option<Frame> {
        let start = *current;

        if !self.fits(*current, size::INT32) {
            trace!(offset = *current, "truncated document length");
            return None;
        }
        let declared = read_i32(self.buf, *current);
        *current += size::INT32;

        if declared < size::EMPTY_DOCUMENT as i32 {
            trace!(offset = start, declared, "document length too small");
            return None;
        }

        Some(Frame {
            start,
            declared,
            array,
            index: 0,
        })
    }

    /// Checks a document whose terminator was just consumed.
    fn close(&self, frame: &Frame, current: usize) -> bool {
        let consumed = current - frame.start;
        if self.options.require_exact_length && consumed != frame.declared as usize {
            trace!(
                offset = frame.start,
                declared = frame.declared,
                consumed,
                "document length mismatch"
            );
            return false;
        }
        true
    }

    /// Walks the document at `current` and everything nested in it. Open
    /// documents are kept on a heap allocated stack, so the nesting depth is
    /// only bounded by the input.
    fn walk(&self, current: &mut usize, array: bool) -> bool {
        let mut frame = match self.open(current, array) {
            Some(frame) => frame,
            None => return false,
        };
        let mut parents: Vec<Frame> = Vec::new();
        let mut key = itoa::Buffer::new();

        loop {
            if !self.fits(*current, size::BYTE) {
                trace!(offset = *current, "missing terminator");
                return false;
            }
            let tag = self.buf[*current];
            let element = *current;
            *current += size::BYTE;

            if tag == TERMINATOR {
                if !self.close(&frame, *current) {
                    return false;
                }
                match parents.pop() {
                    Some(parent) => {
                        frame = parent;
                        continue;
                    }
                    None => return true,
                }
            }

            // The name has to be terminated within the buffer
            let name_start = *current;
            let name_len = match self.buf[name_start..].iter().position(|b| *b == 0) {
                Some(len) => len,
                None => {
                    trace!(offset = name_start, "unterminated element name");
                    return false;
                }
            };
            *current += name_len + 1;

            if frame.array && self.options.require_array_index_names {
                let index = frame.index;
                let name = &self.buf[name_start..name_start + name_len];
                if name_len >= INT_KEY_SIZE || name != key.format(index).as_bytes() {
                    trace!(offset = element, index, "array name is not its index");
                    return false;
                }
            }
            frame.index += 1;

            let ty = match ElementType::from_u8(tag) {
                Some(ty) => ty,
                None => {
                    trace!(offset = element, tag, "unknown element type");
                    return false;
                }
            };

            if ty.is_document() {
                match self.open(current, ty == ElementType::Array) {
                    Some(child) => parents.push(std::mem::replace(&mut frame, child)),
                    None => {
                        trace!(offset = element, ?ty, "invalid nested document");
                        return false;
                    }
                }
            } else if !self.payload(current, ty) {
                trace!(offset = element, ?ty, "invalid payload");
                return false;
            }
        }
    }

    fn payload(&self, current: &mut usize, ty: ElementType) -> bool {
        match ty {
            ElementType::Double | ElementType::Int32 | ElementType::Int64 => {
                let len = ty.fixed_size().unwrap_or(0);
                if !self.fits(*current, len) {
                    return false;
                }
                *current += len;
            }
            ElementType::String => {
                if !self.fits(*current, size::INT32) {
                    return false;
                }
                let len = read_i32(self.buf, *current);
                *current += size::INT32;

                // The length counts the trailing '\0', so it's at least 1
                if len < 1 || !self.fits(*current, len as usize) {
                    return false;
                }
                let len = len as usize;
                if self.buf[*current + len - 1] != 0x00 {
                    return false;
                }
                *current += len;
            }
            // Opened by the walk, never a leaf payload
            ElementType::Document | ElementType::Array => return false,
            ElementType::Binary => {
                if !self.fits(*current, size::INT32) {
                    return false;
                }
                let len = read_i32(self.buf, *current);
                *current += size::INT32;

                if !self.fits(*current, size::BYTE) {
                    return false;
                }
                if self.buf[*current] != BinarySubtype::Generic as u8 {
                    return false;
                }
                *current += size::BYTE;

                if len < 0 || !self.fits(*current, len as usize) {
                    return false;
                }
                *current += len as usize;
            }
            ElementType::Boolean => {
                if !self.fits(*current, size::BYTE) {
                    return false;
                }
                let b = self.buf[*current];
                if b != BooleanValue::True as u8 && b != BooleanValue::False as u8 {
                    return false;
                }
                *current += size::BYTE;
            }
            ElementType::Null => {}
            // Declared by the format but not supported
            ElementType::Decimal128 => return false,
        }
        true
    }
}
