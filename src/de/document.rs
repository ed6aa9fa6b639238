use std::fmt;
use std::iter::FusedIterator;

use crate::consts::size;
use crate::de::validate::{self, ValidationOptions};
use crate::de::Element;
use crate::endian::checked_read_i32;
use crate::error::{Error, Result};

/// Zero-copy view of an encoded document.
///
/// Nothing is checked on construction. Iterating an unchecked buffer never
/// reads out of bounds, but the elements it yields may carry nonsense; run
/// [`valid`](Document::valid) on untrusted input first.
#[derive(Copy, Clone)]
pub struct Document<'a> {
    buf: &'a [u8],
    /// Offset of the document length prefix
    offset: usize,
}

impl<'a> Document<'a> {
    /// View of the document at the start of `buf`.
    pub fn new(buf: &'a [u8]) -> Self {
        Document { buf, offset: 0 }
    }

    pub(crate) fn at(buf: &'a [u8], offset: usize) -> Self {
        Document { buf, offset }
    }

    /// Declared length, from the length prefix through the terminator.
    pub fn len(&self) -> usize {
        checked_read_i32(self.buf, self.offset)
            .map(|len| len.max(0) as usize)
            .unwrap_or(0)
    }

    /// `true` when the document has no elements.
    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    pub(crate) fn buf(&self) -> &'a [u8] {
        self.buf
    }

    /// Offset of the length prefix within the buffer.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Offset of the first element.
    pub fn begin_offset(&self) -> usize {
        self.offset + size::INT32
    }

    /// Offset of the terminator byte, where iteration ends.
    pub fn end_offset(&self) -> usize {
        (self.offset + self.len()).saturating_sub(1)
    }

    /// Encoded bytes of this document, clamped to the buffer.
    pub fn as_bytes(&self) -> &'a [u8] {
        let start = self.offset.min(self.buf.len());
        let end = (self.offset + self.len()).min(self.buf.len());
        &self.buf[start..end]
    }

    pub fn iter(&self) -> Iter<'a> {
        Iter {
            buf: self.buf,
            current: self.begin_offset(),
            end: self.end_offset().min(self.buf.len()),
        }
    }

    /// First element named `name`, linear scan.
    pub fn get(&self, name: &str) -> Option<Element<'a>> {
        self.iter().find(|el| el.name_equals(name))
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Checks this document against the wire format grammar.
    pub fn valid(&self, options: ValidationOptions) -> bool {
        validate::document(self.buf, self.offset, false, options)
    }

    pub fn validate(&self, options: ValidationOptions) -> Result<()> {
        if self.valid(options) {
            Ok(())
        } else {
            Err(Error.into())
        }
    }
}

impl<'a> PartialEq for Document<'a> {
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl<'a> fmt::Debug for Document<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_map()
            .entries(
                self.iter()
                    .map(|el| (String::from_utf8_lossy(el.name()), el.value())),
            )
            .finish()
    }
}

impl<'a> IntoIterator for Document<'a> {
    type Item = Element<'a>;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, 'b> IntoIterator for &'b Document<'a> {
    type Item = Element<'a>;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Forward only iterator over the elements of a [`Document`].
///
/// Each step moves past the type byte, the name and the payload of the
/// current element. Iteration ends on the terminator offset, on the end of
/// the buffer, or on a tag of unknown width.
#[derive(Clone)]
pub struct Iter<'a> {
    buf: &'a [u8],
    current: usize,
    end: usize,
}

impl<'a> Iter<'a> {
    /// Offset of the next element to yield.
    pub fn offset(&self) -> usize {
        self.current
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = Element<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current >= self.end {
            return None;
        }

        let el = Element::at(self.buf, self.current);
        match el.checked_data_size() {
            Some(data) => {
                self.current = self
                    .current
                    .saturating_add(size::BYTE + el.name_size())
                    .saturating_add(data);
                Some(el)
            }
            None => {
                self.current = self.end;
                None
            }
        }
    }
}

impl<'a> FusedIterator for Iter<'a> {}
