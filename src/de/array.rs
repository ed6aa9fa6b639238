use std::fmt;
use std::iter::FusedIterator;
use std::ops::Deref;

use crate::consts::ElementType;
use crate::de::validate::{self, ValidationOptions};
use crate::de::{document, Document, Element};

/// Zero-copy view of an encoded array, a document whose element names are
/// the positional indices `"0"`, `"1"`, ...
///
/// Iteration hands out [`ArrayElement`]s carrying their traversal position,
/// the names on the wire are not parsed for it.
#[derive(Copy, Clone, PartialEq)]
pub struct Array<'a> {
    doc: Document<'a>,
}

/// An [`Element`] plus its position in the array.
#[derive(Copy, Clone, Debug)]
pub struct ArrayElement<'a> {
    element: Element<'a>,
    index: usize,
}

impl<'a> ArrayElement<'a> {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn element(&self) -> Element<'a> {
        self.element
    }
}

impl<'a> Deref for ArrayElement<'a> {
    type Target = Element<'a>;

    fn deref(&self) -> &Self::Target {
        &self.element
    }
}

impl<'a> Array<'a> {
    /// View of the array at the start of `buf`.
    pub fn new(buf: &'a [u8]) -> Self {
        Array {
            doc: Document::new(buf),
        }
    }

    pub(crate) fn at(buf: &'a [u8], offset: usize) -> Self {
        Array {
            doc: Document::at(buf, offset),
        }
    }

    /// The same bytes seen as a plain document.
    pub fn as_document(&self) -> Document<'a> {
        self.doc
    }

    /// Declared length in bytes, see [`Document::len`].
    pub fn len(&self) -> usize {
        self.doc.len()
    }

    pub fn is_empty(&self) -> bool {
        self.doc.is_empty()
    }

    pub fn as_bytes(&self) -> &'a [u8] {
        self.doc.as_bytes()
    }

    pub fn iter(&self) -> ArrayIter<'a> {
        ArrayIter {
            inner: self.doc.iter(),
            index: 0,
        }
    }

    pub fn get(&self, name: &str) -> Option<ArrayElement<'a>> {
        self.iter().find(|el| el.name_equals(name))
    }

    pub fn get_index(&self, index: usize) -> Option<ArrayElement<'a>> {
        self.iter().nth(index)
    }

    /// Checks the array against the wire format grammar, its own element
    /// names included.
    pub fn valid(&self, options: ValidationOptions) -> bool {
        validate::document(self.doc.buf(), self.doc.offset(), true, options)
    }

    /// Any double within `f64::EPSILON` of `value`.
    pub fn contains_double(&self, value: f64) -> bool {
        self.contains_double_eps(value, f64::EPSILON)
    }

    pub fn contains_double_eps(&self, value: f64, epsilon: f64) -> bool {
        self.iter()
            .any(|el| el.is(ElementType::Double) && (el.get_double() - value).abs() < epsilon)
    }

    pub fn contains_str(&self, s: &str) -> bool {
        self.iter()
            .any(|el| el.is(ElementType::String) && el.str_equals(s))
    }

    pub fn contains_bool(&self, value: bool) -> bool {
        self.iter()
            .any(|el| el.is(ElementType::Boolean) && el.get_bool() == value)
    }

    pub fn contains_null(&self) -> bool {
        self.iter().any(|el| el.is_null())
    }

    pub fn contains_int32(&self, value: i32) -> bool {
        self.iter()
            .any(|el| el.is(ElementType::Int32) && el.get_int32() == value)
    }

    pub fn contains_int64(&self, value: i64) -> bool {
        self.iter()
            .any(|el| el.is(ElementType::Int64) && el.get_int64() == value)
    }

    /// Int32 or Int64 equal to `value`.
    pub fn contains_int(&self, value: i64) -> bool {
        self.iter().any(|el| el.try_int() == Some(value))
    }

    /// Any number equal to `value`, doubles compared within `f64::EPSILON`.
    pub fn contains_number(&self, value: f64) -> bool {
        self.contains_number_eps(value, f64::EPSILON)
    }

    pub fn contains_number_eps(&self, value: f64, epsilon: f64) -> bool {
        self.iter().any(|el| match el.ty() {
            Some(ElementType::Int32) => el.get_int32() as f64 == value,
            Some(ElementType::Int64) => el.get_int64() as f64 == value,
            Some(ElementType::Double) => (el.get_double() - value).abs() < epsilon,
            _ => false,
        })
    }
}

impl<'a> fmt::Debug for Array<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list()
            .entries(self.iter().map(|el| el.value()))
            .finish()
    }
}

impl<'a> IntoIterator for Array<'a> {
    type Item = ArrayElement<'a>;
    type IntoIter = ArrayIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, 'b> IntoIterator for &'b Array<'a> {
    type Item = ArrayElement<'a>;
    type IntoIter = ArrayIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the elements of an [`Array`], counting positions from 0.
#[derive(Clone)]
pub struct ArrayIter<'a> {
    inner: document::Iter<'a>,
    index: usize,
}

impl<'a> Iterator for ArrayIter<'a> {
    type Item = ArrayElement<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let element = self.inner.next()?;
        let index = self.index;
        self.index += 1;
        Some(ArrayElement { element, index })
    }
}

impl<'a> FusedIterator for ArrayIter<'a> {}
