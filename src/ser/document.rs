use tracing::debug;

use crate::buffer::Cursor;
use crate::consts::{BinarySubtype, BooleanValue, ElementType, TERMINATOR};
use crate::de::{Element, Value};
use crate::ser::{ArrayBuilder, BuildResult, Status};

/// Append-only writer of one document.
///
/// A builder writes through a [`Cursor`] shared with every other builder of
/// the same tree. Opening a nested document or array borrows the cursor
/// from the parent until the child is done, so the parent can't write or end
/// while a child is open:
///
/// ```compile_fail
/// use bsonpot::ser::DocumentBuilder;
///
/// let mut buf = [0u8; 64];
/// DocumentBuilder::build(&mut buf, |doc| {
///     let mut child = doc.open_document("a");
///     doc.append_null("b"); // parent still borrowed by `child`
///     child.append_null("c");
/// });
/// ```
///
/// A builder is finalized by [`end`](DocumentBuilder::end), or when it goes
/// out of scope.
pub struct DocumentBuilder<'c, 'buf> {
    cursor: &'c mut Cursor<'buf>,
    /// Offset of this document's length prefix
    start: usize,
    result: Option<BuildResult>,
}

impl<'c, 'buf> DocumentBuilder<'c, 'buf> {
    /// Builds a root document at the start of `buf`.
    ///
    /// ```rust
    /// use bsonpot::ser::{DocumentBuilder, Status};
    ///
    /// let mut buf = [0u8; 16];
    /// let res = DocumentBuilder::build(&mut buf, |doc| {
    ///     doc.append_double("a", 0.2);
    /// });
    ///
    /// assert_eq!(res.status, Status::Ok);
    /// assert_eq!(res.len, 16);
    /// ```
    pub fn build<F>(buf: &mut [u8], producer: F) -> BuildResult
    where
        F: FnOnce(&mut DocumentBuilder),
    {
        let capacity = buf.len();
        let mut cursor = Cursor::new(buf);
        let mut doc = DocumentBuilder::new(&mut cursor);
        producer(&mut doc);
        let res = doc.end();
        if res.status == Status::BufferOverflow {
            debug!(len = res.len, capacity, "document overflowed");
        }
        res
    }

    /// Starts a document at the current position of `cursor`.
    pub fn new(cursor: &'c mut Cursor<'buf>) -> Self {
        let start = cursor.position();
        cursor.write_i32(0);
        DocumentBuilder {
            cursor,
            start,
            result: None,
        }
    }

    /// Writes the element header and starts a nested document after it.
    fn child(&mut self, ty: ElementType, key: &str) -> DocumentBuilder<'_, 'buf> {
        self.header(ty, key);
        DocumentBuilder::new(self.cursor)
    }

    #[inline]
    fn header(&mut self, ty: ElementType, key: &str) {
        debug_assert!(self.result.is_none(), "append to an ended document");
        self.cursor.write_u8(ty as u8);
        self.cursor.write_cstr(key);
    }

    pub fn append_double(&mut self, key: &str, value: f64) -> &mut Self {
        self.header(ElementType::Double, key);
        self.cursor.write_f64(value);
        self
    }

    pub fn append_str(&mut self, key: &str, value: &str) -> &mut Self {
        self.append_str_bytes(key, value.as_bytes())
    }

    /// Appends a string from raw bytes, they aren't checked to be utf8.
    pub fn append_str_bytes(&mut self, key: &str, value: &[u8]) -> &mut Self {
        self.header(ElementType::String, key);
        self.cursor.write_i32((value.len() + 1) as i32);
        self.cursor.extend_from_slice(value);
        self.cursor.write_u8(0x00);
        self
    }

    pub fn append_binary(&mut self, key: &str, value: &[u8]) -> &mut Self {
        self.header(ElementType::Binary, key);
        self.cursor.write_i32(value.len() as i32);
        self.cursor.write_u8(BinarySubtype::Generic as u8);
        self.cursor.extend_from_slice(value);
        self
    }

    pub fn append_bool(&mut self, key: &str, value: bool) -> &mut Self {
        self.header(ElementType::Boolean, key);
        self.cursor.write_u8(BooleanValue::from(value) as u8);
        self
    }

    pub fn append_null(&mut self, key: &str) -> &mut Self {
        self.header(ElementType::Null, key);
        self
    }

    pub fn append_int32(&mut self, key: &str, value: i32) -> &mut Self {
        self.header(ElementType::Int32, key);
        self.cursor.write_i32(value);
        self
    }

    pub fn append_int64(&mut self, key: &str, value: i64) -> &mut Self {
        self.header(ElementType::Int64, key);
        self.cursor.write_i64(value);
        self
    }

    /// Appends a nested document filled in by `producer`.
    pub fn append_document<F>(&mut self, key: &str, producer: F) -> &mut Self
    where
        F: FnOnce(&mut DocumentBuilder),
    {
        let mut child = self.open_document(key);
        producer(&mut child);
        child.end();
        drop(child);
        self
    }

    /// Appends a nested array filled in by `producer`.
    pub fn append_array<F>(&mut self, key: &str, producer: F) -> &mut Self
    where
        F: FnOnce(&mut ArrayBuilder),
    {
        let mut child = self.open_array(key);
        producer(&mut child);
        child.end();
        drop(child);
        self
    }

    /// Opens a nested document, writable until it is ended or dropped.
    pub fn open_document(&mut self, key: &str) -> DocumentBuilder<'_, 'buf> {
        self.child(ElementType::Document, key)
    }

    /// Opens a nested array, writable until it is ended or dropped.
    pub fn open_array(&mut self, key: &str) -> ArrayBuilder<'_, 'buf> {
        ArrayBuilder::from_document(self.child(ElementType::Array, key))
    }

    /// Appends any decoded value. Nested documents and arrays are copied
    /// byte for byte.
    pub fn append_value(&mut self, key: &str, value: Value) -> &mut Self {
        match value {
            Value::Double(n) => self.append_double(key, n),
            Value::String(s) => self.append_str_bytes(key, s),
            Value::Document(doc) => {
                self.header(ElementType::Document, key);
                self.cursor.extend_from_slice(doc.as_bytes());
                self
            }
            Value::Array(arr) => {
                self.header(ElementType::Array, key);
                self.cursor.extend_from_slice(arr.as_bytes());
                self
            }
            Value::Binary(b) => self.append_binary(key, b),
            Value::Boolean(b) => self.append_bool(key, b),
            Value::Null => self.append_null(key),
            Value::Int32(n) => self.append_int32(key, n),
            Value::Int64(n) => self.append_int64(key, n),
        }
    }

    /// Copies an element read from another document, keeping its name.
    /// Elements of unknown or unsupported type are skipped.
    pub fn append_element(&mut self, el: &Element) -> &mut Self {
        if let (Some(name), Some(value)) = (el.name_str(), el.value()) {
            self.append_value(name, value);
        }
        self
    }

    /// Offset of this document's length prefix.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Writes the terminator and back-patches the length prefix.
    ///
    /// Calling it again returns the first result and writes nothing.
    pub fn end(&mut self) -> BuildResult {
        if let Some(res) = self.result {
            return res;
        }

        self.cursor.write_u8(TERMINATOR);
        let len = self.cursor.position() - self.start;

        let current = self.cursor.position();
        self.cursor.seek(self.start);
        self.cursor.write_i32(len as i32);
        self.cursor.seek(current);

        let status = if self.cursor.overflowed() {
            Status::BufferOverflow
        } else {
            Status::Ok
        };
        let res = BuildResult { status, len };
        self.result = Some(res);
        res
    }
}

impl<'c, 'buf> Drop for DocumentBuilder<'c, 'buf> {
    fn drop(&mut self) {
        self.end();
    }
}
