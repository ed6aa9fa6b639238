use crate::buffer::Cursor;
use crate::consts::index_key;
use crate::de::Value;
use crate::ser::{BuildResult, DocumentBuilder};

/// Append-only writer of one array.
///
/// Keys are generated from a counter starting at `"0"`, every append uses
/// the next one. The counter is the only source of keys.
pub struct ArrayBuilder<'c, 'buf> {
    doc: DocumentBuilder<'c, 'buf>,
    index: u32,
}

macro_rules! forward {
    ($($(#[$attr:meta])* $name:ident($($arg:ident: $t:ty),*);)*) => {
        $(
            $(#[$attr])*
            pub fn $name(&mut self $(, $arg: $t)*) -> &mut Self {
                let mut key = itoa::Buffer::new();
                let key = self.next_key(&mut key);
                self.doc.$name(key $(, $arg)*);
                self
            }
        )*
    };
}

impl<'c, 'buf> ArrayBuilder<'c, 'buf> {
    /// Builds a root level array at the start of `buf`.
    pub fn build<F>(buf: &mut [u8], producer: F) -> BuildResult
    where
        F: FnOnce(&mut ArrayBuilder),
    {
        let mut cursor = Cursor::new(buf);
        let mut arr = ArrayBuilder::new(&mut cursor);
        producer(&mut arr);
        arr.end()
    }

    /// Starts an array at the current position of `cursor`.
    pub fn new(cursor: &'c mut Cursor<'buf>) -> Self {
        ArrayBuilder::from_document(DocumentBuilder::new(cursor))
    }

    pub(crate) fn from_document(doc: DocumentBuilder<'c, 'buf>) -> Self {
        ArrayBuilder { doc, index: 0 }
    }

    fn next_key<'k>(&mut self, key: &'k mut itoa::Buffer) -> &'k str {
        let k = index_key(self.index, key);
        self.index += 1;
        k
    }

    /// Number of elements appended so far.
    pub fn count(&self) -> u32 {
        self.index
    }

    forward! {
        append_double(value: f64);
        append_str(value: &str);
        /// Appends a string from raw bytes, they aren't checked to be utf8.
        append_str_bytes(value: &[u8]);
        append_binary(value: &[u8]);
        append_bool(value: bool);
        append_null();
        append_int32(value: i32);
        append_int64(value: i64);
        /// See [`DocumentBuilder::append_value`].
        append_value(value: Value);
    }

    /// Appends a nested document filled in by `producer`.
    pub fn append_document<F>(&mut self, producer: F) -> &mut Self
    where
        F: FnOnce(&mut DocumentBuilder),
    {
        let mut key = itoa::Buffer::new();
        let key = self.next_key(&mut key);
        self.doc.append_document(key, producer);
        self
    }

    /// Appends a nested array filled in by `producer`.
    pub fn append_array<F>(&mut self, producer: F) -> &mut Self
    where
        F: FnOnce(&mut ArrayBuilder),
    {
        let mut key = itoa::Buffer::new();
        let key = self.next_key(&mut key);
        self.doc.append_array(key, producer);
        self
    }

    /// Opens a nested document, writable until it is ended or dropped.
    pub fn open_document(&mut self) -> DocumentBuilder<'_, 'buf> {
        let mut key = itoa::Buffer::new();
        let key = self.next_key(&mut key);
        self.doc.open_document(key)
    }

    /// Opens a nested array, writable until it is ended or dropped.
    pub fn open_array(&mut self) -> ArrayBuilder<'_, 'buf> {
        let mut key = itoa::Buffer::new();
        let key = self.next_key(&mut key);
        self.doc.open_array(key)
    }

    /// See [`DocumentBuilder::end`].
    pub fn end(&mut self) -> BuildResult {
        self.doc.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ser::Status;

    #[test]
    fn keys_count_up() {
        let mut buf = [0u8; 64];
        let res = ArrayBuilder::build(&mut buf, |arr| {
            arr.append_bool(true).append_null().append_int32(21);
            assert_eq!(arr.count(), 3);
        });
        assert_eq!(res.status, Status::Ok);
        assert_eq!(
            &buf[..res.len],
            &[
                0x13, 0x00, 0x00, 0x00, //
                0x08, 0x30, 0x00, 0x01, //
                0x0A, 0x31, 0x00, //
                0x10, 0x32, 0x00, 0x15, 0x00, 0x00, 0x00, //
                0x00,
            ][..]
        );
    }

    #[test]
    fn nested_arrays() {
        let mut buf = [0u8; 64];
        let res = ArrayBuilder::build(&mut buf, |arr| {
            arr.append_array(|inner| {
                inner.append_null();
            });
            let mut open = arr.open_array();
            open.append_null();
        });
        // [[null], [null]]
        assert_eq!(
            &buf[..res.len],
            &[
                0x1B, 0x00, 0x00, 0x00, //
                0x04, 0x30, 0x00, 0x08, 0x00, 0x00, 0x00, 0x0A, 0x30, 0x00, 0x00, //
                0x04, 0x31, 0x00, 0x08, 0x00, 0x00, 0x00, 0x0A, 0x30, 0x00, 0x00, //
                0x00,
            ][..]
        );
    }
}
