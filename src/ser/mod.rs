//! Append-only BSON writer.
//!
//! Builders write straight into a caller owned buffer, the length prefix of
//! each document is back-patched once its last element is in place.
//!
//! ## Writing a document
//!
//! ```rust
//! use bsonpot::ser::{DocumentBuilder, Status};
//!
//! let mut buf = [0u8; 64];
//! let res = DocumentBuilder::build(&mut buf, |doc| {
//!     doc.append_str("hello", "world")
//!         .append_document("nested", |nested| {
//!             nested.append_int32("val", 9812);
//!         })
//!         .append_array("arr", |arr| {
//!             arr.append_bool(true).append_null();
//!         });
//! });
//!
//! assert_eq!(res.status, Status::Ok);
//! let doc = bsonpot::from_bin(&buf[..res.len]).unwrap();
//! assert_eq!(doc.get("hello").unwrap().get_str().unwrap(), "world");
//! ```
//!
//! ## Running out of space
//!
//! Nothing is written past the end of the buffer, the build reports the
//! length it needed instead:
//!
//! ```rust
//! use bsonpot::ser::{DocumentBuilder, Status};
//!
//! let mut small = [0u8; 4];
//! let res = DocumentBuilder::build(&mut small, |doc| {
//!     doc.append_int64("n", 98761234);
//! });
//! assert_eq!(res.status, Status::BufferOverflow);
//!
//! let mut buf = vec![0u8; res.len];
//! let res = DocumentBuilder::build(&mut buf, |doc| {
//!     doc.append_int64("n", 98761234);
//! });
//! assert!(res.is_ok());
//! ```

mod array;
pub use self::array::ArrayBuilder;

mod document;
pub use self::document::DocumentBuilder;

pub use crate::buffer::Cursor;

use crate::error::{Error, Result};

/// Whether a build fit its buffer.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Status {
    Ok,
    /// Some bytes didn't fit and were dropped, the output is unusable.
    BufferOverflow,
}

/// Outcome of ending a document or array.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BuildResult {
    pub status: Status,
    /// Length of the encoded document, even when it didn't fit.
    pub len: usize,
}

impl BuildResult {
    pub fn is_ok(&self) -> bool {
        self.status == Status::Ok
    }

    /// The encoded length, or an error on overflow.
    pub fn into_result(self) -> Result<usize> {
        match self.status {
            Status::Ok => Ok(self.len),
            Status::BufferOverflow => Err(Error.into()),
        }
    }
}

/// Builds a document into a `Vec` of exactly its length.
///
/// `producer` runs twice, once to measure and once to write, so it must
/// append the same elements both times.
///
/// ```rust
/// use bsonpot::export::hex;
///
/// let b = bsonpot::to_bin(|doc| {
///     doc.append_double("a", 0.2);
/// });
/// assert_eq!(b, hex::decode("100000000161009a9999999999c93f00").unwrap());
/// ```
pub fn to_bin<F>(producer: F) -> Vec<u8>
where
    F: Fn(&mut DocumentBuilder),
{
    let mut len = DocumentBuilder::build(&mut [], &producer).len;
    loop {
        let mut out = vec![0u8; len];
        let res = DocumentBuilder::build(&mut out, &producer);
        if res.is_ok() {
            out.truncate(res.len);
            return out;
        }
        len = res.len;
    }
}
