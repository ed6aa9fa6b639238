//! Zero-copy BSON reader.
//!
//! Views borrow the caller's buffer and decode on demand, nothing is copied
//! or allocated.
//!
//! ```rust
//! use bsonpot::de::{Document, ValidationOptions};
//! use bsonpot::ElementType;
//!
//! // { "a": 0.2 }
//! let buf = [
//!     0x10, 0x00, 0x00, 0x00, 0x01, 0x61, 0x00, 0x9A,
//!     0x99, 0x99, 0x99, 0x99, 0x99, 0xC9, 0x3F, 0x00,
//! ];
//!
//! let doc = Document::new(&buf);
//! assert!(doc.valid(ValidationOptions::default()));
//!
//! for el in doc {
//!     assert_eq!(el.ty(), Some(ElementType::Double));
//!     assert!(el.name_equals("a"));
//!     assert_eq!(el.get_double(), 0.2);
//! }
//! ```

mod array;
pub use self::array::*;

pub(crate) mod document;
pub use self::document::{Document, Iter};

mod element;
pub use self::element::*;

mod validate;
pub use self::validate::ValidationOptions;

mod value;
pub use self::value::*;

use crate::error::{Error, Result};

/// Validates `b` with the default (strict) options and returns a view of
/// the document at its start.
///
/// ```rust
/// let b = bsonpot::export::hex::decode("100000000161009a9999999999c93f00").unwrap();
/// let doc = bsonpot::from_bin(&b).unwrap();
/// assert_eq!(doc.get("a").unwrap().get_double(), 0.2);
///
/// assert!(bsonpot::from_bin(&b[..15]).is_err());
/// ```
pub fn from_bin(b: &[u8]) -> Result<Document> {
    let doc = Document::new(b);
    if doc.valid(ValidationOptions::default()) {
        Ok(doc)
    } else {
        Err(Error.into())
    }
}
