//! Zero-copy BSON reader and append-only BSON writer over caller owned
//! buffers.
//!
//! Nothing here allocates: documents are read in place through `Copy`
//! views and written in place through builders that never write past the
//! end of the slice they were given.
//!
//! # Reading
//!
//! ```rust
//! use bsonpot::ElementType;
//! use bsonpot::export::hex;
//!
//! fn main() -> bsonpot::Result<()> {
//!     let b = hex::decode(
//!         "2c0000000268656c6c6f0006000000776f726c640003\
//!          6e6573746564000e0000001076616c00542600000000",
//!     )
//!     .unwrap();
//!
//!     let doc = bsonpot::from_bin(&b)?;
//!     for el in doc {
//!         match el.ty() {
//!             Some(ElementType::String) => println!("{}", el.get_str()?),
//!             Some(ElementType::Document) => {
//!                 assert_eq!(el.get_doc().get("val").unwrap().get_int32(), 9812);
//!             }
//!             _ => unreachable!(),
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Writing
//!
//! ```rust
//! use bsonpot::{DocumentBuilder, Status};
//!
//! let mut buf = [0u8; 64];
//! let res = DocumentBuilder::build(&mut buf, |doc| {
//!     doc.append_str("hello", "world");
//!     let mut nested = doc.open_document("nested");
//!     nested.append_int32("val", 9812);
//! });
//!
//! assert_eq!(res.status, Status::Ok);
//! assert_eq!(res.len, 44);
//! ```

#![doc(html_root_url = "https://docs.rs/bsonpot/0.1.0")]
#![allow(clippy::len_without_is_empty, clippy::float_cmp)]

// Not public API.
#[doc(hidden)]
pub mod export;

mod error;
pub mod buffer;
pub mod consts;
pub mod endian;

pub mod de;
pub mod json;
pub mod ser;

pub use crate::buffer::Cursor;
pub use crate::consts::ElementType;
#[doc(inline)]
pub use crate::de::{from_bin, Array, Document, Element, ValidationOptions, Value};
pub use crate::error::{Error, Result};
#[doc(inline)]
pub use crate::ser::{to_bin, ArrayBuilder, BuildResult, DocumentBuilder, Status};
