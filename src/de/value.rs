use std::str;

use crate::consts::ElementType;
use crate::de::{Array, Document};

/// Decoded payload of an element, borrowing from the original buffer.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Value<'a> {
    Double(f64),
    /// String bytes without the trailing `'\0'`
    String(&'a [u8]),
    Document(Document<'a>),
    Array(Array<'a>),
    /// Generic binary payload
    Binary(&'a [u8]),
    Boolean(bool),
    Null,
    Int32(i32),
    Int64(i64),
}

impl<'a> Value<'a> {
    pub fn ty(&self) -> ElementType {
        match self {
            Value::Double(_) => ElementType::Double,
            Value::String(_) => ElementType::String,
            Value::Document(_) => ElementType::Document,
            Value::Array(_) => ElementType::Array,
            Value::Binary(_) => ElementType::Binary,
            Value::Boolean(_) => ElementType::Boolean,
            Value::Null => ElementType::Null,
            Value::Int32(_) => ElementType::Int32,
            Value::Int64(_) => ElementType::Int64,
        }
    }

    pub fn as_str(&self) -> Option<&'a str> {
        match *self {
            Value::String(s) => str::from_utf8(s).ok(),
            _ => None,
        }
    }
}

impl<'a> From<f64> for Value<'a> {
    fn from(n: f64) -> Self {
        Value::Double(n)
    }
}

impl<'a> From<&'a str> for Value<'a> {
    fn from(s: &'a str) -> Self {
        Value::String(s.as_bytes())
    }
}

impl<'a> From<bool> for Value<'a> {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl<'a> From<i32> for Value<'a> {
    fn from(n: i32) -> Self {
        Value::Int32(n)
    }
}

impl<'a> From<i64> for Value<'a> {
    fn from(n: i64) -> Self {
        Value::Int64(n)
    }
}

impl<'a> From<Document<'a>> for Value<'a> {
    fn from(doc: Document<'a>) -> Self {
        Value::Document(doc)
    }
}

impl<'a> From<Array<'a>> for Value<'a> {
    fn from(arr: Array<'a>) -> Self {
        Value::Array(arr)
    }
}
