//! Compact JSON rendering of read views.
//!
//! Meant for diagnostics, the output can't be parsed back into BSON.
//! Strings that aren't valid utf8 are rendered lossily, binary payloads
//! become `{"$binary":"<hex>","$type":"<subtype>"}` and doubles that
//! aren't finite become `null`.
//!
//! ```rust
//! let b = bsonpot::to_bin(|doc| {
//!     doc.append_str("hello", "world").append_array("n", |arr| {
//!         arr.append_int32(1).append_null();
//!     });
//! });
//! let doc = bsonpot::from_bin(&b).unwrap();
//! assert_eq!(doc.to_string(), r#"{"hello":"world","n":[1,null]}"#);
//! ```

use std::fmt::{self, Display, Write};

use crate::de::{Array, Document, Element, Value};

/// Renders `doc` as compact JSON.
pub fn to_string(doc: &Document) -> String {
    doc.to_string()
}

struct JsonSer<W> {
    out: W,
}

impl<W: Write> JsonSer<W> {
    #[inline]
    fn push(&mut self, c: char) -> fmt::Result {
        self.out.write_char(c)
    }

    #[inline]
    fn push_str(&mut self, s: &str) -> fmt::Result {
        self.out.write_str(s)
    }

    fn push_bytes_escaped(&mut self, value: &[u8]) -> fmt::Result {
        self.push_str_escaped(&String::from_utf8_lossy(value))
    }

    fn push_str_escaped(&mut self, value: &str) -> fmt::Result {
        self.push('"')?;

        let bytes = value.as_bytes();
        let mut start = 0;

        for (i, &byte) in bytes.iter().enumerate() {
            let escape = ESCAPE[byte as usize];
            if escape == 0 {
                continue;
            }

            if start < i {
                self.push_str(&value[start..i])?;
            }

            match escape {
                self::BB => self.push_str("\\b")?,
                self::TT => self.push_str("\\t")?,
                self::NN => self.push_str("\\n")?,
                self::FF => self.push_str("\\f")?,
                self::RR => self.push_str("\\r")?,
                self::QU => self.push_str("\\\"")?,
                self::BS => self.push_str("\\\\")?,
                self::U => {
                    static HEX_DIGITS: [u8; 16] = *b"0123456789abcdef";
                    self.push_str("\\u00")?;
                    self.push(HEX_DIGITS[(byte >> 4) as usize] as char)?;
                    self.push(HEX_DIGITS[(byte & 0xF) as usize] as char)?;
                }
                _ => unreachable!(),
            }

            start = i + 1;
        }

        if start != bytes.len() {
            self.push_str(&value[start..])?;
        }

        self.push('"')
    }

    fn double(&mut self, n: f64) -> fmt::Result {
        if n.is_finite() {
            self.push_str(ryu::Buffer::new().format_finite(n))
        } else {
            self.push_str("null")
        }
    }

    fn binary(&mut self, b: &[u8], subtype: u8) -> fmt::Result {
        self.push_str("{\"$binary\":\"")?;
        self.push_str(&bintext::hex::encode(b))?;
        self.push_str("\",\"$type\":\"")?;
        self.push_str(&bintext::hex::encode(&[subtype]))?;
        self.push_str("\"}")
    }

    fn element(&mut self, el: &Element) -> fmt::Result {
        match el.value() {
            Some(Value::Binary(b)) => self.binary(b, el.binary_subtype()),
            Some(value) => self.value(&value),
            None => self.push_str("null"),
        }
    }

    fn value(&mut self, value: &Value) -> fmt::Result {
        match *value {
            Value::Double(n) => self.double(n),
            Value::String(s) => self.push_bytes_escaped(s),
            Value::Document(ref doc) => self.document(doc),
            Value::Array(ref arr) => self.array(arr),
            Value::Binary(b) => self.binary(b, 0x00),
            Value::Boolean(b) => self.push_str(if b { "true" } else { "false" }),
            Value::Null => self.push_str("null"),
            Value::Int32(n) => self.push_str(itoa::Buffer::new().format(n)),
            Value::Int64(n) => self.push_str(itoa::Buffer::new().format(n)),
        }
    }

    fn document(&mut self, doc: &Document) -> fmt::Result {
        self.push('{')?;
        for (i, el) in doc.iter().enumerate() {
            if i > 0 {
                self.push(',')?;
            }
            self.push_bytes_escaped(el.name())?;
            self.push(':')?;
            self.element(&el)?;
        }
        self.push('}')
    }

    fn array(&mut self, arr: &Array) -> fmt::Result {
        self.push('[')?;
        for el in arr.iter() {
            if el.index() > 0 {
                self.push(',')?;
            }
            self.element(&el)?;
        }
        self.push(']')
    }
}

impl<'a> Display for Document<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        JsonSer { out: f }.document(self)
    }
}

impl<'a> Display for Array<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        JsonSer { out: f }.array(self)
    }
}

impl<'a> Display for Element<'a> {
    /// Renders the value only, not the name.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        JsonSer { out: f }.element(self)
    }
}

impl<'a> Display for Value<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        JsonSer { out: f }.value(self)
    }
}

const BB: u8 = b'b'; // \x08
const TT: u8 = b't'; // \x09
const NN: u8 = b'n'; // \x0A
const FF: u8 = b'f'; // \x0C
const RR: u8 = b'r'; // \x0D
const QU: u8 = b'"'; // \x22
const BS: u8 = b'\\'; // \x5C
const U: u8 = b'u'; // \x00...\x1F except the ones above

// Lookup table of escape sequences. A value of b'x' at index i means that byte
// i is escaped as "\x" in JSON. A value of 0 means that byte i is not escaped.
#[rustfmt::skip]
static ESCAPE: [u8; 256] = [
    //  1   2   3   4   5   6   7   8   9   A   B   C   D   E   F
    U,  U,  U,  U,  U,  U,  U,  U, BB, TT, NN,  U, FF, RR,  U,  U, // 0
    U,  U,  U,  U,  U,  U,  U,  U,  U,  U,  U,  U,  U,  U,  U,  U, // 1
    0,  0, QU,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0, // 2
    0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0, // 3
    0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0, // 4
    0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0, BS,  0,  0,  0, // 5
    0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0, // 6
    0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0, // 7
    0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0, // 8
    0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0, // 9
    0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0, // A
    0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0, // B
    0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0, // C
    0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0, // D
    0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0, // E
    0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0, // F
];
