use bsonpot::{Document, DocumentBuilder, ElementType, Status, ValidationOptions};

#[rustfmt::skip]
const ARR: [u8; 98] = [
    0x62, 0x00, 0x00, 0x00,
    0x04, b'a', b'r', b'r', 0x00,
    0x58, 0x00, 0x00, 0x00,
    // 0.2
    0x01, b'0', 0x00, 0x9A, 0x99, 0x99, 0x99, 0x99, 0x99, 0xC9, 0x3F,
    // "element"
    0x02, b'1', 0x00, 0x08, 0x00, 0x00, 0x00,
    b'e', b'l', b'e', b'm', b'e', b'n', b't', 0x00,
    // { "a": "b" }
    0x03, b'2', 0x00, 0x0E, 0x00, 0x00, 0x00,
    0x02, b'a', 0x00, 0x02, 0x00, 0x00, 0x00, b'b', 0x00, 0x00,
    // <binary 1, 2, 3>
    0x05, b'3', 0x00, 0x03, 0x00, 0x00, 0x00, 0x00, 0x01, 0x02, 0x03,
    // true, false, null
    0x08, b'4', 0x00, 0x01,
    0x08, b'5', 0x00, 0x00,
    0x0A, b'6', 0x00,
    // 21 (int32)
    0x10, b'7', 0x00, 0x15, 0x00, 0x00, 0x00,
    // 91 (int64)
    0x12, b'8', 0x00, 0x5B, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00,
    0x00,
];

#[test]
fn test_mixed_array_layout() {
    let mut buf = [0u8; 128];
    let res = DocumentBuilder::build(&mut buf, |doc| {
        doc.append_array("arr", |arr| {
            arr.append_double(0.2)
                .append_str("element")
                .append_document(|obj| {
                    obj.append_str("a", "b");
                })
                .append_binary(&[1, 2, 3])
                .append_bool(true)
                .append_bool(false)
                .append_null()
                .append_int32(21)
                .append_int64(91);
        });
    });

    assert_eq!(res.status, Status::Ok);
    assert_eq!(res.len, 98);
    assert_eq!(&buf[..98], &ARR[..]);
    assert!(buf[98..].iter().all(|b| *b == 0));
}

#[test]
fn test_mixed_array_decode() {
    let doc = Document::new(&ARR);
    assert!(doc.valid(ValidationOptions::STRICT));

    let arr = doc.get("arr").unwrap().get_arr();
    let expected = [
        ElementType::Double,
        ElementType::String,
        ElementType::Document,
        ElementType::Binary,
        ElementType::Boolean,
        ElementType::Boolean,
        ElementType::Null,
        ElementType::Int32,
        ElementType::Int64,
    ];

    let mut count = 0;
    for (el, ty) in arr.iter().zip(expected.iter()) {
        assert_eq!(el.index(), count);
        assert_eq!(el.ty(), Some(*ty));
        assert!(el.name_equals(&count.to_string()));
        count += 1;
    }
    assert_eq!(count, 9);

    assert_eq!(arr.get_index(0).unwrap().get_double(), 0.2);
    assert_eq!(arr.get_index(1).unwrap().get_str().unwrap(), "element");
    assert_eq!(
        arr.get_index(2).unwrap().get_doc().get("a").unwrap().get_str_bytes(),
        b"b"
    );
    let bin = arr.get_index(3).unwrap();
    assert_eq!(bin.get_binary(), &[1, 2, 3]);
    assert_eq!(bin.binary_subtype(), 0x00);
    assert_eq!(arr.get_index(4).unwrap().get_bool(), true);
    assert_eq!(arr.get_index(5).unwrap().get_bool(), false);
    assert!(arr.get_index(6).unwrap().is_null());
    assert_eq!(arr.get_index(7).unwrap().get_int32(), 21);
    assert_eq!(arr.get_index(8).unwrap().get_int64(), 91);

    assert!(arr.contains_str("element"));
    assert!(arr.contains_double(0.2));
    assert!(arr.contains_int(21));
    assert!(arr.contains_int(91));
    assert!(arr.contains_number(91.0));
    assert!(!arr.contains_int32(91));
}

fn check(bin: Vec<u8>, expected: &[u8]) {
    assert_eq!(&bin[..], expected);
    assert!(bsonpot::from_bin(&bin).is_ok());
}

#[test]
fn test_scalars() {
    check(
        bsonpot::to_bin(|doc| {
            doc.append_double("a", 0.2);
        }),
        &[
            0x10, 0x00, 0x00, 0x00, 0x01, 0x61, 0x00, 0x9A, 0x99, 0x99, 0x99, 0x99, 0x99, 0xC9,
            0x3F, 0x00,
        ],
    );
    check(
        bsonpot::to_bin(|doc| {
            doc.append_str("hello", "world");
        }),
        b"\x16\x00\x00\x00\x02hello\x00\x06\x00\x00\x00world\x00\x00",
    );
    check(
        bsonpot::to_bin(|doc| {
            doc.append_bool("t", true);
        }),
        &[0x09, 0x00, 0x00, 0x00, 0x08, 0x74, 0x00, 0x01, 0x00],
    );
    check(
        bsonpot::to_bin(|doc| {
            doc.append_null("n");
        }),
        &[0x08, 0x00, 0x00, 0x00, 0x0A, 0x6E, 0x00, 0x00],
    );
    check(
        bsonpot::to_bin(|doc| {
            doc.append_int32("val", 9812);
        }),
        b"\x0E\x00\x00\x00\x10val\x00\x54\x26\x00\x00\x00",
    );
    check(
        bsonpot::to_bin(|doc| {
            doc.append_int64("val", 98761234);
        }),
        b"\x12\x00\x00\x00\x12val\x00\x12\xFA\xE2\x05\x00\x00\x00\x00\x00",
    );
    check(
        bsonpot::to_bin(|doc| {
            doc.append_binary("bin", &[0xAA, 0xBB]);
        }),
        b"\x11\x00\x00\x00\x05bin\x00\x02\x00\x00\x00\x00\xAA\xBB\x00",
    );
}

#[test]
fn test_round_trip_values() {
    let bin = bsonpot::to_bin(|doc| {
        doc.append_double("d", -1.25)
            .append_str("s", "héllo")
            .append_binary("b", &[])
            .append_bool("t", true)
            .append_null("n")
            .append_int32("i", i32::MIN)
            .append_int64("l", i64::MAX)
            .append_document("o", |_| {})
            .append_array("a", |_| {});
    });

    let doc = bsonpot::from_bin(&bin).unwrap();
    assert_eq!(doc.get("d").unwrap().try_double(), Some(-1.25));
    assert_eq!(doc.get("s").unwrap().try_str(), Some("héllo"));
    assert_eq!(doc.get("b").unwrap().try_binary(), Some(&[][..]));
    assert_eq!(doc.get("t").unwrap().try_bool(), Some(true));
    assert!(doc.get("n").unwrap().is_null());
    assert_eq!(doc.get("i").unwrap().try_int32(), Some(i32::MIN));
    assert_eq!(doc.get("l").unwrap().try_int64(), Some(i64::MAX));
    assert!(doc.get("o").unwrap().try_doc().unwrap().is_empty());
    assert!(doc.get("a").unwrap().try_arr().unwrap().is_empty());

    // Mismatched types don't read the payload
    assert_eq!(doc.get("d").unwrap().try_int32(), None);
    assert_eq!(doc.get("s").unwrap().try_binary(), None);
    assert_eq!(doc.get("i").unwrap().try_int(), Some(i32::MIN as i64));
    assert_eq!(doc.get("l").unwrap().try_number(), Some(i64::MAX as f64));
    assert_eq!(doc.get("n").unwrap().try_number(), None);
}

#[test]
fn test_copy_values_between_documents() {
    let src = bsonpot::to_bin(|doc| {
        doc.append_int32("x", 1).append_document("y", |y| {
            y.append_array("z", |z| {
                z.append_str("deep");
            });
        });
    });
    let src = bsonpot::from_bin(&src).unwrap();

    let copy = bsonpot::to_bin(|doc| {
        for el in src {
            doc.append_value(el.name_str().unwrap(), el.value().unwrap());
        }
    });
    assert_eq!(&copy[..], src.as_bytes());
}

#[test]
fn test_deep_nesting() {
    const DEPTH: usize = 64;

    fn nest(doc: &mut DocumentBuilder, depth: usize) {
        if depth == 0 {
            doc.append_int32("leaf", depth as i32);
        } else {
            doc.append_document("d", |child| nest(child, depth - 1));
        }
    }

    let bin = bsonpot::to_bin(|doc| nest(doc, DEPTH));
    let mut doc = bsonpot::from_bin(&bin).unwrap();
    for _ in 0..DEPTH {
        doc = doc.get("d").unwrap().get_doc();
    }
    assert_eq!(doc.get("leaf").unwrap().get_int32(), 0);
}

#[test]
fn test_open_guards() {
    let mut buf = [0u8; 64];
    let res = DocumentBuilder::build(&mut buf, |doc| {
        {
            let mut arr = doc.open_array("a");
            arr.append_int32(1);
            let mut inner = arr.open_document();
            inner.append_bool("ok", true);
        }
        doc.append_null("after");
    });
    assert!(res.is_ok());

    let doc = bsonpot::from_bin(&buf[..res.len]).unwrap();
    let arr = doc.get("a").unwrap().get_arr();
    assert_eq!(arr.iter().count(), 2);
    assert!(arr.get_index(1).unwrap().get_doc().get("ok").unwrap().get_bool());
    assert!(doc.get("after").unwrap().is_null());
}

#[test]
fn test_integer_keys() {
    let by_counter = bsonpot::to_bin(|doc| {
        doc.append_array("a", |arr| {
            arr.append_int32(10).append_str("x");
        });
    });

    let by_key = bsonpot::to_bin(|doc| {
        let mut key = itoa::Buffer::new();
        doc.append_document("a", |arr| {
            arr.append_int32(bsonpot::consts::index_key(0, &mut key), 10);
            arr.append_str(bsonpot::consts::index_key(1, &mut key), "x");
        });
    });

    // Same bytes apart from the element tag of "a"
    assert_eq!(by_counter.len(), by_key.len());
    assert_eq!(by_counter[4], 0x04);
    assert_eq!(by_key[4], 0x03);
    assert_eq!(by_counter[5..], by_key[5..]);
}
