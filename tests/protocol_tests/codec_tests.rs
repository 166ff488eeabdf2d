//! Codec Tests
//!
//! Tests for the escape-coded integer and colour-stripped string codecs.

use acping::protocol::{decode_int, decode_string, encode_int, encode_string, ByteCursor};
use acping::PingError;
use bytes::BytesMut;
use proptest::prelude::*;

fn int_from(bytes: &[u8]) -> Result<(i32, usize), PingError> {
    let mut cursor = ByteCursor::new(bytes.to_vec());
    let value = decode_int(&mut cursor)?;
    Ok((value, cursor.position()))
}

fn encoded_int(value: i32) -> Vec<u8> {
    let mut buf = BytesMut::new();
    encode_int(&mut buf, value);
    buf.to_vec()
}

// =============================================================================
// Integer Decoding Tests
// =============================================================================

#[test]
fn test_decode_literal_positive() {
    assert_eq!(int_from(&[0x05]).unwrap(), (5, 1));
    assert_eq!(int_from(&[0x7F]).unwrap(), (127, 1));
}

#[test]
fn test_decode_literal_negative() {
    assert_eq!(int_from(&[0xFF]).unwrap(), (-1, 1));
    assert_eq!(int_from(&[0xF6]).unwrap(), (-10, 1));
    assert_eq!(int_from(&[0x82]).unwrap(), (-126, 1));
}

#[test]
fn test_decode_short_escape() {
    assert_eq!(int_from(&[0x80, 0xB1, 0x04]).unwrap(), (1201, 3));
    assert_eq!(int_from(&[0x80, 0xBA, 0x00]).unwrap(), (186, 3));
    assert_eq!(int_from(&[0x80, 0xFF, 0xFF]).unwrap(), (-1, 3));
}

#[test]
fn test_decode_short_payload_escape_byte_is_literal() {
    // 0x80 inside the body is data, not another escape
    assert_eq!(int_from(&[0x80, 0x00, 0x80]).unwrap(), (-32768, 3));
    assert_eq!(int_from(&[0x80, 0x80, 0x00]).unwrap(), (128, 3));
}

#[test]
fn test_decode_wide_escape() {
    assert_eq!(
        int_from(&[0x81, 0x78, 0x56, 0x34, 0x12]).unwrap(),
        (0x1234_5678, 5)
    );
    assert_eq!(
        int_from(&[0x81, 0x00, 0x00, 0x00, 0x80]).unwrap(),
        (i32::MIN, 5)
    );
}

#[test]
fn test_decode_wide_payload_escape_bytes_are_literal() {
    assert_eq!(
        int_from(&[0x81, 0x80, 0x80, 0x80, 0x80]).unwrap(),
        (-2_139_062_144, 5)
    );
}

#[test]
fn test_decode_leaves_trailing_bytes() {
    let mut cursor = ByteCursor::new(vec![0x80, 0x10, 0x27, 0x03]);

    assert_eq!(decode_int(&mut cursor).unwrap(), 10_000);
    assert_eq!(decode_int(&mut cursor).unwrap(), 3);
    assert!(!cursor.peekable());
}

#[test]
fn test_decode_truncated_ints() {
    let cases: [&[u8]; 4] = [&[], &[0x80], &[0x80, 0x01], &[0x81, 0x01, 0x02, 0x03]];
    for bytes in cases {
        match int_from(bytes) {
            Err(PingError::OutOfRange { .. }) => {}
            other => panic!("Expected OutOfRange for {:?}, got {:?}", bytes, other),
        }
    }
}

// =============================================================================
// Integer Encoding Tests
// =============================================================================

#[test]
fn test_encode_picks_shortest_form() {
    assert_eq!(encoded_int(0), vec![0x00]);
    assert_eq!(encoded_int(-10), vec![0xF6]);
    assert_eq!(encoded_int(1201), vec![0x80, 0xB1, 0x04]);
    assert_eq!(encoded_int(70_000), vec![0x81, 0x70, 0x11, 0x01, 0x00]);
}

#[test]
fn test_encode_escapes_reserved_values() {
    // -128 and -127 collide with the escape bytes
    assert_eq!(encoded_int(-128), vec![0x80, 0x80, 0xFF]);
    assert_eq!(encoded_int(-127), vec![0x80, 0x81, 0xFF]);
    assert_eq!(int_from(&encoded_int(-127)).unwrap(), (-127, 3));
}

proptest! {
    #[test]
    fn prop_literal_range_is_one_byte(v in -126i32..=127) {
        let bytes = encoded_int(v);
        prop_assert_eq!(bytes.len(), 1);
        prop_assert_eq!(bytes[0] as i8 as i32, v);
        prop_assert_eq!(int_from(&bytes).unwrap(), (v, 1));
    }

    #[test]
    fn prop_short_range_uses_short_escape(
        v in any::<i16>().prop_filter("outside literal range", |v| !(-126..=127).contains(v))
    ) {
        let mut bytes = vec![0x80];
        bytes.extend_from_slice(&v.to_le_bytes());
        prop_assert_eq!(int_from(&bytes).unwrap(), (v as i32, 3));
        prop_assert_eq!(encoded_int(v as i32), bytes);
    }

    #[test]
    fn prop_wide_escape_reads_little_endian(v in any::<i32>()) {
        let mut bytes = vec![0x81];
        bytes.extend_from_slice(&v.to_le_bytes());
        prop_assert_eq!(int_from(&bytes).unwrap(), (v, 5));
    }
}

// =============================================================================
// String Tests
// =============================================================================

#[test]
fn test_decode_string_strips_colour() {
    let mut cursor = ByteCursor::new(vec![0x0C, 0x02, b'h', b'i', 0x00]);

    assert_eq!(decode_string(&mut cursor).unwrap(), "hi");
    assert_eq!(cursor.position(), 5);
    assert!(!cursor.peekable());
}

#[test]
fn test_decode_string_colour_mid_text() {
    let mut cursor = ByteCursor::new(b"a\x0C3b\x0Cxc\0".to_vec());

    assert_eq!(decode_string(&mut cursor).unwrap(), "abc");
}

#[test]
fn test_decode_string_colour_byte_may_be_form_feed() {
    let mut cursor = ByteCursor::new(vec![0x0C, 0x0C, b'x', 0x00]);

    assert_eq!(decode_string(&mut cursor).unwrap(), "x");
}

#[test]
fn test_decode_empty_string() {
    let mut cursor = ByteCursor::new(vec![0x00, 0x07]);

    assert_eq!(decode_string(&mut cursor).unwrap(), "");
    assert_eq!(cursor.position(), 1);
    assert_eq!(decode_int(&mut cursor).unwrap(), 7);
}

#[test]
fn test_decode_consecutive_strings() {
    let mut cursor = ByteCursor::new(b"ac_desert3\0Test Server\0".to_vec());

    assert_eq!(decode_string(&mut cursor).unwrap(), "ac_desert3");
    assert_eq!(decode_string(&mut cursor).unwrap(), "Test Server");
    assert!(!cursor.peekable());
}

#[test]
fn test_decode_unterminated_string() {
    let mut cursor = ByteCursor::new(b"no end".to_vec());

    assert!(matches!(
        decode_string(&mut cursor),
        Err(PingError::OutOfRange { .. })
    ));
}

#[test]
fn test_decode_trailing_colour_escape_is_malformed() {
    let mut cursor = ByteCursor::new(vec![b'a', 0x0C, 0x00]);

    match decode_string(&mut cursor) {
        Err(PingError::MalformedString { position }) => assert_eq!(position, 1),
        other => panic!("Expected MalformedString, got {:?}", other),
    }
}

#[test]
fn test_decode_string_invalid_utf8_is_replaced() {
    let mut cursor = ByteCursor::new(vec![b'a', 0xE9, 0x00]);

    assert_eq!(decode_string(&mut cursor).unwrap(), "a\u{FFFD}");
}

#[test]
fn test_encode_string_appends_terminator() {
    let mut buf = BytesMut::new();
    encode_string(&mut buf, "CLA");

    assert_eq!(&buf[..], b"CLA\0");

    let mut cursor = ByteCursor::new(buf.freeze());
    assert_eq!(decode_string(&mut cursor).unwrap(), "CLA");
}
