//! Scalar codec
//!
//! Encoding and decoding of the two scalar types every reply is built from.
//!
//! ## Integers
//! ```text
//! ┌──────────────┐                         literal  (-126..=127)
//! │ i8           │
//! └──────────────┘
//! ┌──────┬───────────────┐                 short    (i16, little-endian)
//! │ 0x80 │ lo   hi       │
//! └──────┴───────────────┘
//! ┌──────┬───────────────────────────────┐ wide     (i32, little-endian)
//! │ 0x81 │ b0   b1   b2   b3             │
//! └──────┴───────────────────────────────┘
//! ```
//! The escape bytes are only recognised in the leading position; payload
//! bytes of the short and wide forms are always taken literally.
//!
//! ## Strings
//! Raw bytes up to a `0x00` terminator. A form-feed (`0x0C`) starts a
//! two-byte colour escape which is dropped from the decoded text.

use bytes::{BufMut, BytesMut};

use crate::error::{PingError, Result};
use super::ByteCursor;

/// Leading byte of a 16-bit integer (`-128` as `i8`)
pub const INT16_ESCAPE: u8 = 0x80;

/// Leading byte of a 32-bit integer (`-127` as `i8`)
pub const INT32_ESCAPE: u8 = 0x81;

/// Introduces a colour escape inside strings
pub const COLOUR_ESCAPE: u8 = 0x0C;

// =============================================================================
// Integers
// =============================================================================

/// Decode one escape-coded signed integer
pub fn decode_int(cursor: &mut ByteCursor) -> Result<i32> {
    let lead = cursor.next_byte()?;
    match lead {
        INT16_ESCAPE => Ok(i16::from_le_bytes(cursor.next_bytes::<2>()?) as i32),
        INT32_ESCAPE => Ok(i32::from_le_bytes(cursor.next_bytes::<4>()?)),
        literal => Ok(literal as i8 as i32),
    }
}

/// Encode a signed integer in its shortest form
pub fn encode_int(buf: &mut BytesMut, value: i32) {
    if (-126..=127).contains(&value) {
        buf.put_i8(value as i8);
    } else if let Ok(short) = i16::try_from(value) {
        buf.put_u8(INT16_ESCAPE);
        buf.put_i16_le(short);
    } else {
        buf.put_u8(INT32_ESCAPE);
        buf.put_i32_le(value);
    }
}

// =============================================================================
// Strings
// =============================================================================

/// Decode one terminated string, stripping colour escapes.
///
/// The cursor ends just past the terminator. Bytes that are not valid
/// UTF-8 are replaced with U+FFFD.
pub fn decode_string(cursor: &mut ByteCursor) -> Result<String> {
    let start = cursor.position();
    let raw = cursor.peek_until_nul().ok_or(PingError::OutOfRange {
        position: cursor.len(),
        len: cursor.len(),
    })?;

    let mut text = Vec::with_capacity(raw.len());
    let mut i = 0;
    while i < raw.len() {
        if raw[i] == COLOUR_ESCAPE {
            if i + 1 == raw.len() {
                return Err(PingError::MalformedString { position: start + i });
            }
            i += 2;
        } else {
            text.push(raw[i]);
            i += 1;
        }
    }

    let consumed = raw.len() + 1;
    cursor.advance(consumed);
    Ok(String::from_utf8_lossy(&text).into_owned())
}

/// Encode a string as raw bytes followed by a terminator.
///
/// Interior NUL bytes would end the string early on the wire, so they are
/// dropped.
pub fn encode_string(buf: &mut BytesMut, value: &str) {
    buf.extend(value.bytes().filter(|&b| b != 0));
    buf.put_u8(0);
}
