//! Byte cursor
//!
//! Sequential reader over a single reply payload.

use bytes::Bytes;

use crate::error::{PingError, Result};

/// Reads bytes front to back from a payload, tracking the read position.
///
/// Invariant: `0 <= position <= len`. Reading past the end is an
/// [`PingError::OutOfRange`] error, never a zero value.
#[derive(Debug, Clone)]
pub struct ByteCursor {
    /// Payload being read (shared, never copied per read)
    buf: Bytes,

    /// Index of the next unread byte
    pos: usize,
}

impl ByteCursor {
    /// Create a cursor positioned at the start of `buf`
    pub fn new(buf: impl Into<Bytes>) -> Self {
        Self {
            buf: buf.into(),
            pos: 0,
        }
    }

    /// Whether unread bytes remain
    pub fn peekable(&self) -> bool {
        self.pos < self.buf.len()
    }

    /// Read the next byte and advance
    pub fn next_byte(&mut self) -> Result<u8> {
        let byte = *self.buf.get(self.pos).ok_or(PingError::OutOfRange {
            position: self.pos,
            len: self.buf.len(),
        })?;
        self.pos += 1;
        Ok(byte)
    }

    /// Read the next `N` bytes and advance.
    ///
    /// Fails without moving if fewer than `N` bytes remain.
    pub fn next_bytes<const N: usize>(&mut self) -> Result<[u8; N]> {
        if self.remaining() < N {
            return Err(PingError::OutOfRange {
                position: self.pos,
                len: self.buf.len(),
            });
        }
        let mut out = [0u8; N];
        out.copy_from_slice(&self.buf[self.pos..self.pos + N]);
        self.pos += N;
        Ok(out)
    }

    /// Unread bytes from the current position up to the next zero byte.
    ///
    /// Returns `None` when no terminator remains in the payload.
    pub(crate) fn peek_until_nul(&self) -> Option<&[u8]> {
        let rest = &self.buf[self.pos..];
        rest.iter().position(|&b| b == 0).map(|end| &rest[..end])
    }

    /// Advance by `n` bytes (caller guarantees they exist)
    pub(crate) fn advance(&mut self, n: usize) {
        debug_assert!(n <= self.remaining());
        self.pos += n;
    }

    /// Consume everything left, returning how many bytes that was
    pub fn skip_remaining(&mut self) -> usize {
        let n = self.remaining();
        self.pos = self.buf.len();
        n
    }

    /// Current read position
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Number of unread bytes
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// Total payload length
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }
}
