//! Standard reply decoder

use bytes::Bytes;

use crate::error::Result;
use super::codec::{decode_int, decode_string};
use super::{ByteCursor, StandardStatus};

/// Decode a standard pong payload (echoed request prefix already removed).
///
/// Field order: protocol, mode, player count, minutes remaining, map,
/// description, max clients, flags. Trailing bytes are ignored.
pub fn decode_standard(payload: impl Into<Bytes>) -> Result<StandardStatus> {
    let mut cursor = ByteCursor::new(payload);

    let protocol = decode_int(&mut cursor)?;
    let mode = decode_int(&mut cursor)?;
    let player_count = decode_int(&mut cursor)?;
    let minutes_remaining = decode_int(&mut cursor)?;
    let current_map = decode_string(&mut cursor)?;
    let description = decode_string(&mut cursor)?;
    let max_clients = decode_int(&mut cursor)?;
    let flags = decode_int(&mut cursor)?;

    if cursor.peekable() {
        tracing::trace!("Ignoring {} trailing bytes in standard pong", cursor.remaining());
    }

    Ok(StandardStatus {
        protocol,
        mode,
        player_count,
        minutes_remaining,
        current_map,
        description,
        max_clients,
        flags,
        master_mode: flags >> 6,
        password: flags & 1 == 1,
    })
}
