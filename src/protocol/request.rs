//! Request definitions
//!
//! The two query payloads a client can send.

/// Standard query: any non-zero first byte asks for the standard pong
const STANDARD_PAYLOAD: &[u8] = &[0x01];

/// Extended query:
/// - `0x00` selects the extended pong
/// - `0x01` asks for player stats
/// - `0xFF` (-1) asks for all players rather than a single client number
const EXTENDED_PAYLOAD: &[u8] = &[0x00, 0x01, 0xFF];

/// A status query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Request {
    /// Server summary only
    Standard,

    /// Server info plus one record per connected player
    Extended,
}

impl Request {
    /// Bytes sent verbatim to the status port
    pub fn payload(&self) -> &'static [u8] {
        match self {
            Request::Standard => STANDARD_PAYLOAD,
            Request::Extended => EXTENDED_PAYLOAD,
        }
    }

    /// Length of the request prefix the server echoes at the start of
    /// every reply datagram
    pub fn echo_len(&self) -> usize {
        self.payload().len()
    }
}
