//! Network Module
//!
//! UDP transport for status queries.
//!
//! ## Architecture
//! - One socket per ping, released when the ping returns
//! - Per-receive read deadline, no retries
//! - Echoed request prefix stripped before payloads reach the decoders

mod connection;

use bytes::Bytes;

use crate::error::Result;

pub use connection::{resolve_status_addr, Connection};

/// Supplies reply payloads, echoed request prefix removed
pub trait ReplySource {
    /// Block until the next payload arrives
    fn next_reply(&mut self) -> Result<Bytes>;
}
