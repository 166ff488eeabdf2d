//! Protocol Module
//!
//! Wire format of the status query (ping/pong) protocol.
//!
//! ## Requests
//! ```text
//! Standard:  ┌──────┐
//!            │ 0x01 │
//!            └──────┘
//! Extended:  ┌──────┬──────┬──────┐
//!            │ 0x00 │ 0x01 │ 0xFF │   extended, player stats, all players
//!            └──────┴──────┴──────┘
//! ```
//!
//! ## Replies
//! Every reply datagram starts with the request echoed back, followed by
//! escape-coded integers and terminated strings (see [`codec`]).
//!
//! ### Standard Pong
//! ```text
//! ┌──────────┬──────┬─────────┬─────────┬─────┬──────┬─────────┬───────┐
//! │ protocol │ mode │ players │ minutes │ map │ desc │ maxclts │ flags │
//! └──────────┴──────┴─────────┴─────────┴─────┴──────┴─────────┴───────┘
//! ```
//!
//! ### Extended Pong
//! One server-info datagram plus one datagram per player, in any order
//! (see [`extended`]).

mod cursor;
mod request;
mod status;
pub mod codec;
mod standard;
pub mod extended;

pub use cursor::ByteCursor;
pub use request::Request;
pub use status::{
    ExtendedStatus, Player, StandardStatus,
    EXT_PLAYER_STATS_RESP_IDS, EXT_PLAYER_STATS_RESP_STATS,
};
pub use codec::{decode_int, decode_string, encode_int, encode_string};
pub use standard::decode_standard;
pub use extended::{
    decode_extended_packet, ExtendedAssembler, ExtendedBody, ExtendedHeader, ExtendedPacket,
};
