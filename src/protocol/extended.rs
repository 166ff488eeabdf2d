//! Extended reply assembly
//!
//! The server answers an extended query with one server-info packet and one
//! packet per connected player. The packets are independent datagrams and
//! the server-info packet does not always arrive first, so each payload is
//! decoded on its own and merged into a running [`ExtendedStatus`].
//!
//! ## Packet Layout
//! ```text
//! ┌─────┬─────────┬───────┬──────┬──────────────────────────────┐
//! │ ack │ version │ error │ disc │ body                         │
//! └─────┴─────────┴───────┴──────┴──────────────────────────────┘
//!   disc == -10  →  body is filler, one byte per connected player
//!   otherwise    →  body is one player record
//! ```

use std::net::Ipv4Addr;

use bytes::Bytes;

use crate::error::{PingError, Result};
use crate::network::ReplySource;
use super::codec::{decode_int, decode_string};
use super::status::EXT_PLAYER_STATS_RESP_IDS;
use super::{ByteCursor, ExtendedStatus, Player};

/// Fields common to every extended packet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtendedHeader {
    pub ack: i32,
    pub version: i32,
    pub error_flag: i32,
}

/// What a single extended packet carries
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtendedBody {
    /// Server-info packet announcing how many player packets follow
    ServerInfo { marker: i32, player_count: usize },

    /// One player's stats
    Player { marker: i32, player: Player },
}

/// One fully decoded extended datagram
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtendedPacket {
    pub header: ExtendedHeader,
    pub body: ExtendedBody,
}

/// Decode one extended pong payload (echoed request prefix already removed)
pub fn decode_extended_packet(payload: impl Into<Bytes>) -> Result<ExtendedPacket> {
    let mut cursor = ByteCursor::new(payload);

    let header = ExtendedHeader {
        ack: decode_int(&mut cursor)?,
        version: decode_int(&mut cursor)?,
        error_flag: decode_int(&mut cursor)?,
    };
    let marker = decode_int(&mut cursor)?;

    let body = if marker == EXT_PLAYER_STATS_RESP_IDS {
        // The server pads the info packet with one byte per player
        let player_count = cursor.skip_remaining();
        ExtendedBody::ServerInfo {
            marker,
            player_count,
        }
    } else {
        ExtendedBody::Player {
            marker,
            player: decode_player(&mut cursor)?,
        }
    };

    Ok(ExtendedPacket { header, body })
}

fn decode_player(cursor: &mut ByteCursor) -> Result<Player> {
    let client_number = decode_int(cursor)?;
    let ping = decode_int(cursor)?;
    let name = decode_string(cursor)?;
    let team = decode_string(cursor)?;
    let frags = decode_int(cursor)?;
    let flagscore = decode_int(cursor)?;
    let deaths = decode_int(cursor)?;
    let teamkills = decode_int(cursor)?;
    let accuracy = decode_int(cursor)?;
    let health = decode_int(cursor)?;
    let armour = decode_int(cursor)?;
    let gun_selected = decode_int(cursor)?;
    let role = decode_int(cursor)?;
    let state = decode_int(cursor)?;

    // Only the first three octets are sent
    let [a, b, c] = cursor.next_bytes::<3>()?;
    let ip = format!("{}/24", Ipv4Addr::new(a, b, c, 0));

    Ok(Player {
        client_number,
        ping,
        name,
        team,
        frags,
        flagscore,
        deaths,
        teamkills,
        accuracy,
        health,
        armour,
        gun_selected,
        role,
        state,
        ip,
    })
}

/// Merges extended packets into one status record.
///
/// Complete once the server-info packet has been seen and at least as many
/// players as it announced have arrived, in whatever order.
#[derive(Debug, Default)]
pub struct ExtendedAssembler {
    status: ExtendedStatus,
}

impl ExtendedAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode one payload and merge it.
    ///
    /// A payload that fails to decode leaves the assembler untouched.
    pub fn feed(&mut self, payload: impl Into<Bytes>) -> Result<()> {
        let packet = decode_extended_packet(payload)?;
        self.merge(packet)
    }

    /// Merge an already decoded packet
    pub fn merge(&mut self, packet: ExtendedPacket) -> Result<()> {
        match packet.body {
            ExtendedBody::ServerInfo {
                marker,
                player_count,
            } => {
                if self.status.ids_marker.is_some() {
                    tracing::warn!("Server sent a second server-info packet");
                    return Err(PingError::Protocol(
                        "duplicate extended server-info packet".to_string(),
                    ));
                }
                tracing::debug!("Extended server info: {} players", player_count);
                self.status.ids_marker = Some(marker);
                self.status.player_count = player_count;
            }
            ExtendedBody::Player { marker, player } => {
                tracing::debug!(
                    "Extended player packet: cn {} '{}'",
                    player.client_number,
                    player.name
                );
                self.status.stats_marker = Some(marker);
                self.status.players.push(player);
            }
        }

        self.status.ack = packet.header.ack;
        self.status.version = packet.header.version;
        self.status.error_flag = packet.header.error_flag;
        Ok(())
    }

    /// Whether the server-info packet and all announced players are in
    pub fn is_complete(&self) -> bool {
        self.status.ids_marker.is_some() && self.status.players.len() >= self.status.player_count
    }

    /// The record merged so far
    pub fn status(&self) -> &ExtendedStatus {
        &self.status
    }

    /// Take the finished record
    pub fn finish(self) -> Result<ExtendedStatus> {
        if !self.is_complete() {
            return Err(PingError::Protocol(format!(
                "extended reply incomplete: info packet {}, {}/{} players",
                if self.status.ids_marker.is_some() { "received" } else { "missing" },
                self.status.players.len(),
                self.status.player_count
            )));
        }
        Ok(self.status)
    }

    /// Pull payloads from `source` until the reply is complete
    pub fn assemble<S: ReplySource + ?Sized>(source: &mut S) -> Result<ExtendedStatus> {
        let mut assembler = Self::new();
        while !assembler.is_complete() {
            let payload = source.next_reply()?;
            assembler.feed(payload)?;
        }
        assembler.finish()
    }
}
