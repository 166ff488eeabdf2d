//! Status records
//!
//! Decoded replies handed back to callers.

use serde::{Deserialize, Serialize};

/// Discriminator of the extended server-info packet (`0xF6` on the wire)
pub const EXT_PLAYER_STATS_RESP_IDS: i32 = -10;

/// Discriminator the server puts on each player packet (`0xF5` on the wire)
pub const EXT_PLAYER_STATS_RESP_STATS: i32 = -11;

/// Reply to a standard query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandardStatus {
    /// Protocol version spoken by the server
    pub protocol: i32,

    /// Game mode number
    pub mode: i32,

    /// Players currently connected
    pub player_count: i32,

    /// Minutes left in the current round
    pub minutes_remaining: i32,

    pub current_map: String,

    /// Server description, colour codes stripped
    pub description: String,

    pub max_clients: i32,

    /// Raw server flags bitfield
    pub flags: i32,

    /// `flags >> 6`
    pub master_mode: i32,

    /// Bit 0 of `flags`
    pub password: bool,
}

impl StandardStatus {
    /// Human name of the master mode
    pub fn master_mode_name(&self) -> &'static str {
        match self.master_mode {
            0 => "open",
            1 => "private",
            2 => "match",
            _ => "unknown",
        }
    }

    /// Whether every client slot is taken
    pub fn is_full(&self) -> bool {
        self.max_clients > 0 && self.player_count >= self.max_clients
    }
}

/// Reply to an extended query, merged from all of its datagrams
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtendedStatus {
    pub ack: i32,
    pub version: i32,
    pub error_flag: i32,

    /// Set once the server-info packet has been seen
    pub ids_marker: Option<i32>,

    /// Discriminator of the player packets, once one has been seen
    pub stats_marker: Option<i32>,

    /// Player count announced by the server-info packet
    pub player_count: usize,

    /// Players in arrival order
    pub players: Vec<Player>,
}

/// One connected player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub client_number: i32,
    pub ping: i32,

    /// Display name, colour codes stripped
    pub name: String,
    pub team: String,

    pub frags: i32,
    pub flagscore: i32,
    pub deaths: i32,
    pub teamkills: i32,

    /// Accuracy in percent
    pub accuracy: i32,
    pub health: i32,
    pub armour: i32,
    pub gun_selected: i32,
    pub role: i32,
    pub state: i32,

    /// The player's /24 subnet in CIDR form, e.g. `1.2.3.0/24`
    pub ip: String,
}
