//! # acping
//!
//! A client for the AssaultCube UDP status query protocol with:
//! - Standard pongs: a compact server summary in one datagram
//! - Extended pongs: server info plus per-player stats over several datagrams
//! - Order-independent reassembly of extended replies
//! - Concurrent sweeps over many servers
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         Pinger                              │
//! │          (ping_standard / ping_extended / sweep)            │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                   UDP Connection                            │
//! │        (status port = game port + 1, read deadline)         │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ payloads, echo stripped
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌──────────────┐
//!   │  Standard   │          │   Extended   │
//!   │  Decoder    │          │  Assembler   │
//!   └──────┬──────┘          └──────┬───────┘
//!          └────────────┬───────────┘
//!                       ▼
//!               ┌───────────────┐
//!               │ Scalar Codec  │
//!               │ (ByteCursor)  │
//!               └───────────────┘
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use std::time::Duration;
//!
//! let status = acping::ping_standard("127.0.0.1", 28763, Duration::ZERO)?;
//! println!("{} on {}", status.description, status.current_map);
//! # Ok::<(), acping::PingError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod protocol;
pub mod network;
pub mod pinger;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{PingError, Result};
pub use config::Config;
pub use pinger::{ping_extended, ping_standard, Pinger, Status, SweepResult, Target};
pub use protocol::{ExtendedStatus, Player, Request, StandardStatus};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of acping
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
