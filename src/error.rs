//! Error types for acping
//!
//! Provides a unified error type for all operations.

use std::time::Duration;

use thiserror::Error;

/// Result type alias using PingError
pub type Result<T> = std::result::Result<T, PingError>;

/// Unified error type for ping operations
#[derive(Debug, Error)]
pub enum PingError {
    // -------------------------------------------------------------------------
    // Transport Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Address resolution failed: {0}")]
    Resolve(String),

    #[error("No reply within {0:?}")]
    Timeout(Duration),

    // -------------------------------------------------------------------------
    // Decode Errors
    // -------------------------------------------------------------------------
    #[error("Read past end of payload at byte {position} (payload is {len} bytes)")]
    OutOfRange { position: usize, len: usize },

    #[error("Colour escape without colour byte at byte {position}")]
    MalformedString { position: usize },

    #[error("Protocol error: {0}")]
    Protocol(String),
}

impl PingError {
    /// True when a receive ran past its deadline
    pub fn is_timeout(&self) -> bool {
        matches!(self, PingError::Timeout(_))
    }

    /// True when the reply arrived but could not be decoded
    pub fn is_decode(&self) -> bool {
        matches!(
            self,
            PingError::OutOfRange { .. } | PingError::MalformedString { .. } | PingError::Protocol(_)
        )
    }
}
