//! Configuration for acping
//!
//! Centralized configuration with sensible defaults.

use std::time::Duration;

/// Default AssaultCube game port; the status port is one above it
pub const DEFAULT_GAME_PORT: u16 = 28763;

/// Read deadline applied to each receive when none is given
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(3);

/// Receive buffer size; status replies fit comfortably in one MTU
pub const DEFAULT_RECV_BUFFER_SIZE: usize = 1024;

/// Pings a sweep runs at once
pub const DEFAULT_MAX_CONCURRENT_PINGS: usize = 32;

/// Configuration for ping operations
#[derive(Debug, Clone)]
pub struct Config {
    /// Deadline for each individual datagram receive
    pub read_timeout: Duration,

    /// Size of the buffer each datagram is received into.
    /// Longer datagrams are truncated by the OS.
    pub recv_buffer_size: usize,

    /// Upper bound on sockets a sweep keeps open at the same time
    pub max_concurrent_pings: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            read_timeout: DEFAULT_READ_TIMEOUT,
            recv_buffer_size: DEFAULT_RECV_BUFFER_SIZE,
            max_concurrent_pings: DEFAULT_MAX_CONCURRENT_PINGS,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the per-receive timeout. Zero keeps the default.
    pub fn read_timeout(mut self, timeout: Duration) -> Self {
        self.config.read_timeout = effective_timeout(timeout);
        self
    }

    /// Set the per-receive timeout (in milliseconds). Zero keeps the default.
    pub fn read_timeout_ms(self, ms: u64) -> Self {
        self.read_timeout(Duration::from_millis(ms))
    }

    /// Set the receive buffer size (in bytes)
    pub fn recv_buffer_size(mut self, size: usize) -> Self {
        self.config.recv_buffer_size = size.max(1);
        self
    }

    /// Set how many pings a sweep runs at once (at least one)
    pub fn max_concurrent_pings(mut self, count: usize) -> Self {
        self.config.max_concurrent_pings = count.max(1);
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}

/// Resolve a caller-supplied timeout, where zero means "use the default"
pub fn effective_timeout(timeout: Duration) -> Duration {
    if timeout.is_zero() {
        DEFAULT_READ_TIMEOUT
    } else {
        timeout
    }
}

