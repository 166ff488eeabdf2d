//! Pinger Module
//!
//! Public ping operations tying the transport to the decoders.
//!
//! ## Responsibilities
//! - Open one connection per ping and drop it on every exit path
//! - Run the standard (single datagram) and extended (multi datagram) exchanges
//! - Sweep many servers through a bounded pool of workers

use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::{Config, DEFAULT_GAME_PORT};
use crate::error::{PingError, Result};
use crate::network::Connection;
use crate::protocol::{decode_standard, ExtendedAssembler, ExtendedStatus, Request, StandardStatus};

/// A server to query, addressed by its game port
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Target {
    pub host: String,
    pub port: u16,
}

impl Target {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.host.contains(':') {
            write!(f, "[{}]:{}", self.host, self.port)
        } else {
            write!(f, "{}:{}", self.host, self.port)
        }
    }
}

impl FromStr for Target {
    type Err = PingError;

    /// Accepts `host`, `host:port`, `[v6]:port` and bare IPv6 addresses.
    /// A missing port means the default game port.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(PingError::Resolve("empty server address".to_string()));
        }

        if let Ok(addr) = s.parse::<SocketAddr>() {
            return Ok(Self::new(addr.ip().to_string(), addr.port()));
        }

        if let Some(rest) = s.strip_prefix('[') {
            let (host, after) = rest
                .split_once(']')
                .ok_or_else(|| PingError::Resolve(format!("unclosed '[' in '{}'", s)))?;
            let port = match after {
                "" => DEFAULT_GAME_PORT,
                _ => after
                    .strip_prefix(':')
                    .and_then(|port| port.parse::<u16>().ok())
                    .ok_or_else(|| PingError::Resolve(format!("invalid port in '{}'", s)))?,
            };
            return Ok(Self::new(host, port));
        }

        match s.rsplit_once(':') {
            Some((host, port)) if !host.contains(':') => {
                let port = port
                    .parse::<u16>()
                    .map_err(|_| PingError::Resolve(format!("invalid port in '{}'", s)))?;
                Ok(Self::new(host, port))
            }
            _ => Ok(Self::new(s, DEFAULT_GAME_PORT)),
        }
    }
}

/// Either kind of decoded reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Status {
    Standard(StandardStatus),
    Extended(ExtendedStatus),
}

/// Outcome of pinging one target during a sweep
#[derive(Debug)]
pub struct SweepResult {
    pub target: Target,
    pub result: Result<Status>,
}

/// Runs pings with a shared configuration.
///
/// Holds no per-ping state, so one `Pinger` can serve any number of
/// concurrent pings.
#[derive(Debug, Clone, Default)]
pub struct Pinger {
    config: Config,
}

impl Pinger {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Send the standard query and decode the single reply datagram
    pub fn ping_standard(&self, host: &str, port: u16) -> Result<StandardStatus> {
        let mut conn = Connection::open(host, port, Request::Standard, &self.config)?;
        conn.send_request()?;

        let payload = conn.recv()?;
        let status = decode_standard(payload)?;

        tracing::debug!(
            "Standard pong from {}: {} on {}, {}/{} players",
            conn.peer_addr(),
            status.description,
            status.current_map,
            status.player_count,
            status.max_clients
        );
        Ok(status)
    }

    /// Send the extended query and assemble the server-info and player
    /// datagrams, in whichever order they arrive
    pub fn ping_extended(&self, host: &str, port: u16) -> Result<ExtendedStatus> {
        let mut conn = Connection::open(host, port, Request::Extended, &self.config)?;
        conn.send_request()?;

        let status = ExtendedAssembler::assemble(&mut conn)?;

        tracing::debug!(
            "Extended pong from {}: {} players",
            conn.peer_addr(),
            status.players.len()
        );
        Ok(status)
    }

    /// Ping one target with either query
    pub fn ping(&self, target: &Target, request: Request) -> Result<Status> {
        match request {
            Request::Standard => self
                .ping_standard(&target.host, target.port)
                .map(Status::Standard),
            Request::Extended => self
                .ping_extended(&target.host, target.port)
                .map(Status::Extended),
        }
    }

    /// Ping every target concurrently.
    ///
    /// A fixed pool of at most `max_concurrent_pings` workers pulls targets
    /// off a queue, so no more sockets than that are open at once. Results
    /// come back in the same order as `targets`.
    pub fn sweep(&self, targets: &[Target], request: Request) -> Vec<SweepResult> {
        let workers = self.config.max_concurrent_pings.max(1).min(targets.len());

        let (job_tx, job_rx) = crossbeam::channel::unbounded();
        for job in targets.iter().enumerate() {
            // Receiver is still alive here
            let _ = job_tx.send(job);
        }
        drop(job_tx);

        let (tx, rx) = crossbeam::channel::unbounded();

        let scope = crossbeam::thread::scope(|s| {
            for _ in 0..workers {
                let jobs = job_rx.clone();
                let tx = tx.clone();
                s.spawn(move |_| {
                    for (index, target) in jobs.iter() {
                        let result = self.ping(target, request);
                        if let Err(ref e) = result {
                            tracing::debug!("Ping to {} failed: {}", target, e);
                        }
                        // Receiver outlives the scope
                        let _ = tx.send((index, result));
                    }
                });
            }
        });
        drop(tx);

        if let Err(panic) = scope {
            std::panic::resume_unwind(panic);
        }

        let mut results: Vec<(usize, Result<Status>)> = rx.iter().collect();
        results.sort_by_key(|(index, _)| *index);

        results
            .into_iter()
            .map(|(index, result)| SweepResult {
                target: targets[index].clone(),
                result,
            })
            .collect()
    }
}

/// Send the standard query to `host:port`.
///
/// A zero `read_timeout` uses [`crate::config::DEFAULT_READ_TIMEOUT`].
pub fn ping_standard(host: &str, port: u16, read_timeout: Duration) -> Result<StandardStatus> {
    let config = Config::builder().read_timeout(read_timeout).build();
    Pinger::new(config).ping_standard(host, port)
}

/// Send the extended query to `host:port`.
///
/// A zero `read_timeout` uses [`crate::config::DEFAULT_READ_TIMEOUT`].
pub fn ping_extended(host: &str, port: u16, read_timeout: Duration) -> Result<ExtendedStatus> {
    let config = Config::builder().read_timeout(read_timeout).build();
    Pinger::new(config).ping_extended(host, port)
}
