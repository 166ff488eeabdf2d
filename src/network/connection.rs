//! UDP Connection
//!
//! Owns the socket for a single ping exchange.

use std::io::ErrorKind;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr, ToSocketAddrs, UdpSocket};
use std::time::{Duration, Instant};

use bytes::{Bytes, BytesMut};

use crate::config::Config;
use crate::error::{PingError, Result};
use crate::protocol::Request;
use super::ReplySource;

/// One query exchange with a server's status port.
///
/// The socket is closed when the connection is dropped, on every path.
pub struct Connection {
    /// Unconnected socket; replies are filtered by source address
    socket: UdpSocket,

    /// Resolved status port address
    peer_addr: SocketAddr,

    /// Query this connection sends (and expects echoed)
    request: Request,

    /// Deadline for each receive
    read_timeout: Duration,

    /// Receive buffer size
    recv_buffer_size: usize,
}

impl Connection {
    /// Resolve the status port for `host:game_port` and bind a local socket
    pub fn open(host: &str, game_port: u16, request: Request, config: &Config) -> Result<Self> {
        let peer_addr = resolve_status_addr(host, game_port)?;

        let local: SocketAddr = if peer_addr.is_ipv4() {
            (Ipv4Addr::UNSPECIFIED, 0).into()
        } else {
            (Ipv6Addr::UNSPECIFIED, 0).into()
        };
        let socket = UdpSocket::bind(local)?;

        tracing::debug!(
            "Opened {:?} query socket {} -> {}",
            request,
            socket.local_addr()?,
            peer_addr
        );

        Ok(Self {
            socket,
            peer_addr,
            request,
            read_timeout: config.read_timeout,
            recv_buffer_size: config.recv_buffer_size,
        })
    }

    /// Send the request payload
    pub fn send_request(&self) -> Result<()> {
        let payload = self.request.payload();
        self.socket.send_to(payload, self.peer_addr)?;
        tracing::trace!(
            "Sent {} byte {:?} request to {}",
            payload.len(),
            self.request(),
            self.peer_addr
        );
        Ok(())
    }

    /// Receive the next reply from the server with the echoed request
    /// stripped.
    ///
    /// Datagrams from other addresses are dropped. Fails with
    /// [`PingError::Timeout`] when nothing arrives within the read timeout.
    pub fn recv(&mut self) -> Result<Bytes> {
        let deadline = Instant::now() + self.read_timeout;
        let mut buf = BytesMut::zeroed(self.recv_buffer_size);

        let len = loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return Err(self.timed_out());
            }
            self.socket.set_read_timeout(Some(remaining))?;

            match self.socket.recv_from(&mut buf) {
                Ok((n, from)) if from == self.peer_addr => break n,
                Ok((n, from)) => {
                    tracing::debug!("Dropping {} byte datagram from unexpected peer {}", n, from);
                }
                Err(e) if matches!(e.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut) => {
                    // Windows reports TimedOut instead of WouldBlock
                    return Err(self.timed_out());
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => return Err(e.into()),
            }
        };

        tracing::trace!("Received {} byte datagram from {}", len, self.peer_addr);

        let echo_len = self.request.echo_len();
        if len < echo_len {
            tracing::warn!("Reply from {} shorter than echoed request", self.peer_addr);
            return Err(PingError::Protocol(format!(
                "reply of {} bytes is shorter than the {} byte echoed request",
                len, echo_len
            )));
        }

        buf.truncate(len);
        Ok(buf.freeze().slice(echo_len..))
    }

    fn timed_out(&self) -> PingError {
        tracing::warn!("No reply from {} within {:?}", self.peer_addr, self.read_timeout);
        PingError::Timeout(self.read_timeout)
    }

    /// Resolved status port address
    pub fn peer_addr(&self) -> SocketAddr {
        self.peer_addr
    }

    /// Query this connection was opened for
    pub fn request(&self) -> Request {
        self.request
    }
}

impl ReplySource for Connection {
    fn next_reply(&mut self) -> Result<Bytes> {
        self.recv()
    }
}

/// Resolve `host` to the status port, which is always the game port plus one
pub fn resolve_status_addr(host: &str, game_port: u16) -> Result<SocketAddr> {
    let status_port = game_port.checked_add(1).ok_or_else(|| {
        PingError::Resolve(format!("game port {} has no status port", game_port))
    })?;

    (host, status_port)
        .to_socket_addrs()
        .map_err(|e| PingError::Resolve(format!("{}: {}", host, e)))?
        .next()
        .ok_or_else(|| PingError::Resolve(format!("{}: no addresses found", host)))
}
