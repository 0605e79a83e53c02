//! UDP listener for relay command datagrams.
//!
//! The listener binds a UDP socket on all interfaces (port 44444 by default)
//! with `SO_BROADCAST` enabled, so commands sent to the LAN broadcast address
//! reach every relay at once.
//!
//! # Read timeout
//!
//! The socket is configured with a 500 ms read timeout.  `recv_from` blocks
//! for at most that long before returning a timeout error, which the
//! listener reports as `Ok(None)`.  The run loop uses those gaps to check its
//! shutdown flag; a timeout is never treated as a failure.
//!
//! # Oversized datagrams
//!
//! Commands are at most [`MAX_DATAGRAM_SIZE`] bytes.  The receive buffer is
//! one byte larger so an oversized datagram can be told apart from one that
//! fits exactly; oversized datagrams are dropped.

pub mod mock;

use std::net::{SocketAddr, UdpSocket};
use std::time::Duration;

use relay_core::MAX_DATAGRAM_SIZE;
use thiserror::Error;
use tracing::{debug, info};

use crate::application::run_relay::{Datagram, DatagramSource};

/// How long a single receive blocks before yielding to the run loop.
pub const POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Error type for listener setup.
#[derive(Debug, Error)]
pub enum ListenerError {
    /// The UDP socket could not be bound.
    #[error("can't bind socket to {addr}: {source} (already in use?)")]
    BindFailed {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },
    /// A socket option could not be applied.
    #[error("failed to configure socket: {0}")]
    Configure(#[source] std::io::Error),
}

/// Blocking UDP listener.
pub struct UdpListener {
    socket: UdpSocket,
    buf: [u8; MAX_DATAGRAM_SIZE + 1],
}

impl UdpListener {
    /// Binds `addr` with broadcast reception enabled.
    ///
    /// # Errors
    ///
    /// Returns [`ListenerError::BindFailed`] if the address is in use or not
    /// permitted, and [`ListenerError::Configure`] if the socket options
    /// cannot be set.
    pub fn bind(addr: SocketAddr) -> Result<Self, ListenerError> {
        let socket =
            UdpSocket::bind(addr).map_err(|source| ListenerError::BindFailed { addr, source })?;
        socket
            .set_broadcast(true)
            .map_err(ListenerError::Configure)?;
        socket
            .set_read_timeout(Some(POLL_INTERVAL))
            .map_err(ListenerError::Configure)?;

        let listener = Self {
            socket,
            buf: [0u8; MAX_DATAGRAM_SIZE + 1],
        };
        if let Ok(local) = listener.local_addr() {
            info!("listening on UDP {local}");
        }
        Ok(listener)
    }

    /// The address the socket is actually bound to.
    ///
    /// # Errors
    ///
    /// Propagates the OS error from `getsockname`.
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.socket.local_addr()
    }
}

impl DatagramSource for UdpListener {
    fn recv(&mut self) -> std::io::Result<Option<Datagram>> {
        let (len, sender) = match self.socket.recv_from(&mut self.buf) {
            Ok(pair) => pair,
            Err(e) if is_timeout_error(&e) => return Ok(None),
            // Windows reports a datagram larger than the buffer as an error.
            Err(e) if is_oversize_error(&e) => {
                debug!("dropping oversized datagram: {e}");
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        if len > MAX_DATAGRAM_SIZE {
            debug!("dropping oversized datagram from {sender}");
            return Ok(None);
        }

        Ok(Some(Datagram {
            payload: self.buf[..len].to_vec(),
            sender,
        }))
    }
}

/// Returns `true` for OS timeout / would-block errors that should be retried.
fn is_timeout_error(e: &std::io::Error) -> bool {
    matches!(
        e.kind(),
        std::io::ErrorKind::WouldBlock | std::io::ErrorKind::TimedOut
    )
}

/// Returns `true` for the Windows "message too long" error (`WSAEMSGSIZE`).
fn is_oversize_error(e: &std::io::Error) -> bool {
    cfg!(target_os = "windows") && e.raw_os_error() == Some(10040)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
