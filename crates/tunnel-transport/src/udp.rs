//! Async UDP transport: a bound socket tuned for bulk datagram traffic and
//! talking to a single fixed peer.
//!
//! The tunnel is point-to-point, so unlike a general-purpose transport this
//! adapter does not multiplex by peer address — it is constructed with the
//! one peer it will ever talk to and leaves it to the caller (the engine's
//! pumps) to decide what to do with datagrams that arrive from elsewhere.

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use socket2::{Domain, Protocol, Socket, Type};
use tokio::net::UdpSocket;

use crate::error::Error;

/// Send/recv buffer size requested from the kernel before handing the
/// socket to tokio. Large enough to absorb a scheduling hiccup on either
/// pump without the kernel dropping datagrams.
const SOCKET_BUFFER_BYTES: usize = 2 * 1024 * 1024;

/// Running counters for a [`UdpTransport`], useful for the watchdog and for
/// diagnostics. Cheap to clone; all fields are shared atomics.
#[derive(Debug, Default, Clone)]
pub struct UdpStats {
    datagrams_sent: Arc<AtomicU64>,
    datagrams_received: Arc<AtomicU64>,
    bytes_sent: Arc<AtomicU64>,
    bytes_received: Arc<AtomicU64>,
}

impl UdpStats {
    /// Total datagrams handed to the kernel for sending.
    pub fn datagrams_sent(&self) -> u64 {
        self.datagrams_sent.load(Ordering::Relaxed)
    }

    /// Total datagrams the kernel has delivered to us.
    pub fn datagrams_received(&self) -> u64 {
        self.datagrams_received.load(Ordering::Relaxed)
    }

    /// Total bytes sent, wire-frame size.
    pub fn bytes_sent(&self) -> u64 {
        self.bytes_sent.load(Ordering::Relaxed)
    }

    /// Total bytes received, wire-frame size.
    pub fn bytes_received(&self) -> u64 {
        self.bytes_received.load(Ordering::Relaxed)
    }
}

/// A UDP socket bound for a single peer, wrapped for async use.
pub struct UdpTransport {
    socket: UdpSocket,
    peer: SocketAddr,
    stats: UdpStats,
}

impl UdpTransport {
    /// Bind `local_addr` and prepare to talk to `peer`.
    ///
    /// The socket is created via `socket2` so the send/receive buffers can
    /// be widened before the descriptor is handed to tokio; `UdpSocket`
    /// itself has no API for that once constructed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Bind`] if the underlying socket cannot be created,
    /// configured, or bound.
    pub fn bind(local_addr: SocketAddr, peer: SocketAddr) -> Result<Self, Error> {
        let domain = if local_addr.is_ipv6() {
            Domain::IPV6
        } else {
            Domain::IPV4
        };

        let socket = Socket::new(domain, Type::DGRAM, Some(Protocol::UDP)).map_err(Error::Bind)?;
        socket.set_nonblocking(true).map_err(Error::Bind)?;
        socket
            .set_recv_buffer_size(SOCKET_BUFFER_BYTES)
            .map_err(Error::Bind)?;
        socket
            .set_send_buffer_size(SOCKET_BUFFER_BYTES)
            .map_err(Error::Bind)?;
        socket.bind(&local_addr.into()).map_err(Error::Bind)?;

        let std_socket: std::net::UdpSocket = socket.into();
        let socket = UdpSocket::from_std(std_socket).map_err(Error::Bind)?;

        Ok(Self {
            socket,
            peer,
            stats: UdpStats::default(),
        })
    }

    /// The address this socket is bound to.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Udp`] if the underlying socket cannot report its
    /// local address.
    pub fn local_addr(&self) -> Result<SocketAddr, Error> {
        self.socket.local_addr().map_err(Error::Udp)
    }

    /// The fixed peer this transport sends to.
    #[must_use]
    pub fn peer(&self) -> SocketAddr {
        self.peer
    }

    /// A cheaply cloneable handle to this transport's counters.
    #[must_use]
    pub fn stats(&self) -> UdpStats {
        self.stats.clone()
    }

    /// Send a wire datagram to the configured peer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Udp`] if the send syscall fails.
    pub async fn send(&self, datagram: &[u8]) -> Result<(), Error> {
        self.socket
            .send_to(datagram, self.peer)
            .await
            .map_err(Error::Udp)?;
        self.stats.datagrams_sent.fetch_add(1, Ordering::Relaxed);
        self.stats
            .bytes_sent
            .fetch_add(datagram.len() as u64, Ordering::Relaxed);
        Ok(())
    }

    /// Receive the next datagram into `buf`, returning its length and the
    /// address it actually arrived from.
    ///
    /// This is cancel-safe: it may be used as a branch of `tokio::select!`
    /// and dropping it before completion leaves the socket unharmed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Udp`] if the receive syscall fails.
    pub async fn recv(&self, buf: &mut [u8]) -> Result<(usize, SocketAddr), Error> {
        let (n, from) = self.socket.recv_from(buf).await.map_err(Error::Udp)?;
        self.stats.datagrams_received.fetch_add(1, Ordering::Relaxed);
        self.stats
            .bytes_received
            .fetch_add(n as u64, Ordering::Relaxed);
        Ok((n, from))
    }
}
