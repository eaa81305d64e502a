//! The already-parsed configuration record the supervisor consumes.
//!
//! Loading this from a file, CLI flags, or a handshake reply is the
//! embedder's job; the engine only ever sees the finished record.

use std::net::SocketAddr;
use std::time::Duration;

/// Tunable parameters for one tunnel session.
#[derive(Debug, Clone)]
pub struct TunnelConfig {
    /// The link MTU. Bounds the largest plaintext handed to the session:
    /// see [`tunnel_core::max_plaintext`].
    pub mtu: usize,
    /// The local UDP address to bind.
    pub local_addr: SocketAddr,
    /// The fixed peer this session forwards to.
    pub peer: SocketAddr,
    /// Interval between keep-alive ticks when the TUN side is idle.
    pub keepalive_interval: Duration,
    /// Maximum time without any inbound signal (data or keep-alive)
    /// before the watchdog cancels the session.
    pub watchdog_timeout: Duration,
}

impl Default for TunnelConfig {
    fn default() -> Self {
        Self {
            mtu: 1500,
            local_addr: "0.0.0.0:0".parse().expect("valid socket address"),
            peer: "0.0.0.0:0".parse().expect("valid socket address"),
            keepalive_interval: Duration::from_secs(10),
            watchdog_timeout: Duration::from_secs(30),
        }
    }
}
