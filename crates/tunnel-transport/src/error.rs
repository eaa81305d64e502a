//! Transport-layer errors.

use thiserror::Error;

/// Errors from the UDP socket or TUN device adapters.
#[derive(Debug, Error)]
pub enum Error {
    /// Binding the UDP socket failed.
    #[error("failed to bind UDP socket: {0}")]
    Bind(#[source] std::io::Error),

    /// A send or receive syscall failed.
    #[error("UDP I/O error: {0}")]
    Udp(#[source] std::io::Error),

    /// A TUN read or write failed.
    #[error("TUN I/O error: {0}")]
    Tun(#[source] std::io::Error),
}
