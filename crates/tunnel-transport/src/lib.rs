//! # tunnel-transport
//!
//! Async I/O adapters for the tunnel data plane: a UDP socket tuned for
//! bulk datagram traffic talking to a single peer, and a TUN device split
//! into independent read/write halves.
//!
//! Neither adapter knows about encryption, framing, or cancellation —
//! those live in `tunnel-core` and `tunnel-engine` respectively. This
//! crate's job is strictly "move bytes in and out of the kernel."

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod tun;
pub mod udp;

pub use error::Error;
pub use tun::{TunReader, TunWriter, split_tun};
pub use udp::{UdpStats, UdpTransport};
