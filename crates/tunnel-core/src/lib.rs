//! # tunnel-core
//!
//! Wire framing, the session contract, and nonce/MTU arithmetic for an
//! encrypted point-to-point IP tunnel's data plane.
//!
//! This crate provides:
//! - **Framer**: on-wire datagram layout and keep-alive sentinel recognition
//! - **Session**: the trait a handshake/session-establishment layer must
//!   satisfy to plug into the forwarding engine (see `tunnel-engine`)
//! - **Nonce**: the 96-bit monotonic counter, split as `(u32, u64)`
//! - **Error**: the packet-level error taxonomy
//!
//! It has no knowledge of sockets, TUN devices, or tokio tasks — those
//! live in `tunnel-transport` and `tunnel-engine`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod framer;
pub mod nonce;
pub mod session;

pub use error::Error;
pub use framer::{AEAD_OVERHEAD, Decoded, Framer, TAG_LEN, max_plaintext};
pub use nonce::{NONCE_LEN, Nonce};
pub use session::Session;
