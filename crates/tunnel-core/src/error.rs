//! Error taxonomy for the tunnel wire format and session contract.

use thiserror::Error;

/// Packet-level and session-contract errors.
///
/// None of these are fatal to a session on their own — the pumps decide,
/// per spec, whether a given variant warrants cancellation.
#[derive(Debug, Error)]
pub enum Error {
    /// Datagram too short to contain a nonce and authentication tag.
    #[error("malformed frame: expected at least {expected} bytes, got {actual}")]
    MalformedFrame {
        /// Minimum legal datagram length (nonce + tag).
        expected: usize,
        /// Actual datagram length received.
        actual: usize,
    },

    /// AEAD authentication failed on decrypt.
    #[error("authentication failure")]
    AuthFailure,

    /// The session's encryptor rejected the plaintext.
    #[error("encryption failed: {0}")]
    Encrypt(String),

    /// The session's nonce counter is exhausted.
    #[error("nonce counter exhausted")]
    NonceExhausted,
}
