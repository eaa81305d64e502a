//! The session contract the core assumes the handshake layer provides.
//!
//! `Session` is deliberately thin: the core does not know or care how a
//! session derives keys, whether it rekeys, or whether it enforces replay
//! protection on receive — those are properties of whatever implements
//! this trait, established by a handshake subsystem this crate does not
//! define.

use crate::Nonce;
use crate::error::Error;

/// An established, keyed AEAD session.
///
/// Implementations must never reuse a `(high, low)` nonce pair under the
/// same key. `encrypt` increments an internal send counter exactly once
/// per successful call and returns the value it used; the core re-hands
/// that value to the peer verbatim and never interprets it.
pub trait Session: Send {
    /// Seal `plaintext`, returning the ciphertext (with authentication
    /// tag) and the nonce consumed for this call.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Encrypt`] on AEAD failure or
    /// [`Error::NonceExhausted`] if the send counter is exhausted.
    fn encrypt(&mut self, plaintext: &[u8]) -> Result<(Vec<u8>, Nonce), Error>;

    /// Open `ciphertext` using the given nonce, supplied by the peer.
    ///
    /// The nonce is not validated against any local counter here — replay
    /// protection, if required, is the session implementation's job.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AuthFailure`] if authentication fails.
    fn decrypt(&mut self, ciphertext: &[u8], nonce: Nonce) -> Result<Vec<u8>, Error>;
}
