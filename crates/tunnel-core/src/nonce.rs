//! The 96-bit monotonic nonce, split as `(high: u32, low: u64)`.
//!
//! The core never generates or reorders nonce values — the session adapter
//! owns the counter and hands back the value it used for a given
//! `encrypt` call. This module only knows how to move a nonce on and off
//! the wire.

/// Length of a nonce on the wire, in bytes.
pub const NONCE_LEN: usize = 12;

/// A 96-bit nonce, decomposed into the two halves the session contract uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Nonce {
    /// High 32 bits of the counter.
    pub high: u32,
    /// Low 64 bits of the counter.
    pub low: u64,
}

impl Nonce {
    /// Build a nonce from its two halves.
    #[must_use]
    pub fn new(high: u32, low: u64) -> Self {
        Self { high, low }
    }

    /// Encode as 12 bytes, big-endian: `high(4) || low(8)`.
    #[must_use]
    pub fn to_bytes(self) -> [u8; NONCE_LEN] {
        let mut out = [0u8; NONCE_LEN];
        out[0..4].copy_from_slice(&self.high.to_be_bytes());
        out[4..12].copy_from_slice(&self.low.to_be_bytes());
        out
    }

    /// Decode from a 12-byte big-endian slice.
    ///
    /// # Panics
    ///
    /// Panics if `bytes` is not exactly [`NONCE_LEN`] long. Callers are
    /// expected to have already validated datagram length via
    /// [`crate::framer::Framer::decode`].
    #[must_use]
    pub fn from_bytes(bytes: &[u8]) -> Self {
        assert_eq!(bytes.len(), NONCE_LEN, "nonce slice must be 12 bytes");
        let high = u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        let low = u64::from_be_bytes([
            bytes[4], bytes[5], bytes[6], bytes[7], bytes[8], bytes[9], bytes[10], bytes[11],
        ]);
        Self { high, low }
    }
}
