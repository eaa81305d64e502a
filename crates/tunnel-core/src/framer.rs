//! On-wire framing: `ciphertext || nonce12`, plus the keep-alive sentinel.
//!
//! Encoding and recognition of the keep-alive datagram live here so there
//! is exactly one source of truth for what a peer sends instead of data.

use crate::error::Error;
use crate::nonce::{NONCE_LEN, Nonce};

/// Authentication tag length added by the AEAD (both ChaCha20-Poly1305 and
/// AES-256-GCM use a 128-bit tag).
pub const TAG_LEN: usize = 16;

/// Total bytes the AEAD framing adds on top of plaintext: nonce + tag.
pub const AEAD_OVERHEAD: usize = NONCE_LEN + TAG_LEN;

/// Fixed keep-alive datagram. Shorter than any legal data datagram
/// (minimum legal datagram is `AEAD_OVERHEAD` = 28 bytes for zero-length
/// plaintext), so length alone would disambiguate it, but recognition is
/// always by exact byte equality to avoid relying on that coincidence.
pub const KEEPALIVE_SENTINEL: [u8; 4] = [0xA5, 0x00, 0x00, 0xFF];

/// Given the configured MTU, the largest plaintext that may be handed to
/// `Session::encrypt`.
#[must_use]
pub fn max_plaintext(mtu: usize) -> usize {
    mtu.saturating_sub(AEAD_OVERHEAD)
}

/// A decoded inbound datagram.
#[derive(Debug)]
pub enum Decoded<'a> {
    /// The peer's keep-alive sentinel; carries no payload.
    Keepalive,
    /// A data datagram: ciphertext (zero-copy, borrowed) and its nonce.
    Data {
        /// The AEAD ciphertext, including its authentication tag.
        ciphertext: &'a [u8],
        /// The nonce the sender used for this datagram.
        nonce: Nonce,
    },
}

impl Decoded<'_> {
    /// True if this datagram was the keep-alive sentinel.
    #[must_use]
    pub fn is_keepalive(&self) -> bool {
        matches!(self, Decoded::Keepalive)
    }
}

/// Converts between `(nonce, ciphertext)` and an on-wire datagram.
pub struct Framer;

impl Framer {
    /// Build a wire datagram: `ciphertext || nonce12`.
    ///
    /// Pure and infallible for in-range inputs — this never fails because
    /// it makes no claim about ciphertext length beyond "cheap to concatenate".
    #[must_use]
    pub fn encode(ciphertext: &[u8], nonce: Nonce) -> Vec<u8> {
        let mut out = Vec::with_capacity(ciphertext.len() + NONCE_LEN);
        out.extend_from_slice(ciphertext);
        out.extend_from_slice(&nonce.to_bytes());
        out
    }

    /// The fixed keep-alive datagram.
    #[must_use]
    pub fn keepalive_datagram() -> &'static [u8] {
        &KEEPALIVE_SENTINEL
    }

    /// Parse an inbound datagram.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedFrame`] when `datagram` is shorter than
    /// [`AEAD_OVERHEAD`] and is not the keep-alive sentinel.
    pub fn decode(datagram: &[u8]) -> Result<Decoded<'_>, Error> {
        if datagram == KEEPALIVE_SENTINEL {
            return Ok(Decoded::Keepalive);
        }

        if datagram.len() < AEAD_OVERHEAD {
            return Err(Error::MalformedFrame {
                expected: AEAD_OVERHEAD,
                actual: datagram.len(),
            });
        }

        let split = datagram.len() - NONCE_LEN;
        let (ciphertext, nonce_bytes) = datagram.split_at(split);

        Ok(Decoded::Data {
            ciphertext,
            nonce: Nonce::from_bytes(nonce_bytes),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_decode_roundtrip() {
        let ct = b"some ciphertext and a tag-------";
        let nonce = Nonce::new(7, 42);
        let datagram = Framer::encode(ct, nonce);

        match Framer::decode(&datagram).unwrap() {
            Decoded::Data {
                ciphertext,
                nonce: got,
            } => {
                assert_eq!(ciphertext, ct);
                assert_eq!(got, nonce);
            }
            Decoded::Keepalive => panic!("expected data frame"),
        }
    }

    #[test]
    fn keepalive_detected_by_value() {
        let decoded = Framer::decode(Framer::keepalive_datagram()).unwrap();
        assert!(decoded.is_keepalive());
    }

    #[test]
    fn malformed_when_too_short() {
        let short = vec![0u8; AEAD_OVERHEAD - 1];
        let err = Framer::decode(&short).unwrap_err();
        assert!(matches!(
            err,
            Error::MalformedFrame {
                expected: AEAD_OVERHEAD,
                ..
            }
        ));
    }

    #[test]
    fn minimum_legal_datagram_is_accepted() {
        let datagram = vec![0u8; AEAD_OVERHEAD];
        assert!(Framer::decode(&datagram).is_ok());
    }

    #[test]
    fn max_plaintext_accounts_for_overhead() {
        assert_eq!(max_plaintext(1500), 1500 - AEAD_OVERHEAD);
        assert_eq!(max_plaintext(10), 0); // saturates, never underflows
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_decode_never_panics(data in prop::collection::vec(any::<u8>(), 0..2048)) {
                let _ = Framer::decode(&data);
            }

            #[test]
            fn prop_roundtrip_preserves_ciphertext_and_nonce(
                ciphertext in prop::collection::vec(any::<u8>(), 16..512),
                high in any::<u32>(),
                low in any::<u64>(),
            ) {
                let nonce = Nonce::new(high, low);
                let datagram = Framer::encode(&ciphertext, nonce);
                match Framer::decode(&datagram).unwrap() {
                    Decoded::Data { ciphertext: ct, nonce: n } => {
                        prop_assert_eq!(ct, ciphertext.as_slice());
                        prop_assert_eq!(n, nonce);
                    }
                    Decoded::Keepalive => prop_assert!(false, "unexpected keepalive"),
                }
            }

            #[test]
            fn prop_keepalive_never_mistaken_for_data(
                ciphertext in prop::collection::vec(any::<u8>(), 16..512),
                high in any::<u32>(),
                low in any::<u64>(),
            ) {
                let nonce = Nonce::new(high, low);
                let datagram = Framer::encode(&ciphertext, nonce);
                prop_assert_ne!(datagram.as_slice(), Framer::keepalive_datagram());
            }
        }
    }
}
