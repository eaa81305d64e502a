//! Shared fixtures for the engine's integration tests.
//!
//! `LoopbackSession` is the same insecure XOR stand-in `tunnel-core`
//! keeps under `#[cfg(test)]` for its own unit tests — that one is
//! private to its crate's test build, so the engine's `tests/` binaries
//! need their own copy to exercise the pumps end to end without a real
//! AEAD dependency.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::sync::Mutex;

use tunnel_core::{Error, Nonce, Session};
use tunnel_transport::UdpTransport;

/// An insecure, deterministic stand-in for a real AEAD session. Two
/// instances built from the same key decrypt what the other encrypts.
/// Never use outside tests.
pub struct LoopbackSession {
    key: [u8; 32],
    send_counter: u64,
}

impl LoopbackSession {
    #[allow(dead_code)]
    pub fn new(key: [u8; 32]) -> Self {
        Self {
            key,
            send_counter: 0,
        }
    }

    fn xor(&self, data: &[u8]) -> Vec<u8> {
        data.iter()
            .enumerate()
            .map(|(i, b)| b ^ self.key[i % self.key.len()])
            .collect()
    }
}

impl Session for LoopbackSession {
    fn encrypt(&mut self, plaintext: &[u8]) -> Result<(Vec<u8>, Nonce), Error> {
        let nonce = Nonce::new(0, self.send_counter);
        self.send_counter += 1;
        let mut out = self.xor(plaintext);
        out.extend_from_slice(&[0u8; 16]);
        Ok((out, nonce))
    }

    fn decrypt(&mut self, ciphertext: &[u8], _nonce: Nonce) -> Result<Vec<u8>, Error> {
        if ciphertext.len() < 16 {
            return Err(Error::AuthFailure);
        }
        let (body, tag) = ciphertext.split_at(ciphertext.len() - 16);
        if tag != [0u8; 16] {
            return Err(Error::AuthFailure);
        }
        Ok(self.xor(body))
    }
}

#[allow(dead_code)]
pub fn shared_session(key: [u8; 32]) -> Arc<Mutex<dyn Session>> {
    Arc::new(Mutex::new(LoopbackSession::new(key)))
}

/// Bind a connected pair of UDP transports on loopback.
///
/// Two free ports are reserved with a throwaway std socket each (closed
/// immediately after) so both final addresses are known before either
/// `UdpTransport` — which fixes its peer at construction — is built.
#[allow(dead_code)]
pub fn bind_udp_pair() -> (UdpTransport, UdpTransport) {
    let addr_a = reserve_loopback_port();
    let addr_b = reserve_loopback_port();

    let side_a = UdpTransport::bind(addr_a, addr_b).unwrap();
    let side_b = UdpTransport::bind(addr_b, addr_a).unwrap();
    (side_a, side_b)
}

fn reserve_loopback_port() -> SocketAddr {
    let socket = std::net::UdpSocket::bind("127.0.0.1:0").unwrap();
    socket.local_addr().unwrap()
}
