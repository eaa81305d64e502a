//! UDP→TUN: read one datagram, decode, refresh liveness, decrypt, write.

use std::sync::Arc;

use tokio::io::AsyncWrite;
use tokio::sync::Mutex;

use tunnel_core::{Decoded, Framer, Session};
use tunnel_transport::{TunWriter, UdpTransport};

use crate::cancellation::{CancelReason, CancellationToken};
use crate::keepalive::KeepaliveTx;

/// Runs until cancelled, a UDP recv fails, or a TUN write fails.
///
/// A TUN write failure is the one local-fatal condition spec.md
/// distinguishes from the rest: it exits this pump without cancelling
/// the session, since the UDP link and the egress direction may still be
/// healthy even though this side can no longer deliver decrypted
/// packets locally.
pub async fn run<W>(
    udp: Arc<UdpTransport>,
    mut tun_writer: TunWriter<W>,
    session: Arc<Mutex<dyn Session>>,
    cancel: CancellationToken,
    liveness_tx: KeepaliveTx,
    mtu: usize,
) where
    W: AsyncWrite + Unpin,
{
    let mut buf = vec![0u8; mtu];

    loop {
        if cancel.is_cancelled() {
            tracing::debug!("ingress pump exiting, session cancelled");
            return;
        }

        tokio::select! {
            biased;
            () = cancel.cancelled() => {
                tracing::debug!("ingress pump exiting, session cancelled");
                return;
            }
            received = udp.recv(&mut buf) => {
                let (n, from) = match received {
                    Ok(pair) => pair,
                    Err(err) => {
                        if cancel.is_cancelled() {
                            return;
                        }
                        tracing::error!(%err, "udp recv failed, cancelling session");
                        cancel.cancel_with_reason(CancelReason::PumpFailure(format!(
                            "udp recv failed: {err}"
                        )));
                        return;
                    }
                };

                match Framer::decode(&buf[..n]) {
                    Ok(Decoded::Keepalive) => {
                        liveness_tx.pulse();
                        tracing::info!(%from, "keep-alive: OK");
                    }
                    Ok(Decoded::Data { ciphertext, nonce }) => {
                        liveness_tx.pulse();
                        let mut session = session.lock().await;
                        match session.decrypt(ciphertext, nonce) {
                            Ok(plaintext) => {
                                drop(session);
                                if let Err(err) = tun_writer.write_packet(&plaintext).await {
                                    tracing::error!(%err, "tun write failed, ingress pump exiting");
                                    return;
                                }
                            }
                            Err(err) => {
                                tracing::warn!(%err, %from, "decrypt failed, dropping datagram");
                            }
                        }
                    }
                    Err(err) => {
                        tracing::warn!(%err, %from, "malformed inbound frame, dropping");
                    }
                }
            }
        }
    }
}
