//! TUN→UDP: read one IP packet, encrypt, frame, send.

use std::sync::Arc;

use tokio::io::AsyncRead;
use tokio::sync::Mutex;

use tunnel_core::{Framer, Session};
use tunnel_transport::{TunReader, UdpTransport};

use crate::cancellation::{CancelReason, CancellationToken};
use crate::keepalive::KeepaliveRx;

/// Runs until cancelled, a UDP send fails, or the TUN read itself fails.
///
/// A TUN read failure exits this pump alone rather than cancelling the
/// whole session — symmetric to the ingress pump's TUN-write-fatal case,
/// since a broken local interface on one side says nothing about whether
/// the peer is still reachable on the other.
pub async fn run<T>(
    mut tun_reader: TunReader<T>,
    udp: Arc<UdpTransport>,
    session: Arc<Mutex<dyn Session>>,
    cancel: CancellationToken,
    keepalive_rx: KeepaliveRx,
    mtu: usize,
    max_plaintext: usize,
) where
    T: AsyncRead + Unpin,
{
    // Sized to the full MTU, not `max_plaintext`: a read can never return
    // more than the buffer length, so a buffer already capped at
    // `max_plaintext` would silently truncate an oversize packet instead
    // of letting the length check below see and drop it.
    let mut buf = vec![0u8; mtu.max(1)];

    loop {
        if cancel.is_cancelled() {
            tracing::debug!("egress pump exiting, session cancelled");
            return;
        }

        tokio::select! {
            biased;
            () = cancel.cancelled() => {
                tracing::debug!("egress pump exiting, session cancelled");
                return;
            }
            () = keepalive_rx.recv() => {
                match udp.send(Framer::keepalive_datagram()).await {
                    Ok(()) => tracing::info!("keep-alive sent"),
                    Err(err) => {
                        tracing::error!(%err, "keep-alive send failed, cancelling session");
                        cancel.cancel_with_reason(CancelReason::PumpFailure(format!(
                            "udp send failed: {err}"
                        )));
                        return;
                    }
                }
            }
            read = tun_reader.read_packet(&mut buf) => {
                match read {
                    Ok(n) if n > max_plaintext => {
                        tracing::warn!(n, max_plaintext, "oversize TUN read dropped");
                    }
                    Ok(n) => {
                        let mut session = session.lock().await;
                        match session.encrypt(&buf[..n]) {
                            Ok((ciphertext, nonce)) => {
                                drop(session);
                                let datagram = Framer::encode(&ciphertext, nonce);
                                if let Err(err) = udp.send(&datagram).await {
                                    tracing::error!(%err, "udp send failed, cancelling session");
                                    cancel.cancel_with_reason(CancelReason::PumpFailure(format!(
                                        "udp send failed: {err}"
                                    )));
                                    return;
                                }
                            }
                            Err(err) => {
                                tracing::warn!(%err, "encrypt failed, dropping packet");
                            }
                        }
                    }
                    Err(err) => {
                        tracing::error!(%err, "tun read failed, egress pump exiting");
                        return;
                    }
                }
            }
        }
    }
}
