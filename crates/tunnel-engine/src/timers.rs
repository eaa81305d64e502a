//! The two lightweight execution contexts besides the pumps: the
//! keep-alive ticker and the liveness watchdog.

use std::time::Duration;

use crate::cancellation::{CancelReason, CancellationToken};
use crate::keepalive::{KeepaliveRx, KeepaliveTx};

/// Ticks at `interval`, pulsing `tx` on every tick. A dropped tick (the
/// previous one not yet consumed by the egress pump) is logged at debug
/// and otherwise ignored — spec requires lossy signalling, not delivery.
pub async fn keepalive_timer(tx: KeepaliveTx, cancel: CancellationToken, interval: Duration) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => {
                tracing::debug!("keep-alive timer stopping");
                return;
            }
            _ = ticker.tick() => {
                if !tx.pulse() {
                    tracing::debug!("keep-alive tick dropped, previous tick not yet sent");
                }
            }
        }
    }
}

/// Cancels the session if no liveness pulse (data or keep-alive) arrives
/// from the ingress pump within `timeout`. Spec.md calls this monitor
/// optional; the engine always runs one, since a session with no liveness
/// supervision can wedge silently on a dead peer.
pub async fn watchdog(rx: KeepaliveRx, cancel: CancellationToken, timeout: Duration) {
    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => {
                tracing::debug!("watchdog stopping");
                return;
            }
            result = tokio::time::timeout(timeout, rx.recv()) => {
                if result.is_err() {
                    tracing::error!(?timeout, "no liveness signal within watchdog window, cancelling session");
                    cancel.cancel_with_reason(CancelReason::PumpFailure(
                        "watchdog timeout: no inbound traffic".to_string(),
                    ));
                    return;
                }
                tracing::trace!("liveness refreshed");
            }
        }
    }
}
