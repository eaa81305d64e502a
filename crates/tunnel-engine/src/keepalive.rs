//! Single-slot, lossy, non-blocking signalling.
//!
//! Used for both directions the data model calls out: the keep-alive
//! timer pulses a [`KeepaliveTx`] the egress pump observes, and the
//! ingress pump pulses a second, independent pair to refresh the
//! watchdog's liveness signal. Neither role needs the ordering or
//! capacity of an mpsc channel — only "has something happened since I
//! last looked."

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::Notify;

struct Slot {
    pending: AtomicBool,
    notify: Notify,
}

/// The sending half of a single-slot signal.
#[derive(Clone)]
pub struct KeepaliveTx(Arc<Slot>);

/// The receiving half of a single-slot signal.
#[derive(Clone)]
pub struct KeepaliveRx(Arc<Slot>);

/// Construct a connected sender/receiver pair, slot initially empty.
#[must_use]
pub fn keepalive_channel() -> (KeepaliveTx, KeepaliveRx) {
    let slot = Arc::new(Slot {
        pending: AtomicBool::new(false),
        notify: Notify::new(),
    });
    (KeepaliveTx(slot.clone()), KeepaliveRx(slot))
}

impl KeepaliveTx {
    /// Fill the slot and wake a waiting receiver.
    ///
    /// Returns `true` if the slot was empty and this pulse was recorded,
    /// or `false` if a previous pulse was still unconsumed and this one
    /// was dropped. Never blocks.
    pub fn pulse(&self) -> bool {
        let was_pending = self.0.pending.swap(true, Ordering::AcqRel);
        self.0.notify.notify_one();
        !was_pending
    }
}

impl KeepaliveRx {
    /// Resolves once a pulse is available, consuming it.
    ///
    /// Cancel-safe: usable as a `tokio::select!` branch. If the task
    /// owning this future is dropped before it resolves, no pulse is
    /// lost — the slot's flag is untouched until a pulse is actually
    /// taken.
    pub async fn recv(&self) {
        loop {
            let notified = self.0.notify.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            if self.0.pending.swap(false, Ordering::AcqRel) {
                return;
            }

            notified.await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn pulse_then_recv_delivers_immediately() {
        let (tx, rx) = keepalive_channel();
        assert!(tx.pulse());

        tokio::time::timeout(std::time::Duration::from_millis(50), rx.recv())
            .await
            .expect("recv should not block when a pulse is pending");
    }

    #[tokio::test]
    async fn second_pulse_before_consume_is_dropped() {
        let (tx, _rx) = keepalive_channel();
        assert!(tx.pulse());
        assert!(!tx.pulse(), "slot already full, second pulse should be dropped");
    }

    #[tokio::test]
    async fn recv_wakes_on_a_later_pulse() {
        let (tx, rx) = keepalive_channel();
        let handle = tokio::spawn(async move {
            rx.recv().await;
        });

        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        tx.pulse();

        tokio::time::timeout(std::time::Duration::from_millis(100), handle)
            .await
            .expect("recv should wake once pulsed")
            .unwrap();
    }
}
