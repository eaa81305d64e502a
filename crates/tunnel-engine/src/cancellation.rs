//! A shared, idempotent cancellation signal both pumps observe.
//!
//! The teacher does not depend on `tokio-util`, so rather than pull it in
//! for a single type this builds the same shape directly on
//! `tokio::sync::Notify`: an `AtomicBool` for the fast-path check plus a
//! `Notify` so waiters in a `tokio::select!` branch wake promptly instead
//! of polling.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::Notify;

/// Why a session was cancelled, carried through to the supervisor's
/// outcome so an outer reconnect loop can tell a dead link from a
/// deliberate shutdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CancelReason {
    /// The outer driver asked the session to stop.
    Shutdown,
    /// A pump hit a session-fatal error and cancelled on its own.
    PumpFailure(String),
}

struct Inner {
    flag: AtomicBool,
    notify: Notify,
    reason: Mutex<Option<CancelReason>>,
}

/// A cloneable handle to one session's cancellation flag.
#[derive(Clone)]
pub struct CancellationToken(Arc<Inner>);

impl CancellationToken {
    /// Create a fresh, uncancelled token.
    #[must_use]
    pub fn new() -> Self {
        Self(Arc::new(Inner {
            flag: AtomicBool::new(false),
            notify: Notify::new(),
            reason: Mutex::new(None),
        }))
    }

    /// True once [`Self::cancel`] or [`Self::cancel_with_reason`] has been
    /// called at least once.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.flag.load(Ordering::SeqCst)
    }

    /// Cancel with [`CancelReason::Shutdown`]. Idempotent.
    pub fn cancel(&self) {
        self.cancel_with_reason(CancelReason::Shutdown);
    }

    /// Cancel, recording `reason` if no reason has been recorded yet.
    /// The first caller to cancel a token wins the reason; later callers
    /// still observe the flag flip but do not overwrite why.
    pub fn cancel_with_reason(&self, reason: CancelReason) {
        {
            let mut guard = self.0.reason.lock().expect("cancellation reason mutex poisoned");
            if guard.is_none() {
                *guard = Some(reason);
            }
        }
        self.0.flag.store(true, Ordering::SeqCst);
        self.0.notify.notify_waiters();
    }

    /// The recorded cancellation reason, if cancelled.
    #[must_use]
    pub fn reason(&self) -> Option<CancelReason> {
        self.0
            .reason
            .lock()
            .expect("cancellation reason mutex poisoned")
            .clone()
    }

    /// Resolves once the token is cancelled. Race-free: registers for a
    /// wakeup before re-checking the flag, so a cancellation that lands
    /// between the initial check and the await is never missed.
    pub async fn cancelled(&self) {
        if self.is_cancelled() {
            return;
        }
        let notified = self.0.notify.notified();
        tokio::pin!(notified);
        notified.as_mut().enable();
        if self.is_cancelled() {
            return;
        }
        notified.await;
    }
}

impl Default for CancellationToken {
    fn default() -> Self {
        Self::new()
    }
}
