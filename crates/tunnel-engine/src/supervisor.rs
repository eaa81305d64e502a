//! Owns one session's lifecycle: spawn the pumps and timers, tear down on
//! cancellation, report back so an outer reconnect loop can decide what
//! to do next.

use std::sync::Arc;

use tokio::io::{AsyncRead, AsyncWrite};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use tunnel_core::{Session, max_plaintext};
use tunnel_transport::{TunReader, TunWriter, UdpTransport};

use crate::cancellation::{CancelReason, CancellationToken};
use crate::config::TunnelConfig;
use crate::error::Error;
use crate::keepalive::keepalive_channel;
use crate::pump;
use crate::timers;

/// Why a joined session ended, so the caller can decide whether to
/// reconnect or stop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SupervisorOutcome {
    /// A pump hit a session-fatal error; the caller should re-establish
    /// a handshake and start a new session if desired.
    Cancelled {
        /// What went wrong, for logging.
        reason: String,
    },
    /// [`RunningSession::shutdown`] was called; no automatic reconnect is
    /// implied.
    ShutdownRequested,
}

/// The supervisor's lifecycle state. `start` may only be called from
/// `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupervisorState {
    /// No session has been started yet.
    Idle,
    /// Pumps and timers are spawned and running.
    Running,
    /// The cancellation token has been set; tasks are winding down.
    Cancelled,
    /// All spawned tasks have been joined.
    Joined,
}

/// Spawns and tears down the tasks that make up one tunnel session.
pub struct SessionSupervisor {
    state: SupervisorState,
}

impl SessionSupervisor {
    /// A supervisor with no session started.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: SupervisorState::Idle,
        }
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> SupervisorState {
        self.state
    }

    /// Bind the session's UDP socket and start it: spawn the egress pump,
    /// ingress pump, keep-alive timer, and watchdog as independent tokio
    /// tasks sharing one cancellation token.
    ///
    /// `session` is wrapped in a mutex rather than split into send/recv
    /// halves: `tunnel_core::Session` models the AEAD as a single opaque
    /// handle (matching how the handshake layer hands it over), so the
    /// engine serialises the two pumps' access to it instead of asking
    /// the session trait to pre-split state it does not otherwise need
    /// to expose.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`] if `config.local_addr` cannot be
    /// bound. The supervisor's state is left at `Idle` on failure, so a
    /// caller may retry with a different address.
    ///
    /// # Panics
    ///
    /// Panics if called while a session is already running; callers must
    /// join the previous [`RunningSession`] (or let it complete) first.
    pub fn start<T, W>(
        &mut self,
        tun_reader: TunReader<T>,
        tun_writer: TunWriter<W>,
        session: Arc<Mutex<dyn Session>>,
        config: &TunnelConfig,
    ) -> Result<RunningSession, Error>
    where
        T: AsyncRead + Unpin + Send + 'static,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        assert_eq!(
            self.state,
            SupervisorState::Idle,
            "start() called while a session is already running"
        );

        let udp = Arc::new(UdpTransport::bind(config.local_addr, config.peer)?);

        let cancel = CancellationToken::new();
        let (keepalive_tx, keepalive_rx) = keepalive_channel();
        let (liveness_tx, liveness_rx) = keepalive_channel();
        let max_plaintext = max_plaintext(config.mtu);

        let egress = tokio::spawn(pump::egress::run(
            tun_reader,
            udp.clone(),
            session.clone(),
            cancel.clone(),
            keepalive_rx,
            config.mtu,
            max_plaintext,
        ));
        let ingress = tokio::spawn(pump::ingress::run(
            udp,
            tun_writer,
            session,
            cancel.clone(),
            liveness_tx,
            config.mtu,
        ));
        let keepalive_timer = tokio::spawn(timers::keepalive_timer(
            keepalive_tx,
            cancel.clone(),
            config.keepalive_interval,
        ));
        let watchdog = tokio::spawn(timers::watchdog(
            liveness_rx,
            cancel.clone(),
            config.watchdog_timeout,
        ));

        self.state = SupervisorState::Running;

        Ok(RunningSession {
            cancel,
            egress,
            ingress,
            keepalive_timer,
            watchdog,
        })
    }
}

impl Default for SessionSupervisor {
    fn default() -> Self {
        Self::new()
    }
}

/// A handle to one started session's tasks.
pub struct RunningSession {
    cancel: CancellationToken,
    egress: JoinHandle<()>,
    ingress: JoinHandle<()>,
    keepalive_timer: JoinHandle<()>,
    watchdog: JoinHandle<()>,
}

impl RunningSession {
    /// The shared cancellation token, for callers that need to observe
    /// or trigger cancellation without waiting on [`Self::join`].
    #[must_use]
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Ask the session to stop. Idempotent; safe to call even if a pump
    /// already cancelled on its own.
    pub fn shutdown(&self) {
        self.cancel.cancel_with_reason(CancelReason::Shutdown);
    }

    /// Wait for every spawned task to finish and report why.
    ///
    /// Note this only resolves once *all four* tasks have exited. A
    /// single pump exiting on its own local-fatal error (TUN write
    /// failure in ingress, TUN read failure in egress) does not, by
    /// itself, cancel the other three — the session keeps running in a
    /// degraded state until an outer driver calls [`Self::shutdown`] or
    /// a session-fatal error (UDP send/recv failure, watchdog timeout)
    /// cancels everything.
    pub async fn join(self) -> SupervisorOutcome {
        let _ = self.egress.await;
        let _ = self.ingress.await;
        let _ = self.keepalive_timer.await;
        let _ = self.watchdog.await;

        match self.cancel.reason() {
            Some(CancelReason::PumpFailure(reason)) => SupervisorOutcome::Cancelled { reason },
            Some(CancelReason::Shutdown) | None => SupervisorOutcome::ShutdownRequested,
        }
    }
}
