//! Engine-level errors.

use thiserror::Error;

/// Errors the engine's public API can return. Packet-level errors
/// (malformed frames, auth failures) never reach this type — they are
/// logged and discarded inside the pumps per the failure semantics
/// table. Pump-local fatal conditions (a UDP send/recv failure, a TUN
/// write failure) are likewise kept internal to the session: they flip
/// the shared cancellation token and surface through
/// [`crate::SupervisorOutcome`] once the session is joined, not through
/// this type. What's left here is the one condition a caller can hit
/// before a session exists at all.
#[derive(Debug, Error)]
pub enum Error {
    /// [`SessionSupervisor::start`](crate::SessionSupervisor::start)
    /// could not bind the configured local address.
    #[error(transparent)]
    Transport(#[from] tunnel_transport::Error),
}
