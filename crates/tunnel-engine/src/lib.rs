//! # tunnel-engine
//!
//! The forwarding engine for an encrypted point-to-point IP tunnel: the
//! egress (TUN→UDP) and ingress (UDP→TUN) pumps, single-slot keep-alive
//! signalling, a watchdog that cancels a silent session, and the
//! supervisor that spawns and tears all of it down.
//!
//! This crate owns no cryptography — it drives whatever
//! `tunnel_core::Session` the handshake layer hands it — and no TUN
//! device creation — it drives whatever `tunnel_transport` split handle
//! the embedder hands it.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cancellation;
pub mod config;
pub mod error;
pub mod keepalive;
pub mod pump;
pub mod supervisor;
pub mod timers;

pub use cancellation::{CancelReason, CancellationToken};
pub use config::TunnelConfig;
pub use error::Error;
pub use keepalive::{KeepaliveRx, KeepaliveTx, keepalive_channel};
pub use supervisor::{RunningSession, SessionSupervisor, SupervisorOutcome, SupervisorState};
