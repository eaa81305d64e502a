//! Supervisor lifecycle: start, shutdown, and cancellation reporting.

mod support;

use std::time::Duration;

use tunnel_engine::{Error, SessionSupervisor, SupervisorOutcome, SupervisorState, TunnelConfig};
use tunnel_transport::split_tun;

use support::shared_session;

fn test_config() -> TunnelConfig {
    TunnelConfig {
        mtu: 1500,
        keepalive_interval: Duration::from_millis(30),
        watchdog_timeout: Duration::from_secs(5),
        ..TunnelConfig::default()
    }
}

#[tokio::test]
async fn explicit_shutdown_reports_shutdown_requested() {
    let (tun_client, _tun_server) = tokio::io::duplex(4096);
    let (tun_reader, tun_writer) = split_tun(tun_client);

    let mut supervisor = SessionSupervisor::new();
    assert_eq!(supervisor.state(), SupervisorState::Idle);

    let running = supervisor
        .start(tun_reader, tun_writer, shared_session([1u8; 32]), &test_config())
        .expect("binding an ephemeral loopback port must succeed");
    assert_eq!(supervisor.state(), SupervisorState::Running);

    running.shutdown();
    let outcome = tokio::time::timeout(Duration::from_secs(1), running.join())
        .await
        .expect("joined session should resolve promptly after shutdown");

    assert_eq!(outcome, SupervisorOutcome::ShutdownRequested);
}

#[tokio::test]
async fn pump_failure_reports_cancelled_with_reason() {
    let (tun_client, _tun_server) = tokio::io::duplex(4096);
    let (tun_reader, tun_writer) = split_tun(tun_client);

    let mut supervisor = SessionSupervisor::new();
    let running = supervisor
        .start(tun_reader, tun_writer, shared_session([2u8; 32]), &test_config())
        .expect("binding an ephemeral loopback port must succeed");

    // Stand in for a pump discovering a session-fatal I/O error: the
    // same cancellation path a real UDP send/recv failure would take.
    running
        .cancellation_token()
        .cancel_with_reason(tunnel_engine::CancelReason::PumpFailure(
            "udp send failed: simulated".to_string(),
        ));

    let outcome = tokio::time::timeout(Duration::from_secs(1), running.join())
        .await
        .expect("joined session should resolve after cancellation");

    assert_eq!(
        outcome,
        SupervisorOutcome::Cancelled {
            reason: "udp send failed: simulated".to_string()
        }
    );
}

#[tokio::test]
async fn watchdog_timeout_cancels_and_joins() {
    let config = TunnelConfig {
        mtu: 1500,
        keepalive_interval: Duration::from_secs(10),
        watchdog_timeout: Duration::from_millis(30),
        ..TunnelConfig::default()
    };

    let (tun_client, _tun_server) = tokio::io::duplex(4096);
    let (tun_reader, tun_writer) = split_tun(tun_client);

    let mut supervisor = SessionSupervisor::new();
    let running = supervisor
        .start(tun_reader, tun_writer, shared_session([3u8; 32]), &config)
        .expect("binding an ephemeral loopback port must succeed");

    let outcome = tokio::time::timeout(Duration::from_secs(2), running.join())
        .await
        .expect("watchdog should cancel the idle session and allow a join");

    assert!(matches!(outcome, SupervisorOutcome::Cancelled { .. }));
}

/// A local address already held by another socket must surface as
/// `Error::Transport`, not a panic, and leave the supervisor `Idle` so a
/// caller can retry with a different address.
#[tokio::test]
async fn start_surfaces_transport_bind_failure() {
    let held = std::net::UdpSocket::bind("127.0.0.1:0").expect("reserve a loopback port");
    let busy_addr = held.local_addr().expect("bound socket has a local address");

    let config = TunnelConfig {
        local_addr: busy_addr,
        ..test_config()
    };

    let (tun_client, _tun_server) = tokio::io::duplex(4096);
    let (tun_reader, tun_writer) = split_tun(tun_client);

    let mut supervisor = SessionSupervisor::new();
    let err = supervisor
        .start(tun_reader, tun_writer, shared_session([9u8; 32]), &config)
        .expect_err("binding an address already in use must fail");

    assert!(matches!(err, Error::Transport(_)));
    assert_eq!(supervisor.state(), SupervisorState::Idle);

    drop(held);
}
