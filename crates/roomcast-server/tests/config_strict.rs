#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use roomcast_server::config;

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
server:
  listen: "0.0.0.0:8080"
relay:
  outbound_queuee: 128 # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "INVALID_CONFIG");
}

#[test]
fn ok_minimal_config() {
    let ok = r#"
version: 1
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.server.listen, "0.0.0.0:8080");
    assert_eq!(cfg.relay.outbound_queue, 256);
    assert_eq!(cfg.relay.max_frame_bytes, 4096);
}

#[test]
fn rejects_unsupported_version() {
    let bad = r#"
version: 2
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert!(err.to_string().contains("version"));
}

#[test]
fn rejects_out_of_range_ping() {
    let bad = r#"
version: 1
server:
  ping_interval_ms: 100
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "INVALID_CONFIG");
}

#[test]
fn idle_timeout_must_exceed_ping_interval() {
    let bad = r#"
version: 1
server:
  ping_interval_ms: 30000
  idle_timeout_ms: 30000
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert!(err.to_string().contains("idle_timeout_ms"));
}

#[test]
fn rejects_tiny_frame_cap() {
    let bad = r#"
version: 1
relay:
  max_frame_bytes: 16
"#;
    assert!(config::load_from_str(bad).is_err());
}
