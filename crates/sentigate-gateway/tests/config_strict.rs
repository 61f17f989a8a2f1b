#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use sentigate_gateway::config;

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
model:
  host: "models.internal"
  timeout_mz: 5000 # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "BAD_REQUEST");
}

#[test]
fn ok_minimal_config_with_defaults() {
    let cfg = config::load_from_str("version: 1\n").expect("must parse");
    assert_eq!(cfg.gateway.listen, "0.0.0.0:8080");
    assert_eq!(cfg.gateway.release, "v1");
    assert_eq!(cfg.model.port, 5000);
    assert_eq!(cfg.lifecycle.window_horizon_secs, 604800);
    assert_eq!(cfg.lifecycle.window_capacity, 1000);
    assert!(cfg.lifecycle.count_duplicate_verifications);
}

#[test]
fn version_must_be_one() {
    let err = config::load_from_str("version: 2\n").expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "BAD_REQUEST");
}

#[test]
fn model_timeout_range_enforced() {
    let bad = r#"
version: 1
model:
  timeout_ms: 500
"#;
    assert!(config::load_from_str(bad).is_err());
}

#[test]
fn zero_window_capacity_rejected() {
    let bad = r#"
version: 1
lifecycle:
  window_capacity: 0
"#;
    assert!(config::load_from_str(bad).is_err());
}

#[test]
fn full_config_parses() {
    let ok = r#"
version: 1
gateway:
  listen: "127.0.0.1:9090"
  release: "v2"
model:
  host: "http://models.internal"
  port: 5001
  timeout_ms: 2000
lifecycle:
  window_horizon_secs: 3600
  window_capacity: 50
  count_duplicate_verifications: false
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert_eq!(cfg.gateway.release, "v2");
    assert_eq!(cfg.model.host, "http://models.internal");
    assert!(!cfg.lifecycle.count_duplicate_verifications);
}
