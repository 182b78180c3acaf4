use catalog_report::telemetry::{DEFAULT_LOG_FILTER, init_default_tracing, init_tracing};

#[test]
fn subscriber_installs_once() {
    assert!(DEFAULT_LOG_FILTER.starts_with("info"));

    let first = init_default_tracing();
    assert_eq!(first, cfg!(feature = "telemetry"));
    assert!(!init_tracing("debug"));
}
