//! Log setup for the report server.
//!
//! Library code only emits `tracing` events. The binary installs a subscriber
//! through `init_default_tracing`; embedders can wire their own instead.

/// Filter used when `RUST_LOG` is unset: report events at `info`, HTTP stack noise muted.
pub const DEFAULT_LOG_FILTER: &str = "info,hyper=warn,tower=warn";

/// Installs a compact fmt subscriber filtered by `RUST_LOG`, falling back to
/// [`DEFAULT_LOG_FILTER`].
///
/// Returns `false` when the `telemetry` feature is off or another global
/// subscriber is already installed.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing(DEFAULT_LOG_FILTER)
}

/// Same as [`init_default_tracing`] with a caller-chosen fallback filter.
#[must_use]
pub fn init_tracing(fallback_filter: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback_filter));

        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_thread_ids(true)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = fallback_filter;
        false
    }
}
