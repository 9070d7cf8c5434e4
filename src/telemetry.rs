//! Opt-in `tracing` setup for applications embedding `time-scale-rs`.
//!
//! The library itself only emits events: scale divisions at `debug`, ladder
//! truncation at `trace` and rejected inputs at `warn`, all under the
//! `time_scale_rs` target. Hosts with their own subscriber need nothing here.

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "info";

/// Installs a compact fmt subscriber filtered by `RUST_LOG` (or [`DEFAULT_FILTER`]).
///
/// Returns `false` when the `telemetry` feature is disabled or a global
/// subscriber is already installed.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing_with_filter(DEFAULT_FILTER)
}

/// Like [`init_default_tracing`], with an explicit fallback filter directive
/// such as `"time_scale_rs=debug"`.
#[must_use]
pub fn init_tracing_with_filter(fallback_directive: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        use tracing_subscriber::EnvFilter;

        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(fallback_directive))
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .compact()
            .try_init()
            .is_ok()
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = fallback_directive;
        false
    }
}
