//! Opt-in tracing setup for hosts embedding the chart.
//!
//! The crate only emits `tracing` events. Hosts that already own a subscriber
//! should ignore this module.

/// Default filter used when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "ohlcv_chart=info";

/// Installs a compact fmt subscriber filtered by `RUST_LOG` (or
/// [`DEFAULT_FILTER`]) when the `telemetry` feature is enabled.
///
/// Returns `false` when the feature is off or a global subscriber exists.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_FILTER));

        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}
