#![forbid(unsafe_code)]

//! Logging integration.
//!
//! All instrumentation in this crate goes through the `tracing` facade and
//! compiles away entirely when the `tracing` feature is off. Embedders that
//! want machine-readable output can enable `tracing-json` and call
//! [`init_json`] once at startup; everyone else installs whatever subscriber
//! they already use.

#[cfg(feature = "tracing")]
pub use tracing::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};

/// Install a JSON-formatted subscriber honoring `RUST_LOG`.
///
/// Falls back to the `info` level when `RUST_LOG` is unset or invalid.
/// Safe to call more than once; later calls are no-ops.
#[cfg(feature = "tracing-json")]
pub fn init_json() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .try_init();
}
