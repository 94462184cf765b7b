//! Console logging for both tools.
//!
//! Filtered with `RUST_LOG`; defaults to `info` for this crate and `warn`
//! for everything else (winit and wgpu are very chatty at `info`).

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

pub const DEFAULT_FILTER: &str = "warn,aerohelper=info";

pub fn default_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Installs the global subscriber. Calling it twice is harmless.
pub fn init_logging(verbose: bool) {
    let filter = if verbose { EnvFilter::new("debug") } else { default_filter() };
    let stdout_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_span_events(FmtSpan::NONE);

    let _ = tracing_subscriber::registry().with(filter).with(stdout_layer).try_init();
}
