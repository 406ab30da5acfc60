//! Logging initialization for the CLI
//!
//! Uses `RUST_LOG` when set, otherwise logs at `info` (or `debug` when verbose).

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Build the environment filter
fn build_env_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = if verbose { "debug" } else { "info" };
        EnvFilter::new(format!("info,tsgen={level},tsgen_transpiler={level}"))
    })
}

/// Initialize human-readable logging to stderr
pub fn init_logging(verbose: bool) {
    tracing_subscriber::registry()
        .with(build_env_filter(verbose))
        .with(
            fmt::layer()
                .with_target(verbose)
                .with_writer(std::io::stderr),
        )
        .init();
}
