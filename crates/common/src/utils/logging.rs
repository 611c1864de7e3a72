use std::io;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize a compact stderr subscriber.
/// - Respects `RUST_LOG` if set
/// - Falls back to `info,reqwest=warn`
pub fn init_logging_default() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,reqwest=warn"));
    let _ = fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .with_writer(io::stderr)
        .try_init();
}

/// Initialize a JSON subscriber for machine-read logs.
/// - Respects `RUST_LOG` if set, defaults to `info` with request tracing on the service layer
pub fn init_logging_json() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,service=debug,common::http=debug"));
    let _ = fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .json()
        .with_writer(io::stderr)
        .try_init();
}
