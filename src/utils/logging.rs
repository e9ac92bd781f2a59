//! Logging setup

use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber.
///
/// `level` is used when `RUST_LOG` is not set; `json` switches to
/// line-delimited JSON output for machine consumption.
pub fn init(level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
