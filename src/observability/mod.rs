//! Tracing subscriber setup
//!
//! `RUST_LOG` always wins; otherwise the crate logs at the requested level
//! and everything else at `warn`.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Output format for log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Default filter directive for a log level
pub fn default_filter(level: &str) -> String {
    format!("warn,iptv_player={level}")
}

/// Install the global subscriber. Logs go to stderr so stdout stays usable
/// for channel lists and JSON output.
pub fn init_tracing(level: &str, format: LogFormat) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter(level)));

    let registry = tracing_subscriber::registry().with(filter);

    let result = match format {
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .try_init(),
    };

    if let Err(e) = result {
        eprintln!("Warning: tracing subscriber already initialised: {e}");
    }
}
