//! Tracing Setup
//!
//! Initializes the `tracing` subscriber from the logging configuration.
//!
//! # Configuration
//!
//! - `RUST_LOG`: Overrides `observability.logging.level` when set
//! - `observability.logging.format`: `json` (default) or `pretty`
//!
//! # Usage
//!
//! ```rust,ignore
//! use risk_gate::telemetry::init_tracing;
//!
//! let config = risk_gate::config::load_config(None)?;
//! init_tracing(&config.observability.logging);
//! ```

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;

use crate::config::LoggingConfig;

/// Initialize the global tracing subscriber.
///
/// Does nothing if a subscriber is already installed, so tests and embedding
/// callers may call it more than once.
pub fn init_tracing(config: &LoggingConfig) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let span_events = if config.include_spans {
        FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_span_events(span_events)
        .with_writer(std::io::stderr);

    let result = if config.is_json() {
        builder
            .json()
            .with_current_span(config.include_spans)
            .try_init()
    } else {
        builder.pretty().try_init()
    };

    if result.is_err() {
        tracing::debug!("Tracing subscriber already installed");
    }
}
