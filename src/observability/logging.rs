//! Structured logging.
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - `RUST_LOG` wins when set; otherwise the configured level applies to
//!   this crate and to tower_http request spans

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter directives derived from the configured log level.
pub fn default_directives(log_level: &str) -> String {
    let level = log_level.to_ascii_lowercase();
    format!("greeter_form={level},tower_http={level}")
}

/// Install the global tracing subscriber. Safe to call more than once; later
/// calls are ignored.
pub fn init_logging(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(log_level)));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
