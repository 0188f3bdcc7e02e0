//! Greeter form service.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────────▶ http::server (request id, trace, timeout, body limit)
//!                          │
//!                          ▼
//!                     form::handler ──▶ form::name (trim + escape)
//!                          │
//!                          ├──────────▶ diagnostics (general, config, env, request)
//!                          ▼
//!     ◀────────────── form::page (message + form + diagnostics) + security headers
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use greeter_form::config::{self, ConfigError, GreeterConfig};
use greeter_form::http::{HttpServer, ServerError};
use greeter_form::lifecycle::{signals, Shutdown};
use greeter_form::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "greeter-form")]
#[command(about = "Serve the name form and diagnostics page", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override `listener.bind_address`.
    #[arg(short, long)]
    bind: Option<String>,
}

fn load(cli: &Cli) -> Result<GreeterConfig, ServerError> {
    let mut config = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => GreeterConfig::default(),
    };

    if let Some(bind) = &cli.bind {
        config.listener.bind_address = bind.clone();
        config::validation::validate_config(&config).map_err(ConfigError::Validation)?;
    }

    Ok(config)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load(&cli)?;

    logging::init_logging(&config.observability.log_level);

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "greeter-form starting");
    tracing::info!(
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        max_body_size = config.security.max_body_size,
        config_file = ?cli.config,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let server = HttpServer::new(config);
    let listener = server.bind().await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Arc::new(Shutdown::new());
    let server_shutdown = shutdown.subscribe();
    signals::spawn_signal_listener(shutdown.clone());

    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
