use clap::Parser;
use std::path::PathBuf;

use api_gateway::config::{load_config, load_default};
use api_gateway::lifecycle;
use api_gateway::observability::init_logging;

#[derive(Parser)]
#[command(name = "api-gateway")]
#[command(about = "HTTP gateway for the user and article services", long_about = None)]
struct Args {
    /// Path to a TOML config file; built-in defaults are used when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => load_default()?,
    };

    init_logging(&config.observability)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        config = ?args.config,
        bind_address = %config.listener.bind_address,
        user_service = %config.backends.user.address,
        article_service = %config.backends.article.address,
        "api-gateway starting"
    );
    tracing::info!(
        max_failures = config.circuit_breaker.max_failures,
        reset_timeout_secs = config.circuit_breaker.reset_timeout_secs,
        on_timeout = ?config.circuit_breaker.on_timeout,
        "Circuit breaker policy"
    );

    if let Err(e) = lifecycle::run(config).await {
        tracing::error!(error = %e, "Gateway failed");
        return Err(e.into());
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
