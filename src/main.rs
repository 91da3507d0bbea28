use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use payroll_engine::api::{AppState, create_router};
use payroll_engine::config::ConfigLoader;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration directory holding payroll.yaml and employees.yaml.
    /// Built-in defaults are used when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Overrides the configured listen address.
    #[arg(long)]
    addr: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(dir) => ConfigLoader::load(dir)
            .with_context(|| format!("loading configuration from {}", dir.display()))?,
        None => ConfigLoader::default(),
    };
    let addr = cli.addr.unwrap_or_else(|| config.server().addr.clone());

    let state = AppState::in_memory(&config);
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    info!(
        addr = %addr,
        deduction_rate = %config.rules().deduction_rate,
        employees = config.employees().len(),
        "Payroll engine listening"
    );

    axum::serve(listener, router).await.context("serving HTTP")?;
    Ok(())
}
