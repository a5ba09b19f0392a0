//! Benefit ledger API server.
//!
//! Configuration directory and listen address come from
//! `BENEFIT_LEDGER_CONFIG_DIR` (default `./config/default`) and
//! `BENEFIT_LEDGER_ADDR` (default `0.0.0.0:3000`).

use std::env;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use benefit_ledger::api::{AppState, create_router};
use benefit_ledger::config::ConfigLoader;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "benefit_ledger=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config_dir =
        env::var("BENEFIT_LEDGER_CONFIG_DIR").unwrap_or_else(|_| "./config/default".to_string());
    let config = ConfigLoader::load(&config_dir)?;
    info!(
        config_dir = %config_dir,
        benefit_components = config.config().benefit_components().len(),
        payroll_periods = config.config().payroll_periods().len(),
        "Configuration loaded"
    );

    let app = create_router(AppState::new(config));

    let addr = env::var("BENEFIT_LEDGER_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
