//! Standalone REST API server binary.
//!
//! ## Purpose
//! Runs the odontogram REST API on its own.
//!
//! ## Intended use
//! Useful during development when you only want the REST server (with
//! OpenAPI/Swagger UI). The workspace's main `odonto-run` binary is the
//! deployed entry point.

use odonto_core::config::{database_path_from_env_value, default_color_from_env_value};
use odonto_core::CoreConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Main entry point for the odontogram REST API server.
///
/// # Environment Variables
/// - `ODONTO_REST_ADDR`: Server address (default: "0.0.0.0:3000")
/// - `ODONTO_DATABASE_PATH`: SQLite database file (default: "data/clinic.sqlite")
/// - `ODONTO_DEFAULT_COLOR`: Color pre-selected in the chart toolbar (default: "blue")
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the configuration is invalid or the database cannot be opened,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("api_rest=info".parse()?)
                .add_directive("odonto_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = std::env::var("ODONTO_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());

    let cfg = CoreConfig::new(
        database_path_from_env_value(std::env::var("ODONTO_DATABASE_PATH").ok()),
        default_color_from_env_value(std::env::var("ODONTO_DEFAULT_COLOR").ok())?,
    )?;

    tracing::info!(
        "-- Starting odontogram REST API on {} (database {})",
        addr,
        cfg.database_path().display()
    );

    let state = api_rest::AppState::from_config(&cfg)?;
    api_rest::serve(state, &addr).await
}
