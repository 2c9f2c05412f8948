use odonto_core::config::{database_path_from_env_value, default_color_from_env_value};
use odonto_core::CoreConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Main entry point for the odontogram service
///
/// Opens (and if needed creates or upgrades) the clinic database, then serves
/// the REST API with Swagger UI at `/swagger-ui`.
///
/// # Environment Variables
/// - `ODONTO_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `ODONTO_DATABASE_PATH`: SQLite database file (default: "data/clinic.sqlite")
/// - `ODONTO_DEFAULT_COLOR`: Color pre-selected in the chart toolbar (default: "blue")
///
/// # Returns
/// * `Ok(())` - If the server starts and runs successfully
/// * `Err(anyhow::Error)` - If configuration, database open or the server fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("odonto_run=info".parse()?)
                .add_directive("odonto_core=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr = std::env::var("ODONTO_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());

    let cfg = CoreConfig::new(
        database_path_from_env_value(std::env::var("ODONTO_DATABASE_PATH").ok()),
        default_color_from_env_value(std::env::var("ODONTO_DEFAULT_COLOR").ok())?,
    )?;

    tracing::info!("++ Opening database {}", cfg.database_path().display());
    let state = api_rest::AppState::from_config(&cfg)?;

    tracing::info!("++ Starting odontogram REST on {}", rest_addr);
    api_rest::serve(state, &rest_addr).await
}
