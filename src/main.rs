use classbook::classbook_config::AppConfig;
use classbook::logging::init_tracing;
use classbook::router::init_router;
use classbook::state::init_app_state;
use dotenvy::dotenv;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;
    info!(storage = %config.storage, "Starting classbook");

    let state = init_app_state(&config).await?;
    let app = init_router(state);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    info!("Server running on http://{address}");
    info!("Scalar UI available at http://{address}/scalar");
    axum::serve(listener, app).await?;

    Ok(())
}
