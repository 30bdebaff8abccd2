use classbook_config::{AppConfig, CorsConfig, StorageBackend};
use classbook_db::init_db_pool;
use tracing::info;

use crate::services::SchoolServices;

#[derive(Clone)]
pub struct AppState {
    pub services: SchoolServices,
    pub cors_config: CorsConfig,
}

/// Builds the shared state on the storage backend selected by `config`.
pub async fn init_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let services = match config.storage {
        StorageBackend::Memory => {
            info!("Using in-memory storage; data is lost on shutdown");
            SchoolServices::memory()
        }
        StorageBackend::Postgres => {
            let database = config
                .database
                .as_ref()
                .ok_or_else(|| anyhow::anyhow!("DATABASE_URL must be set for postgres storage"))?;
            SchoolServices::postgres(init_db_pool(database).await?)
        }
    };

    Ok(AppState {
        services,
        cors_config: config.cors.clone(),
    })
}
