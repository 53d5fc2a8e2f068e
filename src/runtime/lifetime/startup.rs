use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::api::services::AppServices;
use crate::config::get_config;
use crate::storage::{SeaOrmStorage, StorageFactory};

pub struct StartupContext {
    pub storage: Arc<SeaOrmStorage>,
    pub services: AppServices,
}

/// Open storage, run migrations, seed default tiers and build the handler
/// services.
pub async fn prepare_server_startup() -> Result<StartupContext> {
    let start_time = std::time::Instant::now();
    debug!("Starting pre-startup processing...");

    let storage = StorageFactory::create()
        .await
        .context("Failed to create storage backend")?;
    info!("Using storage backend: {}", storage.backend_name());

    let config = get_config();
    let services = AppServices::new(storage.clone(), &config);

    let seeded = services
        .tiers
        .seed_defaults()
        .await
        .context("Failed to seed subscription tiers")?;
    if seeded > 0 {
        info!("Seeded {} default subscription tiers", seeded);
    }

    debug!(
        "Pre-startup processing completed in {} ms",
        start_time.elapsed().as_millis()
    );

    Ok(StartupContext { storage, services })
}
