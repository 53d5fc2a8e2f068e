use std::sync::Arc;

use actix_web::web;

use super::health::AppStartTime;
use crate::config::StaticConfig;
use crate::services::{ClientService, IntakeLimits, IntakeService, LinkService, TierService};
use crate::storage::SeaOrmStorage;

/// Form bodies larger than this are rejected; intake forms with full
/// keyword lists outgrow actix's 16 KiB default
const FORM_LIMIT_BYTES: usize = 2 * 1024 * 1024;

/// Handler dependencies, built once and cloned into every worker
#[derive(Clone)]
pub struct AppServices {
    pub storage: Arc<SeaOrmStorage>,
    pub clients: Arc<ClientService>,
    pub intake: Arc<IntakeService>,
    pub links: Arc<LinkService>,
    pub tiers: Arc<TierService>,
    pub settings: Arc<UiSettings>,
    pub start_time: AppStartTime,
}

/// Presentation settings taken from the static config
#[derive(Debug, Clone)]
pub struct UiSettings {
    /// Base for printed intake URLs; derived from the request when unset
    pub public_base_url: Option<String>,
}

impl AppServices {
    pub fn new(storage: Arc<SeaOrmStorage>, config: &StaticConfig) -> Self {
        Self {
            clients: Arc::new(ClientService::new(storage.clone())),
            intake: Arc::new(IntakeService::new(
                storage.clone(),
                IntakeLimits::from(&config.intake),
            )),
            links: Arc::new(LinkService::new(storage.clone(), &config.links)),
            tiers: Arc::new(TierService::new(storage.clone())),
            settings: Arc::new(UiSettings {
                public_base_url: config.links.public_base_url.clone(),
            }),
            start_time: AppStartTime {
                start_datetime: chrono::Utc::now(),
            },
            storage,
        }
    }

    /// Register every dependency as app data, plus the form body limit
    pub fn register(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(web::FormConfig::default().limit(FORM_LIMIT_BYTES))
            .app_data(web::Data::new(self.storage.clone()))
            .app_data(web::Data::new(self.clients.clone()))
            .app_data(web::Data::new(self.intake.clone()))
            .app_data(web::Data::new(self.links.clone()))
            .app_data(web::Data::new(self.tiers.clone()))
            .app_data(web::Data::new(self.settings.clone()))
            .app_data(web::Data::new(self.start_time.clone()));
    }
}
