//! Client management: dashboard, detail, edit, delete and the per-query
//! actions (queue a report, toggle auto-run).

use std::sync::Arc;

use tracing::info;

use super::intake::{ensure_tier_exists, required};
use crate::errors::Result;
use crate::storage::{
    Client, ClientDetail, ClientUpdate, DashboardStats, Query, Report, SeaOrmStorage,
};

pub const REPORT_QUEUED_MESSAGE: &str =
    "Report queued. Data collection will begin when sources are connected.";

/// Raw edit form values
#[derive(Debug, Clone, Default)]
pub struct ClientEditRequest {
    pub client_name: String,
    pub client_website: String,
    pub contact_name: String,
    pub contact_email: String,
    /// `None` keeps the current tier
    pub subscription_tier: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Dashboard {
    pub stats: DashboardStats,
    pub clients: Vec<Client>,
}

pub struct ClientService {
    storage: Arc<SeaOrmStorage>,
}

impl ClientService {
    pub fn new(storage: Arc<SeaOrmStorage>) -> Self {
        Self { storage }
    }

    pub async fn dashboard(&self) -> Result<Dashboard> {
        Ok(Dashboard {
            stats: self.storage.dashboard_stats().await?,
            clients: self.storage.list_clients().await?,
        })
    }

    pub async fn get_client(&self, id: i32) -> Result<Client> {
        self.storage.get_client(id).await
    }

    pub async fn detail(&self, id: i32) -> Result<ClientDetail> {
        self.storage.client_detail(id).await
    }

    /// Apply an edit with the same required-field and tier rules as intake
    pub async fn update_client(&self, id: i32, req: ClientEditRequest) -> Result<Client> {
        let current = self.storage.get_client(id).await?;

        let update = ClientUpdate {
            name: required(&req.client_name)?,
            website: required(&req.client_website)?,
            contact_name: required(&req.contact_name)?,
            contact_email: required(&req.contact_email)?,
            subscription_tier: req
                .subscription_tier
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .unwrap_or(current.subscription_tier),
        };
        ensure_tier_exists(&self.storage, &update.subscription_tier).await?;

        self.storage.update_client(id, update).await
    }

    pub async fn delete_client(&self, id: i32) -> Result<Client> {
        self.storage.delete_client(id).await
    }

    /// Queue a pending report. Returns the report and its query so callers
    /// can redirect to the owning client.
    pub async fn run_query(&self, query_id: i32) -> Result<(Query, Report)> {
        let query = self.storage.get_query(query_id).await?;
        let report = self.storage.create_report(query.id).await?;
        Ok((query, report))
    }

    pub async fn toggle_auto_run(&self, query_id: i32) -> Result<Query> {
        let query = self.storage.toggle_auto_run(query_id).await?;
        info!(
            "Auto-run {} for query {}",
            if query.auto_run { "enabled" } else { "disabled" },
            query.id
        );
        Ok(query)
    }
}

pub fn updated_message(client: &Client) -> String {
    format!("Client '{}' updated.", client.name)
}

pub fn deleted_message(client: &Client) -> String {
    format!("Client '{}' and all associated data deleted.", client.name)
}

pub fn auto_run_message(query: &Query) -> String {
    format!(
        "Auto-run {} for this query.",
        if query.auto_run { "enabled" } else { "disabled" }
    )
}
