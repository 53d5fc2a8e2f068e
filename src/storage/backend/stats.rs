use sea_orm::{EntityTrait, PaginatorTrait};

use super::SeaOrmStorage;
use crate::errors::Result;
use crate::storage::models::DashboardStats;

use migration::entities::{client, competitor, query, report};

impl SeaOrmStorage {
    /// Row counts for the dashboard header
    pub async fn dashboard_stats(&self) -> Result<DashboardStats> {
        Ok(DashboardStats {
            clients: client::Entity::find().count(&self.db).await?,
            competitors: competitor::Entity::find().count(&self.db).await?,
            queries: query::Entity::find().count(&self.db).await?,
            reports: report::Entity::find().count(&self.db).await?,
        })
    }

    /// Cheap round trip used by the health endpoint
    pub async fn ping(&self) -> Result<()> {
        self.db.ping().await?;
        Ok(())
    }
}
