use sea_orm::{ActiveModelTrait, EntityTrait, IntoActiveModel, Set};
use tracing::info;

use super::SeaOrmStorage;
use super::converters::{model_to_query, model_to_report, pending_report_active_model};
use crate::errors::{AgencyError, Result};
use crate::storage::models::{Query, Report};

use migration::entities::query;

impl SeaOrmStorage {
    pub async fn get_query(&self, id: i32) -> Result<Query> {
        query::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(model_to_query)
            .ok_or_else(|| AgencyError::not_found(format!("Query {} not found", id)))
    }

    /// Flip `auto_run` and return the updated query
    pub async fn toggle_auto_run(&self, id: i32) -> Result<Query> {
        let model = query::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AgencyError::not_found(format!("Query {} not found", id)))?;

        let next = !model.auto_run;
        let mut active = model.into_active_model();
        active.auto_run = Set(next);
        let updated = active.update(&self.db).await?;

        info!("Query {} auto_run set to {}", updated.id, updated.auto_run);
        Ok(model_to_query(updated))
    }

    /// Queue a pending report with empty data for `query_id`
    pub async fn create_report(&self, query_id: i32) -> Result<Report> {
        // Surface a missing query as NotFound rather than a FK error
        let query = self.get_query(query_id).await?;

        let inserted = pending_report_active_model(query.id)
            .insert(&self.db)
            .await?;

        info!("Report {} queued for query {}", inserted.id, query.id);
        Ok(model_to_report(inserted))
    }
}
