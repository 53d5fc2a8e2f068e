//! Client, competitor and intake writes
//!
//! An intake submission touches up to four tables (clients, competitors,
//! queries and, for public submissions, shareable_links). All of it runs in
//! one transaction so a failure leaves nothing behind.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, ExprTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use tracing::{debug, info};

use super::SeaOrmStorage;
use super::converters::{
    model_to_client, model_to_competitor, model_to_query, model_to_report,
    new_client_to_active_model, new_competitor_to_active_model, new_query_to_active_model,
};
use crate::errors::{AgencyError, Result};
use crate::storage::models::{
    Client, ClientDetail, ClientUpdate, IntakeRecord, NewClient, NewCompetitor, NewQuery,
    QueryWithReports,
};

use migration::entities::{client, competitor, query, report, shareable_link};

impl SeaOrmStorage {
    /// Write one intake submission.
    ///
    /// When `link_id` is given, the link's `use_count` is bumped inside the
    /// same transaction with an atomic `use_count + 1`. The increment is
    /// filtered on `is_active`, so a link deactivated between the gate check
    /// and the write rejects the whole submission.
    pub async fn create_intake(
        &self,
        new_client: NewClient,
        competitors: Vec<NewCompetitor>,
        new_query: NewQuery,
        link_id: Option<i32>,
    ) -> Result<IntakeRecord> {
        let txn = self.db.begin().await.map_err(|e| {
            AgencyError::database_operation(format!("Failed to begin transaction: {}", e))
        })?;

        let client_model = new_client_to_active_model(&new_client)?
            .insert(&txn)
            .await?;
        let client_id = client_model.id;

        let mut competitor_ids = Vec::with_capacity(competitors.len());
        for comp in &competitors {
            let inserted = new_competitor_to_active_model(client_id, comp)?
                .insert(&txn)
                .await?;
            competitor_ids.push(inserted.id);
        }

        let query_model = new_query_to_active_model(client_id, &new_query)?
            .insert(&txn)
            .await?;

        if let Some(link_id) = link_id {
            let result = shareable_link::Entity::update_many()
                .col_expr(
                    shareable_link::Column::UseCount,
                    Expr::col(shareable_link::Column::UseCount).add(1i64),
                )
                .filter(shareable_link::Column::Id.eq(link_id))
                .filter(shareable_link::Column::IsActive.eq(true))
                .exec(&txn)
                .await?;

            if result.rows_affected == 0 {
                // Dropping the transaction rolls it back
                return Err(AgencyError::invalid_link(
                    "This intake link is invalid or expired.",
                ));
            }
        }

        txn.commit().await.map_err(|e| {
            AgencyError::database_operation(format!("Failed to commit intake: {}", e))
        })?;

        info!(
            "Intake stored: client {} ({} competitors, query {})",
            client_id,
            competitor_ids.len(),
            query_model.id
        );

        Ok(IntakeRecord {
            client_id,
            competitor_ids,
            query_id: query_model.id,
        })
    }

    /// All clients, newest first
    pub async fn list_clients(&self) -> Result<Vec<Client>> {
        let models = client::Entity::find()
            .order_by_desc(client::Column::CreatedAt)
            .order_by_desc(client::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| AgencyError::database_operation(format!("Failed to list clients: {}", e)))?;

        Ok(models.into_iter().map(model_to_client).collect())
    }

    pub async fn get_client(&self, id: i32) -> Result<Client> {
        client::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(model_to_client)
            .ok_or_else(|| AgencyError::not_found(format!("Client {} not found", id)))
    }

    /// Client with its competitors, and its queries each carrying their
    /// reports newest first.
    pub async fn client_detail(&self, id: i32) -> Result<ClientDetail> {
        let client = self.get_client(id).await?;

        let competitors = competitor::Entity::find()
            .filter(competitor::Column::ClientId.eq(id))
            .order_by_asc(competitor::Column::Id)
            .all(&self.db)
            .await?
            .into_iter()
            .map(model_to_competitor)
            .collect();

        let query_models = query::Entity::find()
            .filter(query::Column::ClientId.eq(id))
            .order_by_desc(query::Column::CreatedAt)
            .order_by_desc(query::Column::Id)
            .all(&self.db)
            .await?;

        let mut queries = Vec::with_capacity(query_models.len());
        for model in query_models {
            let reports = report::Entity::find()
                .filter(report::Column::QueryId.eq(model.id))
                .order_by_desc(report::Column::CreatedAt)
                .order_by_desc(report::Column::Id)
                .all(&self.db)
                .await?
                .into_iter()
                .map(model_to_report)
                .collect();
            queries.push(QueryWithReports {
                query: model_to_query(model),
                reports,
            });
        }

        Ok(ClientDetail {
            client,
            competitors,
            queries,
        })
    }

    pub async fn update_client(&self, id: i32, update: ClientUpdate) -> Result<Client> {
        let model = client::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AgencyError::not_found(format!("Client {} not found", id)))?;

        let mut active = model.into_active_model();
        active.name = Set(update.name);
        active.website = Set(update.website);
        active.contact_name = Set(update.contact_name);
        active.contact_email = Set(update.contact_email);
        active.subscription_tier = Set(update.subscription_tier);

        let updated = active.update(&self.db).await?;
        info!("Client updated: {}", updated.id);
        Ok(model_to_client(updated))
    }

    /// Delete a client and everything hanging off it.
    ///
    /// Children are deleted explicitly, reports first; schema cascades are
    /// not relied on.
    pub async fn delete_client(&self, id: i32) -> Result<Client> {
        let txn = self.db.begin().await.map_err(|e| {
            AgencyError::database_operation(format!("Failed to begin transaction: {}", e))
        })?;

        let model = client::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| AgencyError::not_found(format!("Client {} not found", id)))?;

        let query_ids: Vec<i32> = query::Entity::find()
            .filter(query::Column::ClientId.eq(id))
            .all(&txn)
            .await?
            .into_iter()
            .map(|q| q.id)
            .collect();

        if !query_ids.is_empty() {
            let removed = report::Entity::delete_many()
                .filter(report::Column::QueryId.is_in(query_ids))
                .exec(&txn)
                .await?;
            debug!("Removed {} reports for client {}", removed.rows_affected, id);
        }

        query::Entity::delete_many()
            .filter(query::Column::ClientId.eq(id))
            .exec(&txn)
            .await?;
        competitor::Entity::delete_many()
            .filter(competitor::Column::ClientId.eq(id))
            .exec(&txn)
            .await?;
        client::Entity::delete_by_id(id).exec(&txn).await?;

        txn.commit().await.map_err(|e| {
            AgencyError::database_operation(format!("Failed to commit client delete: {}", e))
        })?;

        info!("Client deleted with all associated data: {}", id);
        Ok(model_to_client(model))
    }
}
