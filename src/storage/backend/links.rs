use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, QueryFilter, QueryOrder, Set,
};
use tracing::info;

use super::SeaOrmStorage;
use super::converters::{model_to_link, new_link_to_active_model};
use crate::errors::{AgencyError, Result};
use crate::storage::models::{NewLink, ShareableLink};

use migration::entities::shareable_link;

impl SeaOrmStorage {
    pub async fn insert_link(&self, link: NewLink) -> Result<ShareableLink> {
        let inserted = new_link_to_active_model(&link).insert(&self.db).await?;
        info!("Shareable link created: id {} ({})", inserted.id, inserted.label);
        Ok(model_to_link(inserted))
    }

    /// All links, newest first
    pub async fn list_links(&self) -> Result<Vec<ShareableLink>> {
        let models = shareable_link::Entity::find()
            .order_by_desc(shareable_link::Column::CreatedAt)
            .order_by_desc(shareable_link::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| AgencyError::database_operation(format!("Failed to list links: {}", e)))?;

        Ok(models.into_iter().map(model_to_link).collect())
    }

    pub async fn get_link(&self, id: i32) -> Result<ShareableLink> {
        shareable_link::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(model_to_link)
            .ok_or_else(|| AgencyError::not_found(format!("Link {} not found", id)))
    }

    pub async fn find_link_by_token(&self, token: &str) -> Result<Option<ShareableLink>> {
        Ok(shareable_link::Entity::find()
            .filter(shareable_link::Column::Token.eq(token))
            .one(&self.db)
            .await?
            .map(model_to_link))
    }

    pub async fn toggle_link(&self, id: i32) -> Result<ShareableLink> {
        let model = shareable_link::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AgencyError::not_found(format!("Link {} not found", id)))?;

        let next = !model.is_active;
        let mut active = model.into_active_model();
        active.is_active = Set(next);
        let updated = active.update(&self.db).await?;

        info!("Shareable link {} is_active set to {}", updated.id, updated.is_active);
        Ok(model_to_link(updated))
    }

    pub async fn delete_link(&self, id: i32) -> Result<ShareableLink> {
        let model = shareable_link::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AgencyError::not_found(format!("Link {} not found", id)))?;

        shareable_link::Entity::delete_by_id(id).exec(&self.db).await?;
        info!("Shareable link deleted: {}", id);
        Ok(model_to_link(model))
    }
}
