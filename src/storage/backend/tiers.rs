//! Subscription tier catalog
//!
//! Clients reference tiers by slug, so slug renames are pushed into
//! `clients.subscription_tier` and referenced tiers can't be deleted.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait, sea_query::Expr,
};
use tracing::info;

use super::SeaOrmStorage;
use super::converters::{encode_list, model_to_tier, tier_fields_to_active_model};
use crate::errors::{AgencyError, Result};
use crate::storage::models::{SubscriptionTier, TierFields};

use migration::entities::{client, subscription_tier};

impl SeaOrmStorage {
    /// Tiers in display order; `active_only` hides disabled ones
    pub async fn list_tiers(&self, active_only: bool) -> Result<Vec<SubscriptionTier>> {
        let mut select = subscription_tier::Entity::find();
        if active_only {
            select = select.filter(subscription_tier::Column::IsActive.eq(true));
        }

        let models = select
            .order_by_asc(subscription_tier::Column::SortOrder)
            .order_by_asc(subscription_tier::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| AgencyError::database_operation(format!("Failed to list tiers: {}", e)))?;

        Ok(models.into_iter().map(model_to_tier).collect())
    }

    pub async fn get_tier(&self, id: i32) -> Result<SubscriptionTier> {
        subscription_tier::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(model_to_tier)
            .ok_or_else(|| AgencyError::not_found(format!("Tier {} not found", id)))
    }

    pub async fn get_tier_by_slug(&self, slug: &str) -> Result<Option<SubscriptionTier>> {
        Ok(subscription_tier::Entity::find()
            .filter(subscription_tier::Column::Slug.eq(slug))
            .one(&self.db)
            .await?
            .map(model_to_tier))
    }

    pub async fn count_tiers(&self) -> Result<u64> {
        Ok(subscription_tier::Entity::find().count(&self.db).await?)
    }

    /// Insert an active tier at the end of the list (`sort_order` = count + 1).
    ///
    /// A duplicate name or slug comes back as `AgencyError::Conflict` from the
    /// unique indexes.
    pub async fn insert_tier(&self, fields: TierFields) -> Result<SubscriptionTier> {
        let txn = self.db.begin().await.map_err(|e| {
            AgencyError::database_operation(format!("Failed to begin transaction: {}", e))
        })?;

        let count = subscription_tier::Entity::find().count(&txn).await?;
        let sort_order = i32::try_from(count + 1).unwrap_or(i32::MAX);

        let inserted = tier_fields_to_active_model(&fields, true, sort_order)?
            .insert(&txn)
            .await?;

        txn.commit().await.map_err(|e| {
            AgencyError::database_operation(format!("Failed to commit tier insert: {}", e))
        })?;

        info!("Tier created: {} ({})", inserted.name, inserted.slug);
        Ok(model_to_tier(inserted))
    }

    /// Overwrite a tier's editable fields. A slug change is applied to every
    /// client that referenced the old slug in the same transaction.
    pub async fn update_tier(&self, id: i32, fields: TierFields) -> Result<SubscriptionTier> {
        let txn = self.db.begin().await.map_err(|e| {
            AgencyError::database_operation(format!("Failed to begin transaction: {}", e))
        })?;

        let model = subscription_tier::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| AgencyError::not_found(format!("Tier {} not found", id)))?;
        let old_slug = model.slug.clone();

        let mut active = model.into_active_model();
        active.name = Set(fields.name.clone());
        active.slug = Set(fields.slug.clone());
        active.price_cents = Set(fields.price_cents);
        active.duration_months = Set(fields.duration_months);
        active.features = Set(encode_list(&fields.features)?);
        let updated = active.update(&txn).await?;

        if old_slug != fields.slug {
            let moved = client::Entity::update_many()
                .col_expr(
                    client::Column::SubscriptionTier,
                    Expr::value(fields.slug.clone()),
                )
                .filter(client::Column::SubscriptionTier.eq(old_slug.as_str()))
                .exec(&txn)
                .await?;
            info!(
                "Tier slug renamed {} -> {}, {} clients updated",
                old_slug, fields.slug, moved.rows_affected
            );
        }

        txn.commit().await.map_err(|e| {
            AgencyError::database_operation(format!("Failed to commit tier update: {}", e))
        })?;

        Ok(model_to_tier(updated))
    }

    /// Delete a tier nobody references. Returns the deleted tier.
    pub async fn delete_tier(&self, id: i32) -> Result<SubscriptionTier> {
        let txn = self.db.begin().await.map_err(|e| {
            AgencyError::database_operation(format!("Failed to begin transaction: {}", e))
        })?;

        let model = subscription_tier::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| AgencyError::not_found(format!("Tier {} not found", id)))?;

        let in_use = client::Entity::find()
            .filter(client::Column::SubscriptionTier.eq(model.slug.as_str()))
            .count(&txn)
            .await?;
        if in_use > 0 {
            return Err(AgencyError::conflict(format!(
                "Tier '{}' is assigned to {} client(s) and cannot be deleted.",
                model.name, in_use
            )));
        }

        subscription_tier::Entity::delete_by_id(id).exec(&txn).await?;
        txn.commit().await.map_err(|e| {
            AgencyError::database_operation(format!("Failed to commit tier delete: {}", e))
        })?;

        info!("Tier deleted: {}", model.slug);
        Ok(model_to_tier(model))
    }

    pub async fn toggle_tier(&self, id: i32) -> Result<SubscriptionTier> {
        let model = subscription_tier::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AgencyError::not_found(format!("Tier {} not found", id)))?;

        let next = !model.is_active;
        let mut active = model.into_active_model();
        active.is_active = Set(next);
        let updated = active.update(&self.db).await?;

        info!("Tier {} is_active set to {}", updated.slug, updated.is_active);
        Ok(model_to_tier(updated))
    }

    /// Insert `defaults` in order when the table is empty. Returns how many
    /// rows were written (0 when tiers already exist).
    pub async fn seed_tiers_if_empty(&self, defaults: &[TierFields]) -> Result<usize> {
        let txn = self.db.begin().await.map_err(|e| {
            AgencyError::database_operation(format!("Failed to begin transaction: {}", e))
        })?;

        if subscription_tier::Entity::find().count(&txn).await? > 0 {
            return Ok(0);
        }

        for (idx, fields) in defaults.iter().enumerate() {
            tier_fields_to_active_model(fields, true, idx as i32 + 1)?
                .insert(&txn)
                .await?;
        }

        txn.commit().await.map_err(|e| {
            AgencyError::database_operation(format!("Failed to commit tier seed: {}", e))
        })?;

        info!("Seeded {} default subscription tiers", defaults.len());
        Ok(defaults.len())
    }
}
