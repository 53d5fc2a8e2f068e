use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "clients")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub website: String,
    /// JSON array of `{platform, handle}` objects
    #[sea_orm(column_type = "Text")]
    pub social_handles: String,
    pub contact_name: String,
    pub contact_email: String,
    /// Slug of a row in `subscription_tiers` (not a foreign key)
    pub subscription_tier: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::competitor::Entity")]
    Competitor,
    #[sea_orm(has_many = "super::query::Entity")]
    Query,
}

impl Related<super::competitor::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Competitor.def()
    }
}

impl Related<super::query::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Query.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
