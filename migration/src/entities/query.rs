//! Saved keyword/country reporting specification (not a database query)

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "queries")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub client_id: i32,
    /// JSON array of strings, at most 1000 entries
    #[sea_orm(column_type = "Text")]
    pub keywords: String,
    /// JSON array of strings, at most 100 entries
    #[sea_orm(column_type = "Text")]
    pub countries: String,
    pub period_start: Option<Date>,
    pub period_end: Option<Date>,
    /// monthly | fortnightly | custom
    pub frequency: String,
    pub auto_run: bool,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::client::Entity",
        from = "Column::ClientId",
        to = "super::client::Column::Id",
        on_delete = "Cascade"
    )]
    Client,
    #[sea_orm(has_many = "super::report::Entity")]
    Report,
}

impl Related<super::client::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Client.def()
    }
}

impl Related<super::report::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Report.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
