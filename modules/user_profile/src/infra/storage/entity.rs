//! SeaORM entities for database tables

use sea_orm::entity::prelude::*;

/// Profile field values table entity
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "profile_fields")]
pub struct Model {
    /// Owner entity type (part of composite primary key)
    #[sea_orm(primary_key, auto_increment = false)]
    pub parent_type: String,

    /// Owner entity id (part of composite primary key)
    #[sea_orm(primary_key, auto_increment = false)]
    pub parent_id: Uuid,

    /// Field slug (part of composite primary key)
    #[sea_orm(primary_key, auto_increment = false)]
    pub slug: String,

    /// Field value as JSON
    pub value: Json,

    pub created_at: DateTimeUtc,

    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
