//! Database migrations for the user profile module

use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20250301_000001_create_profile_fields::Migration)]
    }
}

mod m20250301_000001_create_profile_fields {
    use super::*;

    #[derive(DeriveMigrationName)]
    pub struct Migration;

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(ProfileFields::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(ProfileFields::ParentType).string().not_null())
                        .col(ColumnDef::new(ProfileFields::ParentId).uuid().not_null())
                        .col(ColumnDef::new(ProfileFields::Slug).string().not_null())
                        .col(ColumnDef::new(ProfileFields::Value).json().not_null())
                        .col(
                            ColumnDef::new(ProfileFields::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .col(
                            ColumnDef::new(ProfileFields::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .primary_key(
                            Index::create()
                                .col(ProfileFields::ParentType)
                                .col(ProfileFields::ParentId)
                                .col(ProfileFields::Slug),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_profile_fields_owner")
                        .table(ProfileFields::Table)
                        .col(ProfileFields::ParentType)
                        .col(ProfileFields::ParentId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(ProfileFields::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum ProfileFields {
        Table,
        ParentType,
        ParentId,
        Slug,
        Value,
        CreatedAt,
        UpdatedAt,
    }
}
