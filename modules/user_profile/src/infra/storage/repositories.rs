//! SeaORM repository implementations

use crate::contract::StoredFieldValue;
use crate::domain::repository::ProfileFieldRepository;
use anyhow::Result;
use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder,
};
use std::sync::Arc;
use uuid::Uuid;

use super::entity;

// ===== Profile Field Repository =====

pub struct SeaOrmProfileFieldRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmProfileFieldRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProfileFieldRepository for SeaOrmProfileFieldRepository {
    async fn find_by_owner(
        &self,
        parent_type: &str,
        parent_id: Uuid,
    ) -> Result<Vec<StoredFieldValue>> {
        let results = entity::Entity::find()
            .filter(entity::Column::ParentType.eq(parent_type))
            .filter(entity::Column::ParentId.eq(parent_id))
            .order_by_asc(entity::Column::Slug)
            .all(&*self.db)
            .await?;

        Ok(results.into_iter().map(|e| e.into()).collect())
    }

    async fn upsert(&self, value: &StoredFieldValue) -> Result<StoredFieldValue> {
        let existing = entity::Entity::find_by_id((
            value.parent_type.clone(),
            value.parent_id,
            value.slug.clone(),
        ))
        .one(&*self.db)
        .await?;

        let result = match existing {
            Some(row) => {
                // Keep the original creation time
                let mut active: entity::ActiveModel = row.into();
                active.value = Set(value.value.clone());
                active.updated_at = Set(chrono::Utc::now());
                active.update(&*self.db).await?
            }
            None => {
                let active: entity::ActiveModel = value.into();
                active.insert(&*self.db).await?
            }
        };

        Ok(result.into())
    }
}
