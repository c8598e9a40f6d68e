//! Entity to model mappers
//!
//! Conversions between SeaORM entities and contract models

use super::entity;
use crate::contract::StoredFieldValue;

impl From<entity::Model> for StoredFieldValue {
    fn from(entity: entity::Model) -> Self {
        Self {
            parent_type: entity.parent_type,
            parent_id: entity.parent_id,
            slug: entity.slug,
            value: entity.value,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

impl From<&StoredFieldValue> for entity::ActiveModel {
    fn from(model: &StoredFieldValue) -> Self {
        use sea_orm::ActiveValue::*;

        Self {
            parent_type: Set(model.parent_type.clone()),
            parent_id: Set(model.parent_id),
            slug: Set(model.slug.clone()),
            value: Set(model.value.clone()),
            created_at: Set(model.created_at),
            updated_at: Set(model.updated_at),
        }
    }
}
