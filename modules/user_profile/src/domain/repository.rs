//! Repository traits for data access
//!
//! These traits define the interface for data access operations.
//! Implementations are in infra/storage/repositories.rs

use crate::contract::StoredFieldValue;
use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

/// Repository for per-owner profile field values
#[async_trait]
pub trait ProfileFieldRepository: Send + Sync {
    /// All stored values of one owner
    async fn find_by_owner(&self, parent_type: &str, parent_id: Uuid)
        -> Result<Vec<StoredFieldValue>>;

    /// Insert the value, or update it if the owner already has one for the slug
    async fn upsert(&self, value: &StoredFieldValue) -> Result<StoredFieldValue>;
}
