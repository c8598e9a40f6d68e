//! Native client trait for inter-module communication
//!
//! Other modules use this trait to read and update custom profile fields.
//! NO HTTP - direct function calls.

use super::{
    error::ProfileError,
    model::{AccessMode, ProfileView, Schema, UserRef},
};
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::sync::Arc;

/// User profile API for inter-module communication
#[async_trait]
pub trait ProfileApi: Send + Sync {
    // ===== Schema =====

    /// Merged field schema, served from cache when caching is enabled
    async fn fields_schema(&self) -> Result<Arc<Schema>, ProfileError>;

    /// Drop the cached schema so the next read reloads it from disk
    async fn invalidate_schema_cache(&self) -> Result<(), ProfileError>;

    /// Schema filtered down to what `actor` may view or edit on `target`
    async fn filtered_schema(
        &self,
        actor: &UserRef,
        target: &UserRef,
        mode: AccessMode,
    ) -> Result<Schema, ProfileError>;

    // ===== Raw profile =====

    /// Resolved values for every schema field, without permission filtering
    async fn get_profile(&self, user: &UserRef, transform: bool)
        -> Result<ProfileView, ProfileError>;

    /// Persist the values in `data` that differ from the current profile
    async fn set_profile(&self, user: &UserRef, data: &Map<String, Value>)
        -> Result<(), ProfileError>;

    // ===== Permission-aware =====

    /// Values of `target` that `actor` may view
    async fn get_profile_fields(
        &self,
        actor: &UserRef,
        target: &UserRef,
        transform: bool,
    ) -> Result<ProfileView, ProfileError>;

    /// Persist the values `actor` may edit on `target`; returns the written slugs
    async fn update_profile_fields(
        &self,
        actor: &UserRef,
        target: &UserRef,
        data: &Map<String, Value>,
    ) -> Result<Vec<String>, ProfileError>;
}
