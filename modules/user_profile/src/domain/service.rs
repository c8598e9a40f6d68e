//! Domain service - business logic orchestration

use super::permissions::{apply_permissions, Authorizer};
use super::profile::{changed_fields, resolve_profile};
use super::repository::ProfileFieldRepository;
use super::schema::SchemaLoader;
use crate::contract::{
    AccessContext, AccessMode, ProfileError, ProfileView, Schema, StoredFieldValue, UserRef,
    DEFAULT_EDIT_PERMISSION, DEFAULT_VIEW_PERMISSION, SCHEMA_INVALIDATE_PERMISSION,
    USER_OWNER_TYPE,
};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;

/// Domain service for custom profile fields
pub struct Service {
    repo: Arc<dyn ProfileFieldRepository>,
    schema_loader: Arc<SchemaLoader>,
    authorizer: Arc<dyn Authorizer>,
}

impl Service {
    /// Create a new service instance
    pub fn new(
        repo: Arc<dyn ProfileFieldRepository>,
        schema_loader: Arc<SchemaLoader>,
        authorizer: Arc<dyn Authorizer>,
    ) -> Self {
        Self {
            repo,
            schema_loader,
            authorizer,
        }
    }

    // ===== Schema =====

    /// Merged field schema
    pub fn fields_schema(&self) -> Result<Arc<Schema>, ProfileError> {
        self.schema_loader.fields_schema()
    }

    /// Drop the cached schema; call after changing schema documents
    pub fn invalidate_schema_cache(&self) {
        self.schema_loader.invalidate();
    }

    // ===== Profile read/write =====

    /// Resolved values for every schema field
    pub async fn get_profile(
        &self,
        user: &UserRef,
        transform: bool,
    ) -> Result<ProfileView, ProfileError> {
        let schema = self.fields_schema()?;
        self.resolve(&schema, user, transform).await
    }

    /// Persist the values in `data` that differ from the current profile
    ///
    /// Slugs outside the schema are ignored and missing slugs are left untouched.
    /// There is no transaction across fields: a failure keeps earlier writes.
    pub async fn set_profile(
        &self,
        user: &UserRef,
        data: &Map<String, Value>,
    ) -> Result<Vec<String>, ProfileError> {
        let current = self.get_profile(user, false).await?;
        self.write_changes(user, &current, data).await
    }

    // ===== Permission-aware operations =====

    /// Schema filtered to what `actor` may view or edit on `target`
    pub async fn filtered_schema(
        &self,
        actor: &UserRef,
        target: &UserRef,
        mode: AccessMode,
    ) -> Result<Schema, ProfileError> {
        let mut schema = Schema::clone(&*self.fields_schema()?);
        let mut profile = self.resolve(&schema, target, false).await?;
        self.apply_permissions(mode, &mut schema, &mut profile, actor, Some(target))
            .await?;
        Ok(schema)
    }

    /// Values of `target` that `actor` may view
    pub async fn get_profile_fields(
        &self,
        actor: &UserRef,
        target: &UserRef,
        transform: bool,
    ) -> Result<ProfileView, ProfileError> {
        let mut schema = Schema::clone(&*self.fields_schema()?);
        let mut profile = self.resolve(&schema, target, transform).await?;
        self.apply_permissions(AccessMode::View, &mut schema, &mut profile, actor, Some(target))
            .await?;
        Ok(profile)
    }

    /// Persist the values `actor` may edit on `target`; denied slugs are dropped
    pub async fn update_profile_fields(
        &self,
        actor: &UserRef,
        target: &UserRef,
        data: &Map<String, Value>,
    ) -> Result<Vec<String>, ProfileError> {
        let mut schema = Schema::clone(&*self.fields_schema()?);
        let mut current = self.resolve(&schema, target, false).await?;
        self.apply_permissions(AccessMode::Edit, &mut schema, &mut current, actor, Some(target))
            .await?;
        self.write_changes(target, &current, data).await
    }

    /// Filter `schema` and `profile` in place with the service's authorizer
    pub async fn apply_permissions(
        &self,
        mode: AccessMode,
        schema: &mut Schema,
        profile: &mut ProfileView,
        actor: &UserRef,
        target: Option<&UserRef>,
    ) -> Result<(), ProfileError> {
        apply_permissions(mode, schema, profile, self.authorizer.as_ref(), actor, target).await
    }

    // ===== Operation-level authorization =====

    /// Whether `actor` may use the profile operations of `target` at all
    ///
    /// Own profiles are always reachable. Another user's profile needs
    /// `view_user_field` or `update_user_field` depending on `mode`; field
    /// policies are applied afterwards by the operation itself.
    pub async fn authorize_profile_access(
        &self,
        actor: &UserRef,
        target: &UserRef,
        mode: AccessMode,
    ) -> Result<(), ProfileError> {
        if actor.id == target.id {
            return Ok(());
        }
        let permission = match mode {
            AccessMode::View => DEFAULT_VIEW_PERMISSION,
            AccessMode::Edit => DEFAULT_EDIT_PERMISSION,
        };
        self.require(actor, target, permission).await
    }

    /// Whether `actor` may drop the cached schema
    pub async fn authorize_schema_invalidation(&self, actor: &UserRef) -> Result<(), ProfileError> {
        self.require(actor, actor, SCHEMA_INVALIDATE_PERMISSION).await
    }

    // ===== Helper Methods =====

    async fn require(
        &self,
        actor: &UserRef,
        target: &UserRef,
        permission: &str,
    ) -> Result<(), ProfileError> {
        let granted = self
            .authorizer
            .check_access(actor, permission, &AccessContext { user: target })
            .await
            .map_err(|e| {
                tracing::error!(permission, error = %e, "authorizer failed");
                ProfileError::Authorization(e.to_string())
            })?;

        if granted {
            Ok(())
        } else {
            tracing::debug!(actor_id = %actor.id, target_id = %target.id, permission, "access denied");
            Err(ProfileError::Forbidden {
                permission: permission.to_string(),
            })
        }
    }

    async fn resolve(
        &self,
        schema: &Schema,
        user: &UserRef,
        transform: bool,
    ) -> Result<ProfileView, ProfileError> {
        let stored: HashMap<String, Value> = self
            .repo
            .find_by_owner(USER_OWNER_TYPE, user.id)
            .await
            .map_err(persistence_error)?
            .into_iter()
            .map(|field| (field.slug, field.value))
            .collect();

        Ok(resolve_profile(schema, &stored, transform))
    }

    async fn write_changes(
        &self,
        user: &UserRef,
        current: &ProfileView,
        data: &Map<String, Value>,
    ) -> Result<Vec<String>, ProfileError> {
        let changes = changed_fields(current, data);
        let mut written = Vec::with_capacity(changes.len());

        for (slug, value) in changes {
            let field = StoredFieldValue::for_user(user, slug, value);
            self.repo.upsert(&field).await.map_err(persistence_error)?;
            tracing::debug!(user_id = %user.id, slug = %field.slug, "profile field stored");
            written.push(field.slug);
        }

        if !written.is_empty() {
            tracing::info!(user_id = %user.id, fields = ?written, "profile updated");
        }
        Ok(written)
    }
}

fn persistence_error(e: anyhow::Error) -> ProfileError {
    tracing::error!("Profile storage error: {:?}", e);
    ProfileError::Persistence(e.to_string())
}
