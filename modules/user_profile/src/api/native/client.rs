//! Native client implementation - wraps domain service for in-process calls

use crate::contract::{AccessMode, ProfileApi, ProfileError, ProfileView, Schema, UserRef};
use crate::domain::Service;
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::sync::Arc;

/// Native client implementation that directly calls the domain service
#[derive(Clone)]
pub struct NativeClient {
    service: Arc<Service>,
}

impl NativeClient {
    /// Create a new native client
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl ProfileApi for NativeClient {
    async fn fields_schema(&self) -> Result<Arc<Schema>, ProfileError> {
        self.service.fields_schema()
    }

    async fn invalidate_schema_cache(&self) -> Result<(), ProfileError> {
        self.service.invalidate_schema_cache();
        Ok(())
    }

    async fn filtered_schema(
        &self,
        actor: &UserRef,
        target: &UserRef,
        mode: AccessMode,
    ) -> Result<Schema, ProfileError> {
        self.service.filtered_schema(actor, target, mode).await
    }

    async fn get_profile(
        &self,
        user: &UserRef,
        transform: bool,
    ) -> Result<ProfileView, ProfileError> {
        self.service.get_profile(user, transform).await
    }

    async fn set_profile(
        &self,
        user: &UserRef,
        data: &Map<String, Value>,
    ) -> Result<(), ProfileError> {
        self.service.set_profile(user, data).await.map(|_| ())
    }

    async fn get_profile_fields(
        &self,
        actor: &UserRef,
        target: &UserRef,
        transform: bool,
    ) -> Result<ProfileView, ProfileError> {
        self.service.get_profile_fields(actor, target, transform).await
    }

    async fn update_profile_fields(
        &self,
        actor: &UserRef,
        target: &UserRef,
        data: &Map<String, Value>,
    ) -> Result<Vec<String>, ProfileError> {
        self.service.update_profile_fields(actor, target, data).await
    }
}
