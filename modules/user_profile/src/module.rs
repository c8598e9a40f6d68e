//! Module wiring and lifecycle

use crate::api::native::NativeClient;
use crate::config::Config;
use crate::contract::ProfileApi;
use crate::domain::{Authorizer, ProfileFieldRepository, ResourceLocator, SchemaCache, SchemaLoader, Service};
use crate::infra::storage::{Migrator, SeaOrmProfileFieldRepository};
use crate::infra::{FsResourceLocator, InMemorySchemaCache};
use anyhow::Result;
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use std::sync::Arc;

/// User profile module
pub struct UserProfileModule {
    config: Config,
    service: Arc<Service>,
}

impl UserProfileModule {
    /// Build the module on a database connection with filesystem schema discovery
    pub fn init(
        config: Config,
        db: Arc<DatabaseConnection>,
        authorizer: Arc<dyn Authorizer>,
    ) -> Self {
        let repo = Arc::new(SeaOrmProfileFieldRepository::new(db));
        let locator = Arc::new(FsResourceLocator::new(config.schema.search_paths.clone()));
        let cache = Arc::new(InMemorySchemaCache::new());
        Self::with_components(config, repo, locator, cache, authorizer)
    }

    /// Build the module from explicit collaborators
    pub fn with_components(
        config: Config,
        repo: Arc<dyn ProfileFieldRepository>,
        locator: Arc<dyn ResourceLocator>,
        cache: Arc<dyn SchemaCache>,
        authorizer: Arc<dyn Authorizer>,
    ) -> Self {
        let schema_loader = Arc::new(SchemaLoader::new(&config, locator, cache));
        let service = Arc::new(Service::new(repo, schema_loader, authorizer));

        tracing::info!(
            namespace = %config.schema.namespace,
            cache = config.custom_profile.cache,
            "User profile module initialized"
        );
        Self { config, service }
    }

    /// Create or upgrade the `profile_fields` table
    pub async fn migrate(db: &DatabaseConnection) -> Result<()> {
        Migrator::up(db, None).await?;
        tracing::info!("User profile migrations completed");
        Ok(())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn service(&self) -> Arc<Service> {
        self.service.clone()
    }

    /// Client for in-process callers
    pub fn client(&self) -> Arc<dyn ProfileApi> {
        Arc::new(NativeClient::new(self.service.clone()))
    }

    /// Mount the REST routes on `router`
    pub fn register_rest(&self, router: axum::Router) -> axum::Router {
        tracing::info!("Registering user profile REST routes");
        crate::api::rest::routes::register_routes(router, self.service.clone())
    }
}
