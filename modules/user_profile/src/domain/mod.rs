//! Domain layer - business logic and services

pub mod permissions;
pub mod profile;
pub mod repository;
pub mod schema;
pub mod service;

pub use permissions::{AllowAllAuthorizer, Authorizer, DenyAllAuthorizer};
pub use repository::ProfileFieldRepository;
pub use schema::{ResourceLocator, SchemaCache, SchemaLoader, SCHEMA_CACHE_KEY};
pub use service::Service;
