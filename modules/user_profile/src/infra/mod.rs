//! Infrastructure layer - storage and collaborator implementations

pub mod cache;
pub mod locator;
pub mod storage;

pub use cache::InMemorySchemaCache;
pub use locator::FsResourceLocator;
