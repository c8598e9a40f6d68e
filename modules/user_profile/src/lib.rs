//! User Profile Module
//!
//! Administrator-defined custom profile fields for user accounts. Field
//! definitions come from schema documents on disk; per-user values are stored
//! in the `profile_fields` table and filtered by per-field view/edit policies.

// Public exports
pub mod contract;
pub use contract::{
    client::ProfileApi, error::ProfileError, AccessMode, FieldDefinition, FormSpec,
    PermissionPolicy, ProfileView, Schema, StoredFieldValue, UserRef,
};

pub mod config;
pub use config::Config;

pub mod module;
pub use module::UserProfileModule;

// Internal modules (hidden from public API)
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;
