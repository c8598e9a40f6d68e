//! Contract layer - public API for inter-module communication
//!
//! This layer contains transport-agnostic models and the native client trait.

pub mod client;
pub mod error;
pub mod model;

pub use client::ProfileApi;
pub use error::ProfileError;
pub use model::{
    AccessContext, AccessMode, FieldDefinition, FormSpec, PermissionPolicy, ProfileView, Schema,
    StoredFieldValue, UserRef, DEFAULT_EDIT_PERMISSION, DEFAULT_VIEW_PERMISSION,
    SCHEMA_INVALIDATE_PERMISSION, SELECT_FORM_TYPE, USER_OWNER_TYPE,
};
