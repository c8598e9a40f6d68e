//! Contract models for the user profile module
//!
//! These models are transport-agnostic and used for inter-module communication.
//! Schema types derive serde because they are read straight from field-definition
//! documents on disk.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Owner type recorded on every stored value that belongs to a user account
pub const USER_OWNER_TYPE: &str = "user";

/// Default permission required to view another user's field
pub const DEFAULT_VIEW_PERMISSION: &str = "view_user_field";

/// Default permission required to edit another user's field
pub const DEFAULT_EDIT_PERMISSION: &str = "update_user_field";

/// Permission required to drop the cached schema
pub const SCHEMA_INVALIDATE_PERMISSION: &str = "clear_cache";

/// Form type whose values are replaced by their option label on display
pub const SELECT_FORM_TYPE: &str = "select";

/// Ordered mapping from field slug to its definition
pub type Schema = IndexMap<String, FieldDefinition>;

/// Ordered mapping from field slug to its resolved value
pub type ProfileView = IndexMap<String, Value>;

/// One custom profile field as declared in a schema document
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FieldDefinition {
    /// How the field is rendered and what it defaults to
    #[serde(default)]
    pub form: FormSpec,

    /// Optional view/edit policy; fields without one are visible to everybody
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permission: Option<PermissionPolicy>,

    /// Anything else the document carries (labels, validators, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Form part of a field definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormSpec {
    #[serde(rename = "type", default = "default_form_type")]
    pub form_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,

    /// Option value to display label, only meaningful for `select`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Map<String, Value>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for FormSpec {
    fn default() -> Self {
        Self {
            form_type: default_form_type(),
            default: None,
            options: None,
            extra: Map::new(),
        }
    }
}

fn default_form_type() -> String {
    "text".to_string()
}

/// Per-field permission policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionPolicy {
    /// Whether users may always view their own value
    #[serde(default = "default_true")]
    pub view_own: bool,

    /// Permission checked when viewing another user's value
    #[serde(default = "default_view_permission")]
    pub view: String,

    /// Whether users may always edit their own value
    #[serde(default = "default_true")]
    pub edit_own: bool,

    /// Permission checked when editing another user's value
    #[serde(default = "default_edit_permission")]
    pub edit: String,
}

impl Default for PermissionPolicy {
    fn default() -> Self {
        Self {
            view_own: true,
            view: default_view_permission(),
            edit_own: true,
            edit: default_edit_permission(),
        }
    }
}

impl PermissionPolicy {
    /// Own-flag and permission name for the given access mode
    pub fn requirement(&self, mode: AccessMode) -> (bool, &str) {
        match mode {
            AccessMode::View => (self.view_own, self.view.as_str()),
            AccessMode::Edit => (self.edit_own, self.edit.as_str()),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_view_permission() -> String {
    DEFAULT_VIEW_PERMISSION.to_string()
}

fn default_edit_permission() -> String {
    DEFAULT_EDIT_PERMISSION.to_string()
}

/// Which half of a permission policy applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessMode {
    #[default]
    View,
    Edit,
}

/// Persisted value of one field for one owner
#[derive(Debug, Clone, PartialEq)]
pub struct StoredFieldValue {
    /// Owner entity type (`"user"` for account profiles)
    pub parent_type: String,
    /// Owner entity identifier
    pub parent_id: Uuid,
    /// Field slug
    pub slug: String,
    pub value: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl StoredFieldValue {
    /// New value owned by a user, timestamped now
    pub fn for_user(user: &UserRef, slug: impl Into<String>, value: Value) -> Self {
        let now = Utc::now();
        Self {
            parent_type: USER_OWNER_TYPE.to_string(),
            parent_id: user.id,
            slug: slug.into(),
            value,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Identity of an acting or target user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserRef {
    pub id: Uuid,
}

impl UserRef {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

/// Context handed to the authorizer alongside the permission name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessContext<'a> {
    /// User whose field is being accessed
    pub user: &'a UserRef,
}
