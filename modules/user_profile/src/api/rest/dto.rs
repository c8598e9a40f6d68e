//! REST DTOs with serde derives for HTTP API

use crate::contract::AccessMode;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

// ===== Profile DTOs =====

/// Resolved profile values visible to the caller
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProfileFieldsResponse {
    /// Field slug to value, in schema order
    #[schema(value_type = Object)]
    pub fields: Map<String, Value>,
}

/// Profile update request
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateProfileRequest {
    /// Field slug to submitted value; slugs left out are not touched
    #[schema(value_type = Object)]
    pub fields: Map<String, Value>,
}

/// Result of a profile update
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateProfileResponse {
    /// Slugs whose value was written
    pub updated: Vec<String>,
}

// ===== Schema DTOs =====

/// One field definition as exposed to form renderers
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FieldDefinitionDto {
    /// Field slug
    #[schema(example = "nickname")]
    pub slug: String,

    /// Form type (text, select, ...)
    #[schema(example = "select")]
    pub form_type: String,

    /// Default value when the user has none stored
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub default: Option<Value>,

    /// Option value to label
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub options: Option<Map<String, Value>>,

    /// Remaining form attributes (labels, placeholders, validators)
    #[serde(skip_serializing_if = "Map::is_empty")]
    #[schema(value_type = Object)]
    pub attributes: Map<String, Value>,
}

/// Filtered schema response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SchemaResponse {
    pub items: Vec<FieldDefinitionDto>,
    pub total: usize,
}

// ===== Query parameters =====

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GetProfileQuery {
    /// Replace select values with their labels
    #[serde(default)]
    pub transform: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GetSchemaQuery {
    #[serde(default)]
    pub mode: AccessMode,
}
