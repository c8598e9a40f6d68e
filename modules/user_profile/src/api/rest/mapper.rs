//! Mapper implementations for converting between DTOs and contract models

use super::dto::*;
use crate::contract::{FieldDefinition, ProfileView, Schema};
use serde_json::Map;

impl From<ProfileView> for ProfileFieldsResponse {
    fn from(profile: ProfileView) -> Self {
        Self {
            fields: profile.into_iter().collect(),
        }
    }
}

impl From<(String, FieldDefinition)> for FieldDefinitionDto {
    fn from((slug, field): (String, FieldDefinition)) -> Self {
        let mut attributes = Map::new();
        attributes.extend(field.extra);
        attributes.extend(field.form.extra);

        Self {
            slug,
            form_type: field.form.form_type,
            default: field.form.default,
            options: field.form.options,
            attributes,
        }
    }
}

impl From<Schema> for SchemaResponse {
    fn from(schema: Schema) -> Self {
        let items: Vec<FieldDefinitionDto> = schema.into_iter().map(Into::into).collect();
        let total = items.len();
        Self { items, total }
    }
}
