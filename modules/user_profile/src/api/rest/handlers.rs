//! HTTP request handlers - thin layer that delegates to domain service

use super::{
    dto::*,
    error::{map_domain_error, Problem},
};
use crate::contract::{AccessMode, UserRef};
use crate::domain::Service;
use axum::{
    extract::{Path, Query},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

// ===== Profile Handlers =====

/// Profile values of `user_id` that the acting user may view
pub async fn get_profile_fields(
    service: Arc<Service>,
    actor: UserRef,
    Path(user_id): Path<Uuid>,
    Query(query): Query<GetProfileQuery>,
) -> Result<Json<ProfileFieldsResponse>, Problem> {
    let target = UserRef::new(user_id);
    service
        .authorize_profile_access(&actor, &target, AccessMode::View)
        .await
        .map_err(map_domain_error)?;

    let profile = service
        .get_profile_fields(&actor, &target, query.transform)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(profile.into()))
}

/// Update the fields of `user_id` that the acting user may edit
pub async fn update_profile_fields(
    service: Arc<Service>,
    actor: UserRef,
    Path(user_id): Path<Uuid>,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<UpdateProfileResponse>, Problem> {
    let target = UserRef::new(user_id);
    service
        .authorize_profile_access(&actor, &target, AccessMode::Edit)
        .await
        .map_err(map_domain_error)?;

    let updated = service
        .update_profile_fields(&actor, &target, &req.fields)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(UpdateProfileResponse { updated }))
}

// ===== Schema Handlers =====

/// Field definitions the acting user may view or edit on `user_id`
pub async fn get_schema(
    service: Arc<Service>,
    actor: UserRef,
    Path(user_id): Path<Uuid>,
    Query(query): Query<GetSchemaQuery>,
) -> Result<Json<SchemaResponse>, Problem> {
    let target = UserRef::new(user_id);
    service
        .authorize_profile_access(&actor, &target, query.mode)
        .await
        .map_err(map_domain_error)?;

    let schema = service
        .filtered_schema(&actor, &target, query.mode)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(schema.into()))
}

/// Reload schema documents on next access
pub async fn invalidate_schema(service: Arc<Service>, actor: UserRef) -> Result<StatusCode, Problem> {
    service
        .authorize_schema_invalidation(&actor)
        .await
        .map_err(map_domain_error)?;

    service.invalidate_schema_cache();
    Ok(StatusCode::NO_CONTENT)
}
