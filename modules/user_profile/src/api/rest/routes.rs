//! Route registration
//!
//! The acting user is expected as an `Extension<UserRef>` installed by the
//! authentication layer in front of these routes.

use super::{dto::*, error::Problem, handlers};
use crate::contract::UserRef;
use crate::domain::Service;
use axum::{
    extract::{Path, Query},
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};
use std::sync::Arc;
use uuid::Uuid;

/// Register all REST routes
pub fn register_routes(router: Router, service: Arc<Service>) -> Router {
    router
        .route(
            "/users/{user_id}/profile",
            get(get_profile_fields_handler).put(update_profile_fields_handler),
        )
        .route("/users/{user_id}/profile/schema", get(get_schema_handler))
        .route("/profile/schema/invalidate", post(invalidate_schema_handler))
        // Add service as extension for handlers
        .layer(Extension(service))
}

// ===== Handler wrappers that extract service from Extension =====

async fn get_profile_fields_handler(
    Extension(service): Extension<Arc<Service>>,
    Extension(actor): Extension<UserRef>,
    path: Path<Uuid>,
    query: Query<GetProfileQuery>,
) -> Result<Json<ProfileFieldsResponse>, Problem> {
    handlers::get_profile_fields(service, actor, path, query).await
}

async fn update_profile_fields_handler(
    Extension(service): Extension<Arc<Service>>,
    Extension(actor): Extension<UserRef>,
    path: Path<Uuid>,
    body: Json<UpdateProfileRequest>,
) -> Result<Json<UpdateProfileResponse>, Problem> {
    handlers::update_profile_fields(service, actor, path, body).await
}

async fn get_schema_handler(
    Extension(service): Extension<Arc<Service>>,
    Extension(actor): Extension<UserRef>,
    path: Path<Uuid>,
    query: Query<GetSchemaQuery>,
) -> Result<Json<SchemaResponse>, Problem> {
    handlers::get_schema(service, actor, path, query).await
}

async fn invalidate_schema_handler(
    Extension(service): Extension<Arc<Service>>,
    Extension(actor): Extension<UserRef>,
) -> Result<StatusCode, Problem> {
    handlers::invalidate_schema(service, actor).await
}
