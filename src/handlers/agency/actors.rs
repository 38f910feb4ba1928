use axum::extract::{Extension, Path};
use serde_json::{json, Value};

use crate::db::models::agency::{Actor, ActorPatch, ActorPayload};
use crate::db::Database;
use crate::error::ApiError;
use crate::middleware::{ApiJson, ApiResponse, ApiResult, AuthUser};

/// GET /actors - requires get:actors
pub async fn list(Extension(auth): Extension<AuthUser>) -> ApiResult {
    auth.require("get:actors")?;

    let pool = Database::pool().await?;
    let actors = Actor::list_all(&pool).await?;

    Ok(ApiResponse::success(json!({ "actors": actors })))
}

/// POST /actors - requires post:actors
pub async fn create(
    Extension(auth): Extension<AuthUser>,
    ApiJson(payload): ApiJson<Value>,
) -> ApiResult {
    auth.require("post:actors")?;

    let payload: ActorPayload =
        serde_json::from_value(payload).map_err(|_| ApiError::unprocessable_entity("unprocessable"))?;

    let pool = Database::pool().await?;
    let actor = Actor::create(&pool, &payload).await?;

    tracing::info!(actor_id = actor.id, "actor created");
    Ok(ApiResponse::created(json!({ "actor": actor })))
}

/// PATCH /actors/:id - partial update, requires patch:actors
pub async fn update(
    Extension(auth): Extension<AuthUser>,
    Path(actor_id): Path<i64>,
    ApiJson(payload): ApiJson<Value>,
) -> ApiResult {
    auth.require("patch:actors")?;

    let patch: ActorPatch =
        serde_json::from_value(payload).map_err(|_| ApiError::unprocessable_entity("unprocessable"))?;

    let pool = Database::pool().await?;
    let actor = Actor::update(&pool, actor_id, &patch).await?;

    Ok(ApiResponse::success(json!({ "actor": actor })))
}

/// DELETE /actors/:id - requires delete:actors
pub async fn delete(Extension(auth): Extension<AuthUser>, Path(actor_id): Path<i64>) -> ApiResult {
    auth.require("delete:actors")?;

    let pool = Database::pool().await?;
    if !Actor::delete(&pool, actor_id).await? {
        return Err(ApiError::not_found(format!("Actor {} not found", actor_id)));
    }

    tracing::info!(actor_id, "actor deleted");
    Ok(ApiResponse::success(json!({ "deleted": actor_id })))
}
