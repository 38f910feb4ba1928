use axum::extract::{Extension, Path};
use serde_json::{json, Value};

use crate::db::models::agency::{Movie, MoviePatch, MoviePayload};
use crate::db::Database;
use crate::error::ApiError;
use crate::middleware::{ApiJson, ApiResponse, ApiResult, AuthUser};

/// GET /movies - requires get:movies
pub async fn list(Extension(auth): Extension<AuthUser>) -> ApiResult {
    auth.require("get:movies")?;

    let pool = Database::pool().await?;
    let movies = Movie::list_all(&pool).await?;

    Ok(ApiResponse::success(json!({ "movies": movies })))
}

/// POST /movies - requires post:movies
pub async fn create(
    Extension(auth): Extension<AuthUser>,
    ApiJson(payload): ApiJson<Value>,
) -> ApiResult {
    auth.require("post:movies")?;

    let payload: MoviePayload =
        serde_json::from_value(payload).map_err(|_| ApiError::unprocessable_entity("unprocessable"))?;

    let pool = Database::pool().await?;
    let movie = Movie::create(&pool, &payload).await?;

    tracing::info!(movie_id = movie.id, "movie created");
    Ok(ApiResponse::created(json!({ "movie": movie })))
}

/// PATCH /movies/:id - partial update, requires patch:movies
pub async fn update(
    Extension(auth): Extension<AuthUser>,
    Path(movie_id): Path<i64>,
    ApiJson(payload): ApiJson<Value>,
) -> ApiResult {
    auth.require("patch:movies")?;

    let patch: MoviePatch =
        serde_json::from_value(payload).map_err(|_| ApiError::unprocessable_entity("unprocessable"))?;

    let pool = Database::pool().await?;
    let movie = Movie::update(&pool, movie_id, &patch).await?;

    Ok(ApiResponse::success(json!({ "movie": movie })))
}

/// DELETE /movies/:id - requires delete:movies
pub async fn delete(Extension(auth): Extension<AuthUser>, Path(movie_id): Path<i64>) -> ApiResult {
    auth.require("delete:movies")?;

    let pool = Database::pool().await?;
    if !Movie::delete(&pool, movie_id).await? {
        return Err(ApiError::not_found(format!("Movie {} not found", movie_id)));
    }

    tracing::info!(movie_id, "movie deleted");
    Ok(ApiResponse::success(json!({ "deleted": movie_id })))
}
