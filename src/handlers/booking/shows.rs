use serde_json::{json, Value};

use crate::db::models::show::{Show, ShowPayload};
use crate::db::Database;
use crate::error::ApiError;
use crate::middleware::{ApiJson, ApiResponse, ApiResult};

/// GET /shows - all shows joined with their venue and artist
pub async fn list() -> ApiResult {
    let pool = Database::pool().await?;
    let shows = Show::list_all(&pool).await?;
    Ok(ApiResponse::success(json!({ "shows": shows })))
}

/// POST /shows - create a show; both parents must exist
pub async fn create(ApiJson(payload): ApiJson<Value>) -> ApiResult {
    let payload: ShowPayload =
        serde_json::from_value(payload).map_err(|e| ApiError::bad_request(e.to_string()))?;
    payload
        .validate()
        .map_err(|field_errors| ApiError::validation_error("Missing required fields", field_errors))?;

    let pool = Database::pool().await?;
    // A nonexistent venue or artist trips the foreign key and maps to 422
    let show = Show::create(&pool, &payload).await?;

    tracing::info!(show_id = show.id, "show listed");
    Ok(ApiResponse::created(json!({ "show": show })))
}
