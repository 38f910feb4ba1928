use axum::extract::Path;
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::db::models::show::{partition_by_time, Show};
use crate::db::models::venue::{Venue, VenuePayload};
use crate::db::Database;
use crate::error::ApiError;
use crate::middleware::{ApiJson, ApiResponse, ApiResult};

#[derive(Debug, Deserialize)]
pub struct SearchBody {
    pub search_term: Option<String>,
}

/// GET /venues - venues grouped by (city, state)
pub async fn list() -> ApiResult {
    let pool = Database::pool().await?;

    let mut areas = Vec::new();
    for area in Venue::areas(&pool).await? {
        let venues = Venue::by_area(&pool, &area.city, &area.state).await?;
        areas.push(json!({
            "city": area.city,
            "state": area.state,
            "venues": venues,
        }));
    }

    Ok(ApiResponse::success(json!({ "areas": areas })))
}

/// POST /venues/search - case-insensitive substring match on venue name
pub async fn search(ApiJson(body): ApiJson<SearchBody>) -> ApiResult {
    let term = body
        .search_term
        .ok_or_else(|| ApiError::bad_request("search_term is required"))?;

    let pool = Database::pool().await?;
    let venues = Venue::search(&pool, &term).await?;

    Ok(ApiResponse::success(json!({
        "count": venues.len(),
        "venues": venues,
    })))
}

/// GET /venues/:id - venue detail with shows split into past and upcoming
pub async fn detail(Path(venue_id): Path<i64>) -> ApiResult {
    let pool = Database::pool().await?;

    let venue = Venue::find(&pool, venue_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Venue {} not found", venue_id)))?;

    let shows = Show::for_venue(&pool, venue_id).await?;
    let now = Utc::now().naive_utc();
    let (past, upcoming) = partition_by_time(shows, now, |s| s.start_time.as_str());

    let mut body = serde_json::to_value(&venue)?;
    let detail = body
        .as_object_mut()
        .ok_or_else(|| ApiError::internal_server_error("venue did not serialize to an object"))?;
    detail.insert("past_shows_count".to_string(), json!(past.len()));
    detail.insert("upcoming_shows_count".to_string(), json!(upcoming.len()));
    detail.insert("past_shows".to_string(), json!(past));
    detail.insert("upcoming_shows".to_string(), json!(upcoming));

    Ok(ApiResponse::success(json!({ "venue": body })))
}

/// POST /venues - create a venue
pub async fn create(ApiJson(payload): ApiJson<Value>) -> ApiResult {
    let payload: VenuePayload =
        serde_json::from_value(payload).map_err(|e| ApiError::bad_request(e.to_string()))?;
    payload
        .validate()
        .map_err(|field_errors| ApiError::validation_error("Missing required fields", field_errors))?;

    let pool = Database::pool().await?;
    let venue = Venue::create(&pool, &payload).await?;

    tracing::info!(venue_id = venue.id, "venue listed");
    Ok(ApiResponse::created(json!({ "venue": venue })))
}

/// PUT /venues/:id - full update; every submitted field overwrites
pub async fn update(Path(venue_id): Path<i64>, ApiJson(payload): ApiJson<Value>) -> ApiResult {
    let payload: VenuePayload =
        serde_json::from_value(payload).map_err(|e| ApiError::bad_request(e.to_string()))?;
    payload
        .validate()
        .map_err(|field_errors| ApiError::validation_error("Missing required fields", field_errors))?;

    let pool = Database::pool().await?;
    let venue = Venue::update(&pool, venue_id, &payload).await?;

    Ok(ApiResponse::success(json!({ "venue": venue })))
}

/// DELETE /venues/:id - delete a venue and, via cascade, its shows
pub async fn delete(Path(venue_id): Path<i64>) -> ApiResult {
    let pool = Database::pool().await?;

    if !Venue::delete(&pool, venue_id).await? {
        return Err(ApiError::not_found(format!("Venue {} not found", venue_id)));
    }

    tracing::info!(venue_id, "venue deleted");
    Ok(ApiResponse::success(json!({ "deleted": venue_id })))
}
