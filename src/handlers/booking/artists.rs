use axum::extract::Path;
use chrono::Utc;
use serde_json::{json, Value};

use super::venues::SearchBody;
use crate::db::models::artist::{Artist, ArtistPayload};
use crate::db::models::show::{partition_by_time, Show};
use crate::db::Database;
use crate::error::ApiError;
use crate::middleware::{ApiJson, ApiResponse, ApiResult};

/// GET /artists - all artists
pub async fn list() -> ApiResult {
    let pool = Database::pool().await?;
    let artists = Artist::list_all(&pool).await?;
    Ok(ApiResponse::success(json!({ "artists": artists })))
}

/// POST /artists/search - case-insensitive substring match on artist name
pub async fn search(ApiJson(body): ApiJson<SearchBody>) -> ApiResult {
    let term = body
        .search_term
        .ok_or_else(|| ApiError::bad_request("search_term is required"))?;

    let pool = Database::pool().await?;
    let artists = Artist::search(&pool, &term).await?;

    Ok(ApiResponse::success(json!({
        "count": artists.len(),
        "artists": artists,
    })))
}

/// GET /artists/:id - artist detail with shows split into past and upcoming
pub async fn detail(Path(artist_id): Path<i64>) -> ApiResult {
    let pool = Database::pool().await?;

    let artist = Artist::find(&pool, artist_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Artist {} not found", artist_id)))?;

    let shows = Show::for_artist(&pool, artist_id).await?;
    let now = Utc::now().naive_utc();
    let (past, upcoming) = partition_by_time(shows, now, |s| s.start_time.as_str());

    let mut body = serde_json::to_value(&artist)?;
    let detail = body
        .as_object_mut()
        .ok_or_else(|| ApiError::internal_server_error("artist did not serialize to an object"))?;
    detail.insert("past_shows_count".to_string(), json!(past.len()));
    detail.insert("upcoming_shows_count".to_string(), json!(upcoming.len()));
    detail.insert("past_shows".to_string(), json!(past));
    detail.insert("upcoming_shows".to_string(), json!(upcoming));

    Ok(ApiResponse::success(json!({ "artist": body })))
}

/// POST /artists - create an artist
pub async fn create(ApiJson(payload): ApiJson<Value>) -> ApiResult {
    let payload: ArtistPayload =
        serde_json::from_value(payload).map_err(|e| ApiError::bad_request(e.to_string()))?;
    payload
        .validate()
        .map_err(|field_errors| ApiError::validation_error("Missing required fields", field_errors))?;

    let pool = Database::pool().await?;
    let artist = Artist::create(&pool, &payload).await?;

    tracing::info!(artist_id = artist.id, "artist listed");
    Ok(ApiResponse::created(json!({ "artist": artist })))
}

/// PUT /artists/:id - full update; every submitted field overwrites
pub async fn update(Path(artist_id): Path<i64>, ApiJson(payload): ApiJson<Value>) -> ApiResult {
    let payload: ArtistPayload =
        serde_json::from_value(payload).map_err(|e| ApiError::bad_request(e.to_string()))?;
    payload
        .validate()
        .map_err(|field_errors| ApiError::validation_error("Missing required fields", field_errors))?;

    let pool = Database::pool().await?;
    let artist = Artist::update(&pool, artist_id, &payload).await?;

    Ok(ApiResponse::success(json!({ "artist": artist })))
}

/// DELETE /artists/:id - delete an artist and, via cascade, its shows
pub async fn delete(Path(artist_id): Path<i64>) -> ApiResult {
    let pool = Database::pool().await?;

    if !Artist::delete(&pool, artist_id).await? {
        return Err(ApiError::not_found(format!("Artist {} not found", artist_id)));
    }

    tracing::info!(artist_id, "artist deleted");
    Ok(ApiResponse::success(json!({ "deleted": artist_id })))
}
