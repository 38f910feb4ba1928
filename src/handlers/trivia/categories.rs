use axum::extract::Path;
use serde_json::json;

use super::categories_map;
use crate::db::models::trivia::{Category, Question};
use crate::db::Database;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};

/// GET /categories - all categories as an id-keyed object
pub async fn list() -> ApiResult {
    let pool = Database::pool().await?;
    let categories = Category::list_all(&pool).await?;

    Ok(ApiResponse::success(json!({
        "categories": categories_map(&categories),
    })))
}

/// GET /categories/:id/questions - every question in one category
pub async fn questions(Path(category_id): Path<i64>) -> ApiResult {
    let pool = Database::pool().await?;

    let category = Category::find(&pool, category_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Category {} not found", category_id)))?;

    let questions = Question::by_category(&pool, category_id).await?;
    let categories = Category::list_all(&pool).await?;

    Ok(ApiResponse::success(json!({
        "questions": questions,
        "total_questions": questions.len(),
        "categories": categories_map(&categories),
        "current_category": category.kind,
    })))
}
