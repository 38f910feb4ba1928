use axum::extract::{Path, Query};
use serde::Deserialize;
use serde_json::{json, Value};

use super::categories_map;
use crate::config;
use crate::db::models::trivia::{Category, Question, QuestionPayload};
use crate::db::Database;
use crate::error::ApiError;
use crate::middleware::{ApiJson, ApiResponse, ApiResult};
use crate::pagination::paginate;

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}

/// Missing, non-numeric, zero or negative page values fall back to the
/// first page; the frontends pass whatever is in the URL bar through.
fn page_number(raw: Option<&str>) -> usize {
    raw.and_then(|s| s.trim().parse::<i64>().ok()).unwrap_or(1).max(1) as usize
}

#[derive(Debug, Deserialize)]
pub struct SearchBody {
    #[serde(rename = "searchTerm")]
    pub search_term: Option<String>,
}

/// GET /questions?page=N - fixed pages of questions_per_page, 1-indexed.
/// A page past the end returns an empty list, not an error.
pub async fn list(Query(query): Query<PageQuery>) -> ApiResult {
    let pool = Database::pool().await?;

    let questions = Question::list_all(&pool).await?;
    let categories = Category::list_all(&pool).await?;

    let per_page = config::config().trivia.questions_per_page;
    let page = paginate(&questions, page_number(query.page.as_deref()), per_page);

    Ok(ApiResponse::success(json!({
        "questions": page,
        "total_questions": questions.len(),
        "categories": categories_map(&categories),
        "current_category": Value::Null,
    })))
}

/// POST /questions - create a question; type coercion failures are a 422
pub async fn create(ApiJson(payload): ApiJson<Value>) -> ApiResult {
    let payload: QuestionPayload =
        serde_json::from_value(payload).map_err(|_| ApiError::unprocessable_entity("unprocessable"))?;

    let pool = Database::pool().await?;
    let question = Question::create(&pool, &payload).await?;

    tracing::info!(question_id = question.id, "question created");
    Ok(ApiResponse::created(json!({ "question": question })))
}

/// DELETE /questions/:id - missing id is a 404, not a data-layer failure
pub async fn delete(Path(question_id): Path<i64>) -> ApiResult {
    let pool = Database::pool().await?;

    if !Question::delete(&pool, question_id).await? {
        return Err(ApiError::not_found(format!("Question {} not found", question_id)));
    }

    let total = Question::count(&pool).await?;
    Ok(ApiResponse::success(json!({
        "deleted": question_id,
        "total_questions": total,
    })))
}

/// POST /questions/search - case-insensitive substring on question text;
/// zero matches is a 404
pub async fn search(ApiJson(body): ApiJson<SearchBody>) -> ApiResult {
    let term = body
        .search_term
        .ok_or_else(|| ApiError::bad_request("searchTerm is required"))?;

    let pool = Database::pool().await?;
    let questions = Question::search(&pool, &term).await?;

    if questions.is_empty() {
        return Err(ApiError::not_found("resource not found"));
    }

    Ok(ApiResponse::success(json!({
        "questions": questions,
        "total_questions": questions.len(),
        "current_category": Value::Null,
    })))
}

#[cfg(test)]
mod tests {
    use super::page_number;

    #[test]
    fn page_defaults_to_one() {
        assert_eq!(page_number(None), 1);
    }

    #[test]
    fn non_numeric_page_falls_back_to_one() {
        assert_eq!(page_number(Some("abc")), 1);
        assert_eq!(page_number(Some("")), 1);
    }

    #[test]
    fn zero_and_negative_pages_clamp_to_one() {
        assert_eq!(page_number(Some("0")), 1);
        assert_eq!(page_number(Some("-3")), 1);
    }

    #[test]
    fn numeric_page_parses() {
        assert_eq!(page_number(Some("2")), 2);
        assert_eq!(page_number(Some(" 2 ")), 2);
    }
}
