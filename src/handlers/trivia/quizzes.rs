use rand::Rng;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::db::models::trivia::Question;
use crate::db::Database;
use crate::error::ApiError;
use crate::middleware::{ApiJson, ApiResponse, ApiResult};

#[derive(Debug, Default, Deserialize)]
pub struct QuizBody {
    #[serde(default)]
    pub previous_questions: Vec<i64>,
    pub quiz_category: Option<Value>,
}

/// The frontend sends the category id as either a number or a string;
/// id 0 means "all categories".
fn category_from(quiz_category: Option<&Value>) -> Result<Option<i64>, ApiError> {
    let Some(category) = quiz_category else {
        return Ok(None);
    };
    let id = category
        .get("id")
        .and_then(|id| id.as_i64().or_else(|| id.as_str().and_then(|s| s.parse().ok())))
        .ok_or_else(|| ApiError::bad_request("quiz_category.id is required"))?;
    Ok(if id == 0 { None } else { Some(id) })
}

/// POST /quizzes - one random question from the category that has not been
/// asked yet this round; null once the category is exhausted
pub async fn play(ApiJson(body): ApiJson<QuizBody>) -> ApiResult {
    let category = category_from(body.quiz_category.as_ref())?;

    let pool = Database::pool().await?;
    let candidates = Question::quiz_candidates(&pool, category, &body.previous_questions).await?;

    if candidates.is_empty() {
        return Ok(ApiResponse::success(json!({ "question": Value::Null })));
    }

    let pick = rand::thread_rng().gen_range(0..candidates.len());
    Ok(ApiResponse::success(json!({ "question": candidates[pick] })))
}
