use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use crate::db::DbError;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Category {
    pub id: i64,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Question {
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub category: i64,
    pub difficulty: i32,
}

/// Strictly typed creation payload; a type mismatch anywhere in the body
/// fails deserialization and surfaces as a 422 at the handler.
#[derive(Debug, Clone, Deserialize)]
pub struct QuestionPayload {
    pub question: String,
    pub answer: String,
    pub category: i64,
    pub difficulty: i32,
}

impl Category {
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Category>, DbError> {
        let categories =
            sqlx::query_as::<_, Category>("SELECT id, type FROM categories ORDER BY id")
                .fetch_all(pool)
                .await?;
        Ok(categories)
    }

    pub async fn find(pool: &PgPool, id: i64) -> Result<Option<Category>, DbError> {
        let category = sqlx::query_as::<_, Category>("SELECT id, type FROM categories WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(category)
    }
}

impl Question {
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Question>, DbError> {
        let questions = sqlx::query_as::<_, Question>("SELECT * FROM questions ORDER BY id")
            .fetch_all(pool)
            .await?;
        Ok(questions)
    }

    pub async fn count(pool: &PgPool) -> Result<i64, DbError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM questions")
            .fetch_one(pool)
            .await?;
        Ok(count.0)
    }

    /// Case-insensitive substring search on the question text.
    pub async fn search(pool: &PgPool, term: &str) -> Result<Vec<Question>, DbError> {
        let pattern = format!("%{}%", term);
        let questions =
            sqlx::query_as::<_, Question>("SELECT * FROM questions WHERE question ILIKE $1 ORDER BY id")
                .bind(pattern)
                .fetch_all(pool)
                .await?;
        Ok(questions)
    }

    pub async fn by_category(pool: &PgPool, category: i64) -> Result<Vec<Question>, DbError> {
        let questions =
            sqlx::query_as::<_, Question>("SELECT * FROM questions WHERE category = $1 ORDER BY id")
                .bind(category)
                .fetch_all(pool)
                .await?;
        Ok(questions)
    }

    pub async fn create(pool: &PgPool, payload: &QuestionPayload) -> Result<Question, DbError> {
        let mut tx = pool.begin().await?;
        let question = sqlx::query_as::<_, Question>(
            "INSERT INTO questions (question, answer, category, difficulty) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(&payload.question)
        .bind(&payload.answer)
        .bind(payload.category)
        .bind(payload.difficulty)
        .fetch_one(&mut *tx)
        .await?;
        tx.commit().await?;
        Ok(question)
    }

    pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, DbError> {
        let mut tx = pool.begin().await?;
        let result = sqlx::query("DELETE FROM questions WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }

    /// Questions eligible for the next quiz round: optionally scoped to one
    /// category, excluding ids already asked this round.
    pub async fn quiz_candidates(
        pool: &PgPool,
        category: Option<i64>,
        previous: &[i64],
    ) -> Result<Vec<Question>, DbError> {
        let questions = sqlx::query_as::<_, Question>(
            "SELECT * FROM questions \
             WHERE ($1::BIGINT IS NULL OR category = $1) AND NOT (id = ANY($2)) \
             ORDER BY id",
        )
        .bind(category)
        .bind(previous)
        .fetch_all(pool)
        .await?;
        Ok(questions)
    }
}
