use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use crate::db::DbError;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Actor {
    pub id: i64,
    pub name: String,
    pub age: i32,
    pub gender: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Movie {
    pub id: i64,
    pub title: String,
    pub release_date: String,
}

/// Strictly typed creation payloads; missing fields or type mismatches fail
/// deserialization and surface as a 422 at the handler.
#[derive(Debug, Clone, Deserialize)]
pub struct ActorPayload {
    pub name: String,
    pub age: i32,
    pub gender: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MoviePayload {
    pub title: String,
    pub release_date: String,
}

/// Partial-update payloads: only provided fields change.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActorPatch {
    pub name: Option<String>,
    pub age: Option<i32>,
    pub gender: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MoviePatch {
    pub title: Option<String>,
    pub release_date: Option<String>,
}

impl Actor {
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Actor>, DbError> {
        let actors = sqlx::query_as::<_, Actor>("SELECT * FROM actors ORDER BY id")
            .fetch_all(pool)
            .await?;
        Ok(actors)
    }

    pub async fn create(pool: &PgPool, payload: &ActorPayload) -> Result<Actor, DbError> {
        let mut tx = pool.begin().await?;
        let actor = sqlx::query_as::<_, Actor>(
            "INSERT INTO actors (name, age, gender) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(&payload.name)
        .bind(payload.age)
        .bind(&payload.gender)
        .fetch_one(&mut *tx)
        .await?;
        tx.commit().await?;
        Ok(actor)
    }

    pub async fn update(pool: &PgPool, id: i64, patch: &ActorPatch) -> Result<Actor, DbError> {
        let mut tx = pool.begin().await?;
        let actor = sqlx::query_as::<_, Actor>(
            "UPDATE actors SET \
             name = COALESCE($2, name), age = COALESCE($3, age), gender = COALESCE($4, gender) \
             WHERE id = $1 \
             RETURNING *",
        )
        .bind(id)
        .bind(&patch.name)
        .bind(patch.age)
        .bind(&patch.gender)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| DbError::NotFound(format!("Actor {} not found", id)))?;
        tx.commit().await?;
        Ok(actor)
    }

    pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, DbError> {
        let mut tx = pool.begin().await?;
        let result = sqlx::query("DELETE FROM actors WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }
}

impl Movie {
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Movie>, DbError> {
        let movies = sqlx::query_as::<_, Movie>("SELECT * FROM movies ORDER BY id")
            .fetch_all(pool)
            .await?;
        Ok(movies)
    }

    pub async fn create(pool: &PgPool, payload: &MoviePayload) -> Result<Movie, DbError> {
        let mut tx = pool.begin().await?;
        let movie = sqlx::query_as::<_, Movie>(
            "INSERT INTO movies (title, release_date) VALUES ($1, $2) RETURNING *",
        )
        .bind(&payload.title)
        .bind(&payload.release_date)
        .fetch_one(&mut *tx)
        .await?;
        tx.commit().await?;
        Ok(movie)
    }

    pub async fn update(pool: &PgPool, id: i64, patch: &MoviePatch) -> Result<Movie, DbError> {
        let mut tx = pool.begin().await?;
        let movie = sqlx::query_as::<_, Movie>(
            "UPDATE movies SET \
             title = COALESCE($2, title), release_date = COALESCE($3, release_date) \
             WHERE id = $1 \
             RETURNING *",
        )
        .bind(id)
        .bind(&patch.title)
        .bind(&patch.release_date)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| DbError::NotFound(format!("Movie {} not found", id)))?;
        tx.commit().await?;
        Ok(movie)
    }

    pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, DbError> {
        let mut tx = pool.begin().await?;
        let result = sqlx::query("DELETE FROM movies WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }
}
