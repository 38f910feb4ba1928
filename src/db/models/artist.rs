use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use std::collections::HashMap;

use crate::db::DbError;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Artist {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub state: String,
    pub genres: Vec<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub facebook_link: Option<String>,
    pub image_link: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArtistPayload {
    pub name: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub genres: Option<Vec<String>>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub facebook_link: Option<String>,
    pub image_link: Option<String>,
    pub seeking_venue: Option<bool>,
    pub seeking_description: Option<String>,
}

impl ArtistPayload {
    pub fn validate(&self) -> Result<(), HashMap<String, String>> {
        let mut field_errors = HashMap::new();

        for (field, value) in [
            ("name", &self.name),
            ("city", &self.city),
            ("state", &self.state),
        ] {
            if value.as_deref().map(str::trim).unwrap_or("").is_empty() {
                field_errors.insert(field.to_string(), "This field is required".to_string());
            }
        }
        if self.genres.as_deref().unwrap_or(&[]).is_empty() {
            field_errors.insert("genres".to_string(), "At least one genre is required".to_string());
        }

        if field_errors.is_empty() {
            Ok(())
        } else {
            Err(field_errors)
        }
    }
}

impl Artist {
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Artist>, DbError> {
        let artists = sqlx::query_as::<_, Artist>("SELECT * FROM artists ORDER BY id")
            .fetch_all(pool)
            .await?;
        Ok(artists)
    }

    /// Case-insensitive substring search on the artist name.
    pub async fn search(pool: &PgPool, term: &str) -> Result<Vec<Artist>, DbError> {
        let pattern = format!("%{}%", term);
        let artists =
            sqlx::query_as::<_, Artist>("SELECT * FROM artists WHERE name ILIKE $1 ORDER BY id")
                .bind(pattern)
                .fetch_all(pool)
                .await?;
        Ok(artists)
    }

    pub async fn find(pool: &PgPool, id: i64) -> Result<Option<Artist>, DbError> {
        let artist = sqlx::query_as::<_, Artist>("SELECT * FROM artists WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(artist)
    }

    pub async fn create(pool: &PgPool, payload: &ArtistPayload) -> Result<Artist, DbError> {
        let mut tx = pool.begin().await?;
        let artist = sqlx::query_as::<_, Artist>(
            "INSERT INTO artists \
             (name, city, state, genres, phone, website, facebook_link, image_link, seeking_venue, seeking_description) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             RETURNING *",
        )
        .bind(payload.name.as_deref().unwrap_or(""))
        .bind(payload.city.as_deref().unwrap_or(""))
        .bind(payload.state.as_deref().unwrap_or(""))
        .bind(payload.genres.as_deref().unwrap_or(&[]))
        .bind(&payload.phone)
        .bind(&payload.website)
        .bind(&payload.facebook_link)
        .bind(&payload.image_link)
        .bind(payload.seeking_venue.unwrap_or(false))
        .bind(&payload.seeking_description)
        .fetch_one(&mut *tx)
        .await?;
        tx.commit().await?;
        Ok(artist)
    }

    /// Full update: every field is overwritten with the submitted value.
    pub async fn update(pool: &PgPool, id: i64, payload: &ArtistPayload) -> Result<Artist, DbError> {
        let mut tx = pool.begin().await?;
        let artist = sqlx::query_as::<_, Artist>(
            "UPDATE artists SET \
             name = $2, city = $3, state = $4, genres = $5, phone = $6, website = $7, \
             facebook_link = $8, image_link = $9, seeking_venue = $10, seeking_description = $11 \
             WHERE id = $1 \
             RETURNING *",
        )
        .bind(id)
        .bind(payload.name.as_deref().unwrap_or(""))
        .bind(payload.city.as_deref().unwrap_or(""))
        .bind(payload.state.as_deref().unwrap_or(""))
        .bind(payload.genres.as_deref().unwrap_or(&[]))
        .bind(&payload.phone)
        .bind(&payload.website)
        .bind(&payload.facebook_link)
        .bind(&payload.image_link)
        .bind(payload.seeking_venue.unwrap_or(false))
        .bind(&payload.seeking_description)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| DbError::NotFound(format!("Artist {} not found", id)))?;
        tx.commit().await?;
        Ok(artist)
    }

    /// Delete an artist; dependent shows go with it via ON DELETE CASCADE.
    pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, DbError> {
        let mut tx = pool.begin().await?;
        let result = sqlx::query("DELETE FROM artists WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }
}
