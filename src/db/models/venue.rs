use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use std::collections::HashMap;

use crate::db::DbError;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Venue {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub state: String,
    pub genres: Vec<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub facebook_link: Option<String>,
    pub image_link: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

/// Incoming venue fields. Everything is optional at the wire level so that
/// presence checks produce per-field validation errors instead of a
/// deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VenuePayload {
    pub name: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub genres: Option<Vec<String>>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub facebook_link: Option<String>,
    pub image_link: Option<String>,
    pub seeking_talent: Option<bool>,
    pub seeking_description: Option<String>,
}

impl VenuePayload {
    /// Server-side form validation: name, city, state and a non-empty genre
    /// list are required.
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

/// A (city, state) grouping key for the venue overview page.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct VenueArea {
    pub city: String,
    pub state: String,
}

impl Venue {
    pub async fn areas(pool: &PgPool) -> Result<Vec<VenueArea>, DbError> {
        let areas = sqlx::query_as::<_, VenueArea>(
            "SELECT DISTINCT city, state FROM venues ORDER BY state, city",
        )
        .fetch_all(pool)
        .await?;
        Ok(areas)
    }

    pub async fn by_area(pool: &PgPool, city: &str, state: &str) -> Result<Vec<Venue>, DbError> {
        let venues = sqlx::query_as::<_, Venue>(
            "SELECT * FROM venues WHERE city = $1 AND state = $2 ORDER BY id",
        )
        .bind(city)
        .bind(state)
        .fetch_all(pool)
        .await?;
        Ok(venues)
    }

    /// Case-insensitive substring search on the venue name.
    pub async fn search(pool: &PgPool, term: &str) -> Result<Vec<Venue>, DbError> {
        let pattern = format!("%{}%", term);
        let venues =
            sqlx::query_as::<_, Venue>("SELECT * FROM venues WHERE name ILIKE $1 ORDER BY id")
                .bind(pattern)
                .fetch_all(pool)
                .await?;
        Ok(venues)
    }

    pub async fn find(pool: &PgPool, id: i64) -> Result<Option<Venue>, DbError> {
        let venue = sqlx::query_as::<_, Venue>("SELECT * FROM venues WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(venue)
    }

    pub async fn create(pool: &PgPool, payload: &VenuePayload) -> Result<Venue, DbError> {
        let mut tx = pool.begin().await?;
        let venue = sqlx::query_as::<_, Venue>(
            "INSERT INTO venues \
             (name, city, state, genres, address, phone, website, facebook_link, image_link, seeking_talent, seeking_description) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
             RETURNING *",
        )
        .bind(payload.name.as_deref().unwrap_or(""))
        .bind(payload.city.as_deref().unwrap_or(""))
        .bind(payload.state.as_deref().unwrap_or(""))
        .bind(payload.genres.as_deref().unwrap_or(&[]))
        .bind(&payload.address)
        .bind(&payload.phone)
        .bind(&payload.website)
        .bind(&payload.facebook_link)
        .bind(&payload.image_link)
        .bind(payload.seeking_talent.unwrap_or(false))
        .bind(&payload.seeking_description)
        .fetch_one(&mut *tx)
        .await?;
        tx.commit().await?;
        Ok(venue)
    }

    /// Full update: every field is overwritten with the submitted value.
    pub async fn update(pool: &PgPool, id: i64, payload: &VenuePayload) -> Result<Venue, DbError> {
        let mut tx = pool.begin().await?;
        let venue = sqlx::query_as::<_, Venue>(
            "UPDATE venues SET \
             name = $2, city = $3, state = $4, genres = $5, address = $6, phone = $7, \
             website = $8, facebook_link = $9, image_link = $10, seeking_talent = $11, seeking_description = $12 \
             WHERE id = $1 \
             RETURNING *",
        )
        .bind(id)
        .bind(payload.name.as_deref().unwrap_or(""))
        .bind(payload.city.as_deref().unwrap_or(""))
        .bind(payload.state.as_deref().unwrap_or(""))
        .bind(payload.genres.as_deref().unwrap_or(&[]))
        .bind(&payload.address)
        .bind(&payload.phone)
        .bind(&payload.website)
        .bind(&payload.facebook_link)
        .bind(&payload.image_link)
        .bind(payload.seeking_talent.unwrap_or(false))
        .bind(&payload.seeking_description)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| DbError::NotFound(format!("Venue {} not found", id)))?;
        tx.commit().await?;
        Ok(venue)
    }

    /// Delete a venue; dependent shows go with it via ON DELETE CASCADE.
    /// Returns false when no row matched the id.
    pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, DbError> {
        let mut tx = pool.begin().await?;
        let result = sqlx::query("DELETE FROM venues WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }
}
