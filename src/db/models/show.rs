use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use std::collections::HashMap;

use crate::db::DbError;

/// Wire format for show start times. Stored as text and parsed on read.
pub const START_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Show {
    pub id: i64,
    pub venue_id: i64,
    pub artist_id: i64,
    pub start_time: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShowPayload {
    pub venue_id: Option<i64>,
    pub artist_id: Option<i64>,
    pub start_time: Option<String>,
}

impl ShowPayload {
    pub fn validate(&self) -> Result<(), HashMap<String, String>> {
        let mut field_errors = HashMap::new();

        if self.venue_id.is_none() {
            field_errors.insert("venue_id".to_string(), "This field is required".to_string());
        }
        if self.artist_id.is_none() {
            field_errors.insert("artist_id".to_string(), "This field is required".to_string());
        }
        if self.start_time.as_deref().map(str::trim).unwrap_or("").is_empty() {
            field_errors.insert("start_time".to_string(), "This field is required".to_string());
        }

        if field_errors.is_empty() {
            Ok(())
        } else {
            Err(field_errors)
        }
    }
}

/// A show joined with both parents, for the global show listing.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ShowListing {
    pub venue_id: i64,
    pub venue_name: String,
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: String,
}

/// A venue's show joined with the artist side.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct VenueShow {
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: String,
}

/// An artist's show joined with the venue side.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ArtistShow {
    pub venue_id: i64,
    pub venue_name: String,
    pub venue_image_link: Option<String>,
    pub start_time: String,
}

/// True when the start time parses and lies strictly before `now`.
/// Ties and unparseable values classify as upcoming; only a provable
/// strictly-earlier time counts as past.
pub fn is_past(start_time: &str, now: NaiveDateTime) -> bool {
    match NaiveDateTime::parse_from_str(start_time, START_TIME_FORMAT) {
        Ok(start) => start < now,
        Err(_) => false,
    }
}

/// Split rows into (past, upcoming) against `now`, keyed by a start-time
/// accessor so venue-side and artist-side rows share the logic.
pub fn partition_by_time<T>(
    rows: Vec<T>,
    now: NaiveDateTime,
    start_time: impl Fn(&T) -> &str,
) -> (Vec<T>, Vec<T>) {
    let mut past = Vec::new();
    let mut upcoming = Vec::new();
    for row in rows {
        if is_past(start_time(&row), now) {
            past.push(row);
        } else {
            upcoming.push(row);
        }
    }
    (past, upcoming)
}

impl Show {
    pub async fn list_all(pool: &PgPool) -> Result<Vec<ShowListing>, DbError> {
        let shows = sqlx::query_as::<_, ShowListing>(
            "SELECT s.venue_id, v.name AS venue_name, s.artist_id, a.name AS artist_name, \
             a.image_link AS artist_image_link, s.start_time \
             FROM shows s \
             JOIN venues v ON v.id = s.venue_id \
             JOIN artists a ON a.id = s.artist_id \
             ORDER BY s.id",
        )
        .fetch_all(pool)
        .await?;
        Ok(shows)
    }

    pub async fn for_venue(pool: &PgPool, venue_id: i64) -> Result<Vec<VenueShow>, DbError> {
        let shows = sqlx::query_as::<_, VenueShow>(
            "SELECT s.artist_id, a.name AS artist_name, a.image_link AS artist_image_link, s.start_time \
             FROM shows s \
             JOIN artists a ON a.id = s.artist_id \
             WHERE s.venue_id = $1 \
             ORDER BY s.id",
        )
        .bind(venue_id)
        .fetch_all(pool)
        .await?;
        Ok(shows)
    }

    pub async fn for_artist(pool: &PgPool, artist_id: i64) -> Result<Vec<ArtistShow>, DbError> {
        let shows = sqlx::query_as::<_, ArtistShow>(
            "SELECT s.venue_id, v.name AS venue_name, v.image_link AS venue_image_link, s.start_time \
             FROM shows s \
             JOIN venues v ON v.id = s.venue_id \
             WHERE s.artist_id = $1 \
             ORDER BY s.id",
        )
        .bind(artist_id)
        .fetch_all(pool)
        .await?;
        Ok(shows)
    }

    /// Create a show. Foreign-key violations (nonexistent venue or artist)
    /// surface as data-layer errors and roll the transaction back.
    pub async fn create(pool: &PgPool, payload: &ShowPayload) -> Result<Show, DbError> {
        let mut tx = pool.begin().await?;
        let show = sqlx::query_as::<_, Show>(
            "INSERT INTO shows (venue_id, artist_id, start_time) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(payload.venue_id.unwrap_or(0))
        .bind(payload.artist_id.unwrap_or(0))
        .bind(payload.start_time.as_deref().unwrap_or(""))
        .fetch_one(&mut *tx)
        .await?;
        tx.commit().await?;
        Ok(show)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 15)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn strictly_earlier_start_is_past() {
        assert!(is_past("2024-06-15 11:59:59", at(12, 0, 0)));
    }

    #[test]
    fn equal_start_is_upcoming() {
        assert!(!is_past("2024-06-15 12:00:00", at(12, 0, 0)));
    }

    #[test]
    fn later_start_is_upcoming() {
        assert!(!is_past("2024-06-15 12:00:01", at(12, 0, 0)));
    }

    #[test]
    fn unparseable_start_is_upcoming() {
        assert!(!is_past("next thursday", at(12, 0, 0)));
        assert!(!is_past("", at(12, 0, 0)));
    }

    #[test]
    fn partition_splits_on_now() {
        let rows = vec![
            ("a", "2024-06-15 09:00:00"),
            ("b", "2024-06-15 12:00:00"),
            ("c", "2024-06-15 18:00:00"),
        ];
        let (past, upcoming) = partition_by_time(rows, at(12, 0, 0), |r| r.1);
        assert_eq!(past.iter().map(|r| r.0).collect::<Vec<_>>(), vec!["a"]);
        assert_eq!(upcoming.iter().map(|r| r.0).collect::<Vec<_>>(), vec!["b", "c"]);
    }
}
