mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

async fn create_venue(client: &reqwest::Client, base: &str, name: &str) -> Result<i64> {
    let res = client
        .post(format!("{}/venues", base))
        .json(&json!({
            "name": name,
            "city": "San Francisco",
            "state": "CA",
            "genres": ["Jazz", "Folk"],
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED, "venue create failed");
    let body = res.json::<Value>().await?;
    assert_eq!(body["venue"]["name"], json!(name), "create should echo fields: {}", body);
    Ok(body["venue"]["id"].as_i64().expect("venue id"))
}

async fn create_artist(client: &reqwest::Client, base: &str, name: &str) -> Result<i64> {
    let res = client
        .post(format!("{}/artists", base))
        .json(&json!({
            "name": name,
            "city": "Oakland",
            "state": "CA",
            "genres": ["Rock"],
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED, "artist create failed");
    let body = res.json::<Value>().await?;
    Ok(body["artist"]["id"].as_i64().expect("artist id"))
}

#[tokio::test]
async fn venue_create_is_searchable_and_echoes_fields() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let name = common::unique("The Musical Hop");
    create_venue(&client, &server.base_url, &name).await?;

    // Case-insensitive substring search finds the new venue exactly once
    let res = client
        .post(format!("{}/venues/search", server.base_url))
        .json(&json!({ "search_term": name.to_lowercase() }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["count"], json!(1), "search body: {}", body);
    assert_eq!(body["venues"][0]["name"], json!(name));

    Ok(())
}

#[tokio::test]
async fn venue_create_missing_fields_is_a_validation_error() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/venues", server.base_url))
        .json(&json!({ "name": "No City" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = res.json::<Value>().await?;
    assert_eq!(body["success"], json!(false));
    assert!(body["field_errors"]["city"].is_string(), "expected city error: {}", body);

    Ok(())
}

#[tokio::test]
async fn malformed_json_body_gets_the_error_envelope() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/venues", server.base_url))
        .header("Content-Type", "application/json")
        .body("{ this is not json")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = res.json::<Value>().await?;
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["error"], json!(400));
    assert!(body["message"].is_string(), "body: {}", body);

    Ok(())
}

#[tokio::test]
async fn deleting_a_missing_venue_is_not_found() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .delete(format!("{}/venues/999999999", server.base_url))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body = res.json::<Value>().await?;
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["error"], json!(404));

    Ok(())
}

#[tokio::test]
async fn venue_detail_splits_past_and_upcoming_shows() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let venue_id = create_venue(&client, &server.base_url, &common::unique("Park Square Live")).await?;
    let artist_id = create_artist(&client, &server.base_url, &common::unique("The Wild Sax Band")).await?;

    for start_time in ["2001-01-01 20:00:00", "2099-01-01 20:00:00"] {
        let res = client
            .post(format!("{}/shows", server.base_url))
            .json(&json!({
                "venue_id": venue_id,
                "artist_id": artist_id,
                "start_time": start_time,
            }))
            .send()
            .await?;
        assert_eq!(res.status(), StatusCode::CREATED, "show create failed");
    }

    let res = client
        .get(format!("{}/venues/{}", server.base_url, venue_id))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["venue"]["past_shows_count"], json!(1), "body: {}", body);
    assert_eq!(body["venue"]["upcoming_shows_count"], json!(1), "body: {}", body);
    assert_eq!(body["venue"]["past_shows"][0]["artist_id"], json!(artist_id));

    Ok(())
}

#[tokio::test]
async fn show_with_unknown_parents_is_unprocessable() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/shows", server.base_url))
        .json(&json!({
            "venue_id": 999999999,
            "artist_id": 999999999,
            "start_time": "2099-01-01 20:00:00",
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);

    Ok(())
}

#[tokio::test]
async fn deleting_a_venue_cascades_to_its_shows() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let venue_id = create_venue(&client, &server.base_url, &common::unique("Doomed Venue")).await?;
    let artist_id = create_artist(&client, &server.base_url, &common::unique("Touring Act")).await?;

    let res = client
        .post(format!("{}/shows", server.base_url))
        .json(&json!({
            "venue_id": venue_id,
            "artist_id": artist_id,
            "start_time": "2099-06-15 19:30:00",
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = client
        .delete(format!("{}/venues/{}", server.base_url, venue_id))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    // The venue is gone
    let res = client
        .get(format!("{}/venues/{}", server.base_url, venue_id))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    // And its show went with it: the artist has no remaining shows
    let res = client
        .get(format!("{}/artists/{}", server.base_url, artist_id))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["artist"]["upcoming_shows_count"], json!(0), "body: {}", body);
    assert_eq!(body["artist"]["past_shows_count"], json!(0), "body: {}", body);

    Ok(())
}

#[tokio::test]
async fn artist_update_overwrites_fields() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let name = common::unique("Guns N Petals");
    let artist_id = create_artist(&client, &server.base_url, &name).await?;

    let res = client
        .put(format!("{}/artists/{}", server.base_url, artist_id))
        .json(&json!({
            "name": name,
            "city": "Portland",
            "state": "OR",
            "genres": ["Rock", "Blues"],
            "seeking_venue": true,
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["artist"]["city"], json!("Portland"));
    assert_eq!(body["artist"]["seeking_venue"], json!(true));

    Ok(())
}
