mod common;

use anyhow::Result;
use reqwest::StatusCode;

#[tokio::test]
async fn root_banner_lists_resource_groups() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client.get(&server.base_url).send().await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = res.json::<serde_json::Value>().await?;
    assert!(body["success"].as_bool().unwrap_or(false), "success flag false or missing: {}", body);
    assert!(body["data"]["endpoints"]["agency"].is_string(), "missing agency endpoints: {}", body);

    Ok(())
}

#[tokio::test]
async fn health_reports_database_status() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client.get(format!("{}/health", server.base_url)).send().await?;
    assert_eq!(res.status(), StatusCode::OK, "database expected up for integration runs");

    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["data"]["database"], "ok", "unexpected health body: {}", body);

    Ok(())
}
