use std::process::{Child, Command, Stdio};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};
use reqwest::StatusCode;
use serde::Serialize;

static SERVER: OnceLock<TestServer> = OnceLock::new();

// Development defaults of the server's SecurityConfig; the spawned binary
// runs without APP_ENV so these are what it validates against.
const DEV_JWT_SECRET: &str = "stagecraft-dev-secret";
const DEV_JWT_AUDIENCE: &str = "stagecraft";
const DEV_JWT_ISSUER: &str = "https://stagecraft.dev/";

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    child: Child,
}

impl TestServer {
    fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        // Spawn the already-built binary to keep start fast during tests
        // Assumes debug profile; adjust if you run tests with --release
        let mut cmd = Command::new("target/debug/stagecraft-api");
        cmd.env("STAGECRAFT_PORT", port.to_string())
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        // Inherit environment so the server can see DATABASE_URL from .env (loaded by the server)
        let child = cmd.spawn().context("failed to spawn server binary")?;

        Ok(Self { port, base_url, child })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            let url = format!("{}/health", self.base_url);
            match client.get(&url).send().await {
                Ok(resp) => {
                    // Consider server ready on any non-404 response
                    if resp.status() == StatusCode::OK
                        || resp.status() == StatusCode::SERVICE_UNAVAILABLE
                    {
                        return Ok(());
                    }
                }
                Err(_) => {}
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }
}

pub async fn ensure_server() -> Result<&'static TestServer> {
    // Use stable get_or_init and convert init errors into a panic with context.
    let server = SERVER.get_or_init(|| TestServer::spawn().expect("failed to spawn server binary"));
    server.wait_ready(Duration::from_secs(10)).await?;
    Ok(server)
}

#[derive(Serialize)]
struct TestClaims {
    sub: String,
    permissions: Vec<String>,
    aud: String,
    iss: String,
    exp: i64,
    iat: i64,
}

/// Mint a bearer token the dev-mode server accepts, carrying the given
/// permission claims.
pub fn bearer_token(permissions: &[&str]) -> String {
    let now = Utc::now().timestamp();
    let claims = TestClaims {
        sub: "integration-tests".to_string(),
        permissions: permissions.iter().map(|p| p.to_string()).collect(),
        aud: DEV_JWT_AUDIENCE.to_string(),
        iss: DEV_JWT_ISSUER.to_string(),
        exp: now + 3600,
        iat: now,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(DEV_JWT_SECRET.as_bytes()),
    )
    .expect("token encoding")
}

/// Unique suffix so runs do not collide on seeded names.
pub fn unique(name: &str) -> String {
    format!("{} {}", name, Utc::now().timestamp_micros())
}
