use serde::Deserialize;
use serde_json::json;

use crate::auth::{generate_jwt, Claims};
use crate::config::{self, Environment};
use crate::error::ApiError;
use crate::middleware::{ApiJson, ApiResponse, ApiResult};

#[derive(Debug, Deserialize)]
pub struct TokenBody {
    pub sub: String,
    #[serde(default)]
    pub permissions: Vec<String>,
}

/// POST /auth/token - mint an HS256 token against the dev shared secret.
/// Development only; deployments get tokens from the external issuer.
pub async fn token(ApiJson(body): ApiJson<TokenBody>) -> ApiResult {
    if !matches!(config::config().environment, Environment::Development) {
        return Err(ApiError::not_found("resource not found"));
    }

    let claims = Claims::new(body.sub, body.permissions);
    let expires_in = config::config().security.jwt_expiry_hours * 3600;
    let token = generate_jwt(claims).map_err(|e| ApiError::internal_server_error(e.to_string()))?;

    Ok(ApiResponse::success(json!({
        "token": token,
        "expires_in": expires_in,
    })))
}
