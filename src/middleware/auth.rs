use axum::{
    extract::Request,
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Json, Response},
};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};

use crate::auth::Claims;
use crate::config;
use crate::error::ApiError;

/// Caller identity extracted from a verified bearer token
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub subject: String,
    pub permissions: Vec<String>,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            subject: claims.sub,
            permissions: claims.permissions,
        }
    }
}

impl AuthUser {
    /// Reject with 401 unless the claim set carries the permission.
    pub fn require(&self, permission: &str) -> Result<(), ApiError> {
        if self.permissions.iter().any(|p| p == permission) {
            Ok(())
        } else {
            Err(ApiError::unauthorized("unauthorized"))
        }
    }
}

/// Bearer-token middleware: validates the token and injects the caller
/// identity. Fails closed; the handler body never runs without a valid token.
pub async fn jwt_auth_middleware(
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, (StatusCode, Json<serde_json::Value>)> {
    // Extract JWT from Authorization header
    let token = extract_jwt_from_headers(&headers).map_err(|msg| {
        let api_error = ApiError::unauthorized(msg);
        (
            StatusCode::from_u16(api_error.status_code()).unwrap(),
            Json(api_error.to_json()),
        )
    })?;

    // Validate and decode JWT
    let claims = validate_jwt(&token).map_err(|msg| {
        let api_error = ApiError::unauthorized(msg);
        (
            StatusCode::from_u16(api_error.status_code()).unwrap(),
            Json(api_error.to_json()),
        )
    })?;

    // Convert claims to AuthUser and inject into request
    let auth_user = AuthUser::from(claims);
    request.extensions_mut().insert(auth_user);

    Ok(next.run(request).await)
}

/// Extract JWT token from Authorization header
fn extract_jwt_from_headers(headers: &HeaderMap) -> Result<String, String> {
    let auth_header = headers
        .get("authorization")
        .or_else(|| headers.get("Authorization"))
        .ok_or_else(|| "Missing Authorization header".to_string())?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "Invalid Authorization header format".to_string())?;

    if let Some(token) = auth_str.strip_prefix("Bearer ") {
        if token.trim().is_empty() {
            return Err("Empty bearer token".to_string());
        }
        Ok(token.to_string())
    } else {
        Err("Authorization header must use Bearer token format".to_string())
    }
}

/// Validate the token signature, audience, issuer and expiry, and extract
/// the claims. RS256 against the issuer public key when one is configured,
/// HS256 with the shared secret otherwise.
fn validate_jwt(token: &str) -> Result<Claims, String> {
    let security = &config::config().security;

    let (decoding_key, algorithm) = match &security.jwt_public_key {
        Some(pem) => {
            let key = DecodingKey::from_rsa_pem(pem.as_bytes())
                .map_err(|_| "Invalid issuer public key".to_string())?;
            (key, Algorithm::RS256)
        }
        None => {
            if security.jwt_secret.is_empty() {
                return Err("JWT secret not configured".to_string());
            }
            (
                DecodingKey::from_secret(security.jwt_secret.as_bytes()),
                Algorithm::HS256,
            )
        }
    };

    let mut validation = Validation::new(algorithm);
    validation.set_audience(&[&security.jwt_audience]);
    validation.set_issuer(&[&security.jwt_issuer]);

    let token_data = decode::<Claims>(token, &decoding_key, &validation)
        .map_err(|e| format!("Invalid bearer token: {}", e))?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{generate_jwt, Claims};

    #[test]
    fn valid_token_round_trips_permissions() {
        let claims = Claims::new(
            "casting-director".to_string(),
            vec!["get:actors".to_string(), "post:actors".to_string()],
        );
        let token = generate_jwt(claims).unwrap();
        let decoded = validate_jwt(&token).unwrap();
        assert_eq!(decoded.sub, "casting-director");
        assert!(decoded.permissions.contains(&"get:actors".to_string()));
    }

    #[test]
    fn garbage_token_is_rejected() {
        assert!(validate_jwt("not.a.jwt").is_err());
    }

    #[test]
    fn missing_header_is_rejected() {
        let headers = HeaderMap::new();
        assert!(extract_jwt_from_headers(&headers).is_err());
    }

    #[test]
    fn non_bearer_scheme_is_rejected() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", "Basic dXNlcjpwYXNz".parse().unwrap());
        assert!(extract_jwt_from_headers(&headers).is_err());
    }

    #[test]
    fn require_checks_the_permission_list() {
        let user = AuthUser {
            subject: "assistant".to_string(),
            permissions: vec!["get:actors".to_string()],
        };
        assert!(user.require("get:actors").is_ok());
        assert!(user.require("delete:actors").is_err());
    }
}
