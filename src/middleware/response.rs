use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::{json, Value};

/// Wrapper for API responses that folds `"success": true` into the body,
/// producing the flat envelope the clients expect:
/// `{"success": true, "venues": [...], "count": 2}`.
#[derive(Debug)]
pub struct ApiResponse {
    pub body: Value,
    pub status_code: Option<StatusCode>,
}

impl ApiResponse {
    /// Create a successful API response with default 200 status
    pub fn success(body: Value) -> Self {
        Self {
            body,
            status_code: None, // Default to 200 OK
        }
    }

    /// Create an API response with custom status code
    pub fn with_status(body: Value, status_code: StatusCode) -> Self {
        Self {
            body,
            status_code: Some(status_code),
        }
    }

    /// Create a 201 Created response
    pub fn created(body: Value) -> Self {
        Self::with_status(body, StatusCode::CREATED)
    }

    fn envelope(self) -> Value {
        match self.body {
            Value::Object(mut map) => {
                map.insert("success".to_string(), Value::Bool(true));
                Value::Object(map)
            }
            // Non-object bodies land under a "data" key
            other => json!({ "success": true, "data": other }),
        }
    }
}

impl IntoResponse for ApiResponse {
    fn into_response(self) -> Response {
        let status = self.status_code.unwrap_or(StatusCode::OK);
        (status, Json(self.envelope())).into_response()
    }
}

// Convenience type alias
pub type ApiResult = Result<ApiResponse, crate::error::ApiError>;
