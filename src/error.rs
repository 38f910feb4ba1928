// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};
use std::collections::HashMap;

/// HTTP API error with appropriate status codes and client-friendly messages
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    BadRequest(String),
    ValidationError {
        message: String,
        field_errors: HashMap<String, String>,
    },

    // 401 Unauthorized
    Unauthorized(String),

    // 404 Not Found
    NotFound(String),

    // 422 Unprocessable Entity (type coercion, constraint or transaction failure)
    UnprocessableEntity(String),

    // 500 Internal Server Error
    InternalServerError(String),

    // 503 Service Unavailable
    ServiceUnavailable(String),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::BadRequest(_) => 400,
            ApiError::ValidationError { .. } => 400,
            ApiError::Unauthorized(_) => 401,
            ApiError::NotFound(_) => 404,
            ApiError::UnprocessableEntity(_) => 422,
            ApiError::InternalServerError(_) => 500,
            ApiError::ServiceUnavailable(_) => 503,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg) => msg,
            ApiError::ValidationError { message, .. } => message,
            ApiError::Unauthorized(msg) => msg,
            ApiError::NotFound(msg) => msg,
            ApiError::UnprocessableEntity(msg) => msg,
            ApiError::InternalServerError(msg) => msg,
            ApiError::ServiceUnavailable(msg) => msg,
        }
    }

    /// Convert to the JSON error envelope: {"success": false, "error": <status>, "message": ...}
    pub fn to_json(&self) -> Value {
        match self {
            ApiError::ValidationError { message, field_errors } => {
                json!({
                    "success": false,
                    "error": self.status_code(),
                    "message": message,
                    "field_errors": field_errors
                })
            }
            _ => {
                json!({
                    "success": false,
                    "error": self.status_code(),
                    "message": self.message()
                })
            }
        }
    }
}

// Static constructor methods
impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn validation_error(
        message: impl Into<String>,
        field_errors: HashMap<String, String>,
    ) -> Self {
        ApiError::ValidationError {
            message: message.into(),
            field_errors,
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn unprocessable_entity(message: impl Into<String>) -> Self {
        ApiError::UnprocessableEntity(message.into())
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        ApiError::InternalServerError(message.into())
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        ApiError::ServiceUnavailable(message.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.to_json())).into_response()
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::internal_server_error(format!("serialization failure: {}", err))
    }
}

// Convert data-layer errors to ApiError. Row-not-found surfaces as a client
// 404; everything else from the database is a 422 after rollback, per the
// error taxonomy.
impl From<crate::db::DbError> for ApiError {
    fn from(err: crate::db::DbError) -> Self {
        match err {
            crate::db::DbError::NotFound(msg) => ApiError::not_found(msg),
            crate::db::DbError::ConfigMissing(_) | crate::db::DbError::InvalidDatabaseUrl => {
                ApiError::service_unavailable("database unavailable")
            }
            crate::db::DbError::Sqlx(sqlx::Error::RowNotFound) => {
                ApiError::not_found("resource not found")
            }
            crate::db::DbError::Sqlx(e) => {
                tracing::error!("database error: {}", e);
                ApiError::unprocessable_entity("unprocessable")
            }
            crate::db::DbError::Migrate(e) => {
                tracing::error!("migration error: {}", e);
                ApiError::service_unavailable("database unavailable")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_envelope_carries_status_and_flag() {
        let err = ApiError::not_found("resource not found");
        let body = err.to_json();
        assert_eq!(body["success"], json!(false));
        assert_eq!(body["error"], json!(404));
        assert_eq!(body["message"], json!("resource not found"));
    }

    #[test]
    fn validation_error_includes_field_errors() {
        let mut fields = HashMap::new();
        fields.insert("name".to_string(), "This field is required".to_string());
        let err = ApiError::validation_error("Missing required fields", fields);
        assert_eq!(err.status_code(), 400);
        let body = err.to_json();
        assert_eq!(body["field_errors"]["name"], json!("This field is required"));
    }
}
