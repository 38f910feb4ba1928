use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};

use crate::error::ApiError;

/// JSON body extractor that reports rejections (malformed bodies, wrong
/// content type) in the standard error envelope instead of axum's
/// plain-text default.
pub struct ApiJson<T>(pub T);

#[axum::async_trait]
impl<S, T> FromRequest<S> for ApiJson<T>
where
    axum::Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match axum::Json::<T>::from_request(req, state).await {
            Ok(axum::Json(value)) => Ok(ApiJson(value)),
            Err(rejection) => Err(ApiError::bad_request(rejection.body_text())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request};
    use serde_json::Value;

    async fn extract(body: &'static str) -> Result<ApiJson<Value>, ApiError> {
        let req = Request::builder()
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap();
        ApiJson::<Value>::from_request(req, &()).await
    }

    #[tokio::test]
    async fn malformed_body_maps_to_the_error_envelope() {
        let err = extract("{ not json").await.err().expect("rejection");
        assert_eq!(err.status_code(), 400);
        let body = err.to_json();
        assert_eq!(body["success"], serde_json::json!(false));
        assert_eq!(body["error"], serde_json::json!(400));
    }

    #[tokio::test]
    async fn well_formed_body_passes_through() {
        let ApiJson(value) = extract(r#"{"ok": true}"#).await.expect("accepted");
        assert_eq!(value["ok"], serde_json::json!(true));
    }
}
