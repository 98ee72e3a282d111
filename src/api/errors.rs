//! Mapping of domain errors onto HTTP responses

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use super::headers::{APP_NAME, error_headers, qualified};
use crate::domain::DomainError;

/// Handler error. Validation failures carry the problem body and error
/// headers; storage failures are logged and reported generically.
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        ApiError(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.0 {
            DomainError::Validation {
                entity,
                key,
                message,
            } => {
                tracing::debug!("Rejected {} request ({}): {}", entity, key, message);
                let body = json!({
                    "title": message,
                    "status": StatusCode::BAD_REQUEST.as_u16(),
                    "entityName": qualified(entity),
                    "errorKey": key,
                    "message": format!("error.{}", key),
                });
                (
                    StatusCode::BAD_REQUEST,
                    error_headers(entity, key),
                    Json(body),
                )
                    .into_response()
            }
            DomainError::NotFound => (
                StatusCode::NOT_FOUND,
                Json(json!({
                    "title": "Not Found",
                    "status": StatusCode::NOT_FOUND.as_u16(),
                    "message": "error.http.404",
                })),
            )
                .into_response(),
            DomainError::Storage(detail) => {
                tracing::error!("Storage error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "title": "Internal Server Error",
                        "status": StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
                        "message": format!("error.{}.internal", APP_NAME),
                    })),
                )
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_maps_to_bad_request_with_error_headers() {
        let resp = ApiError(DomainError::validation("school", "idexists", "has id")).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(resp.headers()["x-abcideaapp-error"], "error.idexists");
        assert_eq!(resp.headers()["x-abcideaapp-params"], "abcideaAppSchool");
    }

    #[test]
    fn storage_detail_is_not_leaked() {
        let resp = ApiError(DomainError::Storage("UNIQUE constraint failed".into())).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(resp.headers().get("x-abcideaapp-error").is_none());
    }

    #[test]
    fn not_found_maps_to_404() {
        assert_eq!(
            ApiError(DomainError::NotFound).into_response().status(),
            StatusCode::NOT_FOUND
        );
    }
}
