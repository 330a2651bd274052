//! Custom error types for the API service

use axum::{
    Json,
    extract::{
        multipart::MultipartError,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::{auth::AuthError, repositories::CouponError, upload::UploadError};

/// Shared message for every rejected admin request
const UNAUTHORIZED_MESSAGE: &str = "Not authenticated";

/// Custom error type for the API service
#[derive(Error, Debug)]
pub enum ApiError {
    /// Unauthorized access, with a message that is safe to show
    #[error("Unauthorized: {0}")]
    Unauthorized(&'static str),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(&'static str),

    /// Bad request with message
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Well-formed body that does not fit the expected shape
    #[error("Unprocessable entity: {0}")]
    UnprocessableEntity(String),

    /// Request body exceeded the configured cap
    #[error("Payload too large")]
    PayloadTooLarge,

    /// Internal server error
    #[error("Internal server error")]
    InternalServerError,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.to_string()),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.to_string()),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::PayloadTooLarge => (
                StatusCode::PAYLOAD_TOO_LARGE,
                "File too large".to_string(),
            ),
            ApiError::InternalServerError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl From<CouponError> for ApiError {
    fn from(err: CouponError) -> Self {
        match err {
            CouponError::NotFound => ApiError::NotFound("Coupon not found"),
            other => {
                error!("Coupon operation failed: {}", other);
                ApiError::InternalServerError
            }
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => ApiError::Unauthorized("Invalid credentials"),
            AuthError::Unauthenticated | AuthError::InvalidSession => {
                ApiError::Unauthorized(UNAUTHORIZED_MESSAGE)
            }
        }
    }
}

impl From<UploadError> for ApiError {
    fn from(err: UploadError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge
        } else {
            ApiError::BadRequest(err.body_text())
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let status = rejection.status();
        if status == StatusCode::UNPROCESSABLE_ENTITY {
            ApiError::UnprocessableEntity(rejection.body_text())
        } else if status == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge
        } else {
            ApiError::BadRequest(rejection.body_text())
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn response_json(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn not_found_coupon_maps_to_404() {
        let response = ApiError::from(CouponError::NotFound).into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            response_json(response).await,
            json!({ "error": "Coupon not found" })
        );
    }

    #[tokio::test]
    async fn store_failure_hides_details() {
        let err = CouponError::Store(anyhow::anyhow!("mongodb://user:hunter2@db refused"));
        let response = ApiError::from(err).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = response_json(response).await.to_string();
        assert!(!body.contains("hunter2"));
    }

    #[tokio::test]
    async fn session_failures_share_one_message() {
        let missing = ApiError::from(AuthError::Unauthenticated).into_response();
        let unknown = ApiError::from(AuthError::InvalidSession).into_response();

        assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(response_json(missing).await, response_json(unknown).await);
    }

    #[tokio::test]
    async fn invalid_credentials_maps_to_401() {
        let response = ApiError::from(AuthError::InvalidCredentials).into_response();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response_json(response).await,
            json!({ "error": "Invalid credentials" })
        );
    }

    #[tokio::test]
    async fn invalid_file_type_maps_to_400() {
        let response = ApiError::from(UploadError::InvalidFileType).into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response_json(response).await,
            json!({ "error": "File must be an image" })
        );
    }
}
