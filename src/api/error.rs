use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt;
use tracing::{error, warn};

use super::ErrorBody;
use crate::services::ServiceError;

pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Failures that leave a handler.
///
/// Every delegate failure becomes [`ApiError::InternalError`] whatever its
/// [`ServiceError`] kind; the kind only decides how loudly it is logged.
/// Requests the extractors cannot decode never reach a delegate and are
/// answered with [`ApiError::ValidationError`].
#[derive(Debug)]
pub enum ApiError {
    ValidationError(String),

    InternalError(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ValidationError(msg) => write!(f, "Validation error: {msg}"),
            Self::InternalError(msg) => write!(f, "Internal error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::ValidationError(_) => StatusCode::BAD_REQUEST,
            Self::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::InternalError(msg.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            Self::ValidationError(msg) => msg,
            Self::InternalError(_) => INTERNAL_ERROR_MESSAGE.to_string(),
        };

        (status, Json(ErrorBody::new(message))).into_response()
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        Self::InternalError(err.to_string())
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        Self::InternalError(format!("{err:#}"))
    }
}

/// Logs a failed delegate call under the handler's message. Server-side
/// faults go out at `error`, caller mistakes at `warn`.
pub fn log_failure(context: &'static str) -> impl FnOnce(&ServiceError) {
    move |err| match err {
        ServiceError::Internal(_) | ServiceError::Unavailable(_) => {
            error!(error = %err, kind = err.kind(), "{context}");
        }
        _ => warn!(error = %err, kind = err.kind(), "{context}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_of(response: Response) -> ErrorBody {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_every_service_error_is_opaque_500() {
        let errors = [
            ServiceError::not_found("Customer", 1),
            ServiceError::Conflict("User 'alice' already exists".into()),
            ServiceError::validation("Invalid email address: 'x'"),
            ServiceError::Unavailable("pool timed out".into()),
            ServiceError::Internal("disk I/O error".into()),
        ];

        for err in errors {
            let response = ApiError::from(err).into_response();
            assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(body_of(response).await, ErrorBody::new(INTERNAL_ERROR_MESSAGE));
        }
    }

    #[tokio::test]
    async fn test_rejected_request_keeps_its_message() {
        let response = ApiError::validation("Expected a JSON request body").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_of(response).await,
            ErrorBody::new("Expected a JSON request body")
        );
    }
}
