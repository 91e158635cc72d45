//! Extractors that reject with an [`ApiError`] so malformed requests get the
//! same `{"error": ...}` body as every other failure.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{FromRequest, FromRequestParts, Request};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;
use tracing::warn;

use super::ApiError;

pub struct ApiJson<T>(pub T);

impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match axum::Json::<T>::from_request(req, state).await {
            Ok(axum::Json(value)) => Ok(Self(value)),
            Err(rejection) => {
                warn!(error = %rejection, "Rejected request body");
                Err(match rejection {
                    JsonRejection::MissingJsonContentType(_) => {
                        ApiError::validation("Expected a JSON request body")
                    }
                    other => ApiError::validation(other.body_text()),
                })
            }
        }
    }
}

pub struct ApiPath<T>(pub T);

impl<T, S> FromRequestParts<S> for ApiPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match axum::extract::Path::<T>::from_request_parts(parts, state).await {
            Ok(axum::extract::Path(value)) => Ok(Self(value)),
            Err(rejection) => {
                warn!(error = %rejection, "Rejected path parameters");
                Err(match rejection {
                    PathRejection::FailedToDeserializePathParams(inner) => {
                        ApiError::validation(inner.body_text())
                    }
                    other => ApiError::internal(other.body_text()),
                })
            }
        }
    }
}
