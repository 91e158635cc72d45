use axum::{Json, extract::State};
use std::sync::Arc;
use tracing::error;

use super::{ApiError, AppState, HealthDto};

/// `GET /api/health`
pub async fn health(State(state): State<Arc<AppState>>) -> Result<Json<HealthDto>, ApiError> {
    if let Err(e) = state.store().ping().await {
        error!(error = %e, "Health check failed");
        return Err(ApiError::internal(e.to_string()));
    }

    Ok(Json(HealthDto {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds: state.start_time.elapsed().as_secs(),
    }))
}
