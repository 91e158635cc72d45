//! Reservation and service-catalog endpoints.

use axum::{Json, extract::State, http::StatusCode};
use std::sync::Arc;

use super::error::log_failure;
use super::extract::{ApiJson, ApiPath};
use crate::api::{ApiError, AppState};
use crate::db::{CatalogService, Reservation};
use crate::services::{
    CreateReservationRequest, CreateServiceRequest, ReservationServiceLink,
    UpdateReservationRequest,
};

/// `GET /api/reservations`
pub async fn list_reservations(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Reservation>>, ApiError> {
    let reservations = state
        .reservations()
        .list_reservations()
        .await
        .inspect_err(log_failure("Error fetching all reservations"))?;
    Ok(Json(reservations))
}

/// `POST /api/reservations`
pub async fn create_reservation(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<CreateReservationRequest>,
) -> Result<(StatusCode, Json<Reservation>), ApiError> {
    let reservation = state
        .reservations()
        .create_reservation(payload)
        .await
        .inspect_err(log_failure("Error creating reservation"))?;
    Ok((StatusCode::CREATED, Json(reservation)))
}

/// `GET /api/reservations/{reservation_id}`
pub async fn get_reservation(
    State(state): State<Arc<AppState>>,
    ApiPath(reservation_id): ApiPath<i32>,
) -> Result<Json<Reservation>, ApiError> {
    let reservation = state
        .reservations()
        .get_reservation(reservation_id)
        .await
        .inspect_err(log_failure("Error fetching reservation"))?;
    Ok(Json(reservation))
}

/// `PUT|PATCH /api/reservations/{reservation_id}`
pub async fn update_reservation(
    State(state): State<Arc<AppState>>,
    ApiPath(reservation_id): ApiPath<i32>,
    ApiJson(payload): ApiJson<UpdateReservationRequest>,
) -> Result<Json<Reservation>, ApiError> {
    let reservation = state
        .reservations()
        .update_reservation(reservation_id, payload)
        .await
        .inspect_err(log_failure("Error updating reservation"))?;
    Ok(Json(reservation))
}

/// `GET /api/reservations/{reservation_id}/services`
pub async fn list_reservation_services(
    State(state): State<Arc<AppState>>,
    ApiPath(reservation_id): ApiPath<i32>,
) -> Result<Json<Vec<CatalogService>>, ApiError> {
    let services = state
        .reservations()
        .services_for_reservation(reservation_id)
        .await
        .inspect_err(log_failure("Error fetching services for reservation"))?;
    Ok(Json(services))
}

/// `POST /api/reservations/{reservation_id}/services/{service_id}`
pub async fn attach_service(
    State(state): State<Arc<AppState>>,
    ApiPath((reservation_id, service_id)): ApiPath<(i32, i32)>,
) -> Result<(StatusCode, Json<ReservationServiceLink>), ApiError> {
    let link = state
        .reservations()
        .attach_service(reservation_id, service_id)
        .await
        .inspect_err(log_failure("Error attaching service to reservation"))?;
    Ok((StatusCode::CREATED, Json(link)))
}

/// `GET /api/services`
pub async fn list_services(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<CatalogService>>, ApiError> {
    let services = state
        .reservations()
        .list_services()
        .await
        .inspect_err(log_failure("Error fetching services"))?;
    Ok(Json(services))
}

/// `POST /api/services`
pub async fn create_service(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<CreateServiceRequest>,
) -> Result<(StatusCode, Json<CatalogService>), ApiError> {
    let service = state
        .reservations()
        .create_service(payload)
        .await
        .inspect_err(log_failure("Error creating service"))?;
    Ok((StatusCode::CREATED, Json(service)))
}
