//! Customer endpoints.
//!
//! Handlers only map HTTP to [`CustomerService`] calls; failures are logged
//! here and turned into responses by [`ApiError`].

use axum::{Json, extract::State, http::StatusCode};
use std::sync::Arc;
use uuid::Uuid;

use super::error::log_failure;
use super::extract::{ApiJson, ApiPath};
use crate::api::{ApiError, AppState};
use crate::db::{Customer, Reservation};
use crate::services::{CreateCustomerRequest, UpdateCustomerRequest};

/// `GET /api/customers`
pub async fn list_customers(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Customer>>, ApiError> {
    let customers = state
        .customers()
        .list_customers()
        .await
        .inspect_err(log_failure("Error fetching all customers"))?;
    Ok(Json(customers))
}

/// `POST /api/customers`
pub async fn create_customer(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<CreateCustomerRequest>,
) -> Result<(StatusCode, Json<Customer>), ApiError> {
    let customer = state
        .customers()
        .create_customer(payload)
        .await
        .inspect_err(log_failure("Error creating customer"))?;
    Ok((StatusCode::CREATED, Json(customer)))
}

/// `GET /api/customers/{customer_id}`
pub async fn get_customer_by_customer_id(
    State(state): State<Arc<AppState>>,
    ApiPath(customer_id): ApiPath<i32>,
) -> Result<Json<Customer>, ApiError> {
    let customer = state
        .customers()
        .get_by_customer_id(customer_id)
        .await
        .inspect_err(log_failure("Error fetching customer by customer ID"))?;
    Ok(Json(customer))
}

/// `GET /api/customers/internal/{internal_id}`
pub async fn get_customer_by_internal_id(
    State(state): State<Arc<AppState>>,
    ApiPath(internal_id): ApiPath<Uuid>,
) -> Result<Json<Customer>, ApiError> {
    let customer = state
        .customers()
        .get_by_internal_id(internal_id)
        .await
        .inspect_err(log_failure("Error fetching customer by internal ID"))?;
    Ok(Json(customer))
}

/// `PUT|PATCH /api/customers/{customer_id}`
///
/// The path id selects the customer; the body cannot move it to another id.
pub async fn update_customer(
    State(state): State<Arc<AppState>>,
    ApiPath(customer_id): ApiPath<i32>,
    ApiJson(payload): ApiJson<UpdateCustomerRequest>,
) -> Result<Json<Customer>, ApiError> {
    let customer = state
        .customers()
        .update_customer(customer_id, payload)
        .await
        .inspect_err(log_failure("Error updating customer"))?;
    Ok(Json(customer))
}

/// `GET /api/customers/{customer_id}/reservations`
pub async fn list_customer_reservations(
    State(state): State<Arc<AppState>>,
    ApiPath(customer_id): ApiPath<i32>,
) -> Result<Json<Vec<Reservation>>, ApiError> {
    let reservations = state
        .reservations()
        .list_for_customer(customer_id)
        .await
        .inspect_err(log_failure("Error fetching reservations for customer"))?;
    Ok(Json(reservations))
}
