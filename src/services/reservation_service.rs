//! Domain service for reservations and the bookable service catalog.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ServiceError;
use crate::db::{CatalogService, Reservation};

#[derive(Debug, Clone, Deserialize)]
pub struct CreateReservationRequest {
    pub reservation_id: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Business id of the customer making the reservation.
    pub customer_id: i32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateReservationRequest {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateServiceRequest {
    pub service_id: i32,
    pub name: String,
    #[serde(default)]
    pub note: String,
}

/// A service attached to a reservation, by business ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReservationServiceLink {
    pub internal_id: Uuid,
    pub reservation_id: i32,
    pub service_id: i32,
}

#[async_trait::async_trait]
pub trait ReservationService: Send + Sync {
    /// Creates a reservation for an existing customer.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Validation`] if the dates are not ordered and
    /// [`ServiceError::NotFound`] if the customer does not exist.
    async fn create_reservation(
        &self,
        request: CreateReservationRequest,
    ) -> Result<Reservation, ServiceError>;

    async fn get_reservation(&self, reservation_id: i32) -> Result<Reservation, ServiceError>;

    async fn list_reservations(&self) -> Result<Vec<Reservation>, ServiceError>;

    async fn list_for_customer(&self, customer_id: i32) -> Result<Vec<Reservation>, ServiceError>;

    async fn update_reservation(
        &self,
        reservation_id: i32,
        request: UpdateReservationRequest,
    ) -> Result<Reservation, ServiceError>;

    async fn create_service(
        &self,
        request: CreateServiceRequest,
    ) -> Result<CatalogService, ServiceError>;

    async fn list_services(&self) -> Result<Vec<CatalogService>, ServiceError>;

    async fn attach_service(
        &self,
        reservation_id: i32,
        service_id: i32,
    ) -> Result<ReservationServiceLink, ServiceError>;

    async fn services_for_reservation(
        &self,
        reservation_id: i32,
    ) -> Result<Vec<CatalogService>, ServiceError>;
}
