//! `SeaORM` implementation of the `ReservationService` trait.

use async_trait::async_trait;

use super::ServiceError;
use super::reservation_service::{
    CreateReservationRequest, CreateServiceRequest, ReservationService, ReservationServiceLink,
    UpdateReservationRequest,
};
use super::validation::{validate_date_range, validate_required};
use crate::db::{
    CatalogService, NewCatalogService, NewReservation, Reservation, ReservationChanges, Store,
};

pub struct SeaOrmReservationService {
    store: Store,
}

impl SeaOrmReservationService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ReservationService for SeaOrmReservationService {
    async fn create_reservation(
        &self,
        request: CreateReservationRequest,
    ) -> Result<Reservation, ServiceError> {
        validate_date_range(request.start_date, request.end_date)?;

        let customer = self
            .store
            .get_customer_by_customer_id(request.customer_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Customer", request.customer_id))?;

        self.store
            .create_reservation(NewReservation {
                reservation_id: request.reservation_id,
                start_date: request.start_date,
                end_date: request.end_date,
                customer_id: customer.internal_id,
            })
            .await
            .map_err(|e| {
                ServiceError::from_store(&e, &format!("Reservation {}", request.reservation_id))
            })
    }

    async fn get_reservation(&self, reservation_id: i32) -> Result<Reservation, ServiceError> {
        self.store
            .get_reservation(reservation_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Reservation", reservation_id))
    }

    async fn list_reservations(&self) -> Result<Vec<Reservation>, ServiceError> {
        Ok(self.store.list_reservations().await?)
    }

    async fn list_for_customer(&self, customer_id: i32) -> Result<Vec<Reservation>, ServiceError> {
        let customer = self
            .store
            .get_customer_by_customer_id(customer_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Customer", customer_id))?;

        Ok(self
            .store
            .list_reservations_for_customer(customer.internal_id)
            .await?)
    }

    async fn update_reservation(
        &self,
        reservation_id: i32,
        request: UpdateReservationRequest,
    ) -> Result<Reservation, ServiceError> {
        let current = self.get_reservation(reservation_id).await?;
        validate_date_range(
            request.start_date.unwrap_or(current.start_date),
            request.end_date.unwrap_or(current.end_date),
        )?;

        self.store
            .update_reservation(
                reservation_id,
                ReservationChanges {
                    start_date: request.start_date,
                    end_date: request.end_date,
                },
            )
            .await
            .map_err(|e| ServiceError::from_store(&e, &format!("Reservation {reservation_id}")))?
            .ok_or_else(|| ServiceError::not_found("Reservation", reservation_id))
    }

    async fn create_service(
        &self,
        request: CreateServiceRequest,
    ) -> Result<CatalogService, ServiceError> {
        validate_required("name", &request.name)?;

        let service_id = request.service_id;
        self.store
            .create_catalog_service(NewCatalogService {
                service_id,
                name: request.name,
                note: request.note,
            })
            .await
            .map_err(|e| ServiceError::from_store(&e, &format!("Service {service_id}")))
    }

    async fn list_services(&self) -> Result<Vec<CatalogService>, ServiceError> {
        Ok(self.store.list_catalog_services().await?)
    }

    async fn attach_service(
        &self,
        reservation_id: i32,
        service_id: i32,
    ) -> Result<ReservationServiceLink, ServiceError> {
        let reservation = self.get_reservation(reservation_id).await?;
        let service = self
            .store
            .get_catalog_service(service_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Service", service_id))?;

        let link = self
            .store
            .attach_service_to_reservation(reservation.internal_id, service.internal_id)
            .await
            .map_err(|e| {
                ServiceError::from_store(
                    &e,
                    &format!("Service {service_id} on reservation {reservation_id}"),
                )
            })?;

        Ok(ReservationServiceLink {
            internal_id: link.internal_id,
            reservation_id,
            service_id,
        })
    }

    async fn services_for_reservation(
        &self,
        reservation_id: i32,
    ) -> Result<Vec<CatalogService>, ServiceError> {
        let reservation = self.get_reservation(reservation_id).await?;
        Ok(self.store.list_reservation_services(&reservation).await?)
    }
}
