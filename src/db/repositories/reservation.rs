use anyhow::{Context, Result};
use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::{reservation_services, reservations, services};

pub use crate::entities::reservations::Model as Reservation;

#[derive(Debug, Clone)]
pub struct NewReservation {
    pub reservation_id: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Internal id of the customer.
    pub customer_id: Uuid,
}

#[derive(Debug, Clone, Default)]
pub struct ReservationChanges {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

pub struct ReservationRepository {
    conn: DatabaseConnection,
}

impl ReservationRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Inserts as-is. Date ordering is left to the table's CHECK constraint.
    pub async fn create(&self, reservation: NewReservation) -> Result<Reservation> {
        reservations::ActiveModel {
            internal_id: Set(Uuid::new_v4()),
            reservation_id: Set(reservation.reservation_id),
            start_date: Set(reservation.start_date),
            end_date: Set(reservation.end_date),
            customer_id: Set(reservation.customer_id),
        }
        .insert(&self.conn)
        .await
        .with_context(|| format!("Failed to insert reservation {}", reservation.reservation_id))
    }

    pub async fn get_by_reservation_id(&self, reservation_id: i32) -> Result<Option<Reservation>> {
        reservations::Entity::find()
            .filter(reservations::Column::ReservationId.eq(reservation_id))
            .one(&self.conn)
            .await
            .context("Failed to query reservation by reservation id")
    }

    pub async fn list_all(&self) -> Result<Vec<Reservation>> {
        reservations::Entity::find()
            .order_by_asc(reservations::Column::ReservationId)
            .all(&self.conn)
            .await
            .context("Failed to list reservations")
    }

    pub async fn list_for_customer(&self, customer_internal_id: Uuid) -> Result<Vec<Reservation>> {
        reservations::Entity::find()
            .filter(reservations::Column::CustomerId.eq(customer_internal_id))
            .order_by_asc(reservations::Column::ReservationId)
            .all(&self.conn)
            .await
            .context("Failed to list reservations for customer")
    }

    pub async fn update_by_reservation_id(
        &self,
        reservation_id: i32,
        changes: ReservationChanges,
    ) -> Result<Option<Reservation>> {
        let Some(reservation) = self.get_by_reservation_id(reservation_id).await? else {
            return Ok(None);
        };

        if changes.start_date.is_none() && changes.end_date.is_none() {
            return Ok(Some(reservation));
        }

        let mut active: reservations::ActiveModel = reservation.into();
        if let Some(start) = changes.start_date {
            active.start_date = Set(start);
        }
        if let Some(end) = changes.end_date {
            active.end_date = Set(end);
        }

        let updated = active
            .update(&self.conn)
            .await
            .context("Failed to update reservation")?;

        Ok(Some(updated))
    }

    pub async fn attach_service(
        &self,
        reservation_internal_id: Uuid,
        service_internal_id: Uuid,
    ) -> Result<reservation_services::Model> {
        reservation_services::ActiveModel {
            internal_id: Set(Uuid::new_v4()),
            reservation_id: Set(reservation_internal_id),
            service_id: Set(service_internal_id),
        }
        .insert(&self.conn)
        .await
        .context("Failed to link service to reservation")
    }

    pub async fn list_services(&self, reservation: &Reservation) -> Result<Vec<services::Model>> {
        reservation
            .find_related(services::Entity)
            .order_by_asc(services::Column::ServiceId)
            .all(&self.conn)
            .await
            .context("Failed to list services for reservation")
    }

    pub async fn count(&self) -> Result<u64> {
        reservations::Entity::find()
            .count(&self.conn)
            .await
            .context("Failed to count reservations")
    }
}
