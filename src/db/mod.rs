use anyhow::{Context, Result};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::{info, warn};
use uuid::Uuid;

pub mod migrator;
pub mod repositories;
pub mod schema;

pub use repositories::catalog::{CatalogService, NewCatalogService};
pub use repositories::customer::{Customer, CustomerChanges, NewCustomer};
pub use repositories::reservation::{NewReservation, Reservation, ReservationChanges};
pub use repositories::user::{NewUser, User, UserChanges};

use crate::entities::reservation_services;

/// Pooled handle to the database. Cheap to clone.
#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.contains(":memory:") {
            let path_str = db_url.trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                if let Err(e) = tokio::fs::create_dir_all(parent).await {
                    warn!(
                        path = %parent.display(),
                        error = %e,
                        "Could not create database directory"
                    );
                }
            }
            if !Path::new(path_str).exists() {
                tokio::fs::File::create(path_str)
                    .await
                    .with_context(|| format!("Failed to create database file: {path_str}"))?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    pub async fn drop_tables(&self) -> Result<()> {
        schema::drop_tables(&self.conn).await
    }

    pub async fn create_tables(&self) -> Result<()> {
        schema::create_tables(&self.conn).await
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    fn customer_repo(&self) -> repositories::customer::CustomerRepository {
        repositories::customer::CustomerRepository::new(self.conn.clone())
    }

    fn reservation_repo(&self) -> repositories::reservation::ReservationRepository {
        repositories::reservation::ReservationRepository::new(self.conn.clone())
    }

    fn catalog_repo(&self) -> repositories::catalog::CatalogRepository {
        repositories::catalog::CatalogRepository::new(self.conn.clone())
    }

    // Users

    pub async fn create_user(&self, user: NewUser) -> Result<User> {
        self.user_repo().create(user).await
    }

    pub async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.user_repo().get_by_username(username).await
    }

    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.user_repo().get_by_email(email).await
    }

    pub async fn get_users_by_role(&self, role: &str) -> Result<Vec<User>> {
        self.user_repo().get_by_role(role).await
    }

    pub async fn update_user_by_username(
        &self,
        username: &str,
        changes: UserChanges,
    ) -> Result<Option<User>> {
        self.user_repo().update_by_username(username, changes).await
    }

    pub async fn verify_user_password(&self, username: &str, password: &str) -> Result<bool> {
        self.user_repo().verify_password(username, password).await
    }

    pub async fn count_users(&self) -> Result<u64> {
        self.user_repo().count().await
    }

    // Customers

    pub async fn create_customer(&self, customer: NewCustomer) -> Result<Customer> {
        self.customer_repo().create(customer).await
    }

    pub async fn get_customer_by_customer_id(&self, customer_id: i32) -> Result<Option<Customer>> {
        self.customer_repo().get_by_customer_id(customer_id).await
    }

    pub async fn get_customer_by_internal_id(&self, internal_id: Uuid) -> Result<Option<Customer>> {
        self.customer_repo().get_by_internal_id(internal_id).await
    }

    pub async fn list_customers(&self) -> Result<Vec<Customer>> {
        self.customer_repo().list_all().await
    }

    pub async fn update_customer_by_customer_id(
        &self,
        customer_id: i32,
        changes: CustomerChanges,
    ) -> Result<Option<Customer>> {
        self.customer_repo()
            .update_by_customer_id(customer_id, changes)
            .await
    }

    pub async fn count_customers(&self) -> Result<u64> {
        self.customer_repo().count().await
    }

    // Reservations

    pub async fn create_reservation(&self, reservation: NewReservation) -> Result<Reservation> {
        self.reservation_repo().create(reservation).await
    }

    pub async fn get_reservation(&self, reservation_id: i32) -> Result<Option<Reservation>> {
        self.reservation_repo()
            .get_by_reservation_id(reservation_id)
            .await
    }

    pub async fn list_reservations(&self) -> Result<Vec<Reservation>> {
        self.reservation_repo().list_all().await
    }

    pub async fn list_reservations_for_customer(
        &self,
        customer_internal_id: Uuid,
    ) -> Result<Vec<Reservation>> {
        self.reservation_repo()
            .list_for_customer(customer_internal_id)
            .await
    }

    pub async fn update_reservation(
        &self,
        reservation_id: i32,
        changes: ReservationChanges,
    ) -> Result<Option<Reservation>> {
        self.reservation_repo()
            .update_by_reservation_id(reservation_id, changes)
            .await
    }

    pub async fn attach_service_to_reservation(
        &self,
        reservation_internal_id: Uuid,
        service_internal_id: Uuid,
    ) -> Result<reservation_services::Model> {
        self.reservation_repo()
            .attach_service(reservation_internal_id, service_internal_id)
            .await
    }

    pub async fn list_reservation_services(
        &self,
        reservation: &Reservation,
    ) -> Result<Vec<CatalogService>> {
        self.reservation_repo().list_services(reservation).await
    }

    pub async fn count_reservations(&self) -> Result<u64> {
        self.reservation_repo().count().await
    }

    // Catalog

    pub async fn create_catalog_service(&self, service: NewCatalogService) -> Result<CatalogService> {
        self.catalog_repo().create(service).await
    }

    pub async fn get_catalog_service(&self, service_id: i32) -> Result<Option<CatalogService>> {
        self.catalog_repo().get_by_service_id(service_id).await
    }

    pub async fn list_catalog_services(&self) -> Result<Vec<CatalogService>> {
        self.catalog_repo().list_all().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    async fn test_store() -> Store {
        let path = std::env::temp_dir().join(format!("resadmin-store-{}.db", Uuid::new_v4()));
        Store::new(&format!("sqlite:{}", path.display()))
            .await
            .expect("failed to open store")
    }

    fn customer(customer_id: i32, email: &str) -> NewCustomer {
        NewCustomer {
            customer_id,
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: email.to_string(),
        }
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[tokio::test]
    async fn test_customer_round_trip_by_both_ids() {
        let store = test_store().await;
        let created = store
            .create_customer(customer(42, "ada@example.com"))
            .await
            .unwrap();

        let by_business = store.get_customer_by_customer_id(42).await.unwrap().unwrap();
        let by_internal = store
            .get_customer_by_internal_id(created.internal_id)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(by_business, created);
        assert_eq!(by_internal, created);
    }

    #[tokio::test]
    async fn test_customer_email_check_constraint() {
        let store = test_store().await;
        let result = store.create_customer(customer(1, "not-an-email")).await;
        assert!(result.is_err());
        assert_eq!(store.count_customers().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_reservation_date_check_constraint() {
        let store = test_store().await;
        let owner = store
            .create_customer(customer(1, "ada@example.com"))
            .await
            .unwrap();

        for (start, end) in [("2021-01-05", "2021-01-05"), ("2021-01-06", "2021-01-05")] {
            let result = store
                .create_reservation(NewReservation {
                    reservation_id: 1,
                    start_date: date(start),
                    end_date: date(end),
                    customer_id: owner.internal_id,
                })
                .await;
            assert!(result.is_err(), "{start}..{end} should be rejected");
        }

        assert_eq!(store.count_reservations().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_duplicate_username_rejected() {
        let store = test_store().await;
        let new_user = NewUser {
            username: "alice".to_string(),
            password_hash: "hash".to_string(),
            email: "alice@example.com".to_string(),
            role: None,
        };

        let created = store.create_user(new_user.clone()).await.unwrap();
        assert_eq!(created.role, "user");
        assert!(store.create_user(new_user).await.is_err());
        assert_eq!(store.count_users().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_update_customer_partial() {
        let store = test_store().await;
        store
            .create_customer(customer(7, "ada@example.com"))
            .await
            .unwrap();

        let updated = store
            .update_customer_by_customer_id(
                7,
                CustomerChanges {
                    last_name: Some("Byron".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.first_name, "Ada");
        assert_eq!(updated.last_name, "Byron");

        let missing = store
            .update_customer_by_customer_id(8, CustomerChanges::default())
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_reservation_services_link_is_unique() {
        let store = test_store().await;
        let owner = store
            .create_customer(customer(1, "ada@example.com"))
            .await
            .unwrap();
        let reservation = store
            .create_reservation(NewReservation {
                reservation_id: 10,
                start_date: date("2021-01-01"),
                end_date: date("2021-01-03"),
                customer_id: owner.internal_id,
            })
            .await
            .unwrap();
        let breakfast = store
            .create_catalog_service(NewCatalogService {
                service_id: 1,
                name: "Breakfast".to_string(),
                note: "Served 7-10".to_string(),
            })
            .await
            .unwrap();

        store
            .attach_service_to_reservation(reservation.internal_id, breakfast.internal_id)
            .await
            .unwrap();
        assert!(
            store
                .attach_service_to_reservation(reservation.internal_id, breakfast.internal_id)
                .await
                .is_err()
        );

        let linked = store.list_reservation_services(&reservation).await.unwrap();
        assert_eq!(linked, vec![breakfast]);
    }

    #[tokio::test]
    async fn test_open_creates_missing_directory() {
        let dir = std::env::temp_dir().join(format!("resadmin-dir-{}", Uuid::new_v4()));
        let path = dir.join("nested").join("store.db");

        let store = Store::new(&format!("sqlite:{}", path.display()))
            .await
            .unwrap();

        assert!(path.exists());
        assert_eq!(store.count_users().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_open_reports_uncreatable_database_file() {
        let blocker = std::env::temp_dir().join(format!("resadmin-file-{}", Uuid::new_v4()));
        std::fs::write(&blocker, b"not a directory").unwrap();
        let path = blocker.join("store.db");

        let err = Store::new(&format!("sqlite:{}", path.display()))
            .await
            .err()
            .unwrap();

        assert!(format!("{err:#}").contains("Failed to create database file"));
    }

    #[tokio::test]
    async fn test_drop_and_create_tables() {
        let store = test_store().await;
        store
            .create_customer(customer(1, "ada@example.com"))
            .await
            .unwrap();

        store.drop_tables().await.unwrap();
        assert!(store.count_customers().await.is_err());

        store.create_tables().await.unwrap();
        assert_eq!(store.count_customers().await.unwrap(), 0);
    }
}
