//! Every handler answers a failing service with the same 500 body,
//! whatever the underlying cause.

mod common;

use async_trait::async_trait;
use axum::{
    Router,
    http::{Method, StatusCode},
};
use common::{send, test_config};
use resadmin::api::INTERNAL_ERROR_MESSAGE;
use resadmin::db::{CatalogService, Customer, Reservation, Store, User};
use resadmin::services::{
    CreateCustomerRequest, CreateReservationRequest, CreateServiceRequest, CreateUserRequest,
    CustomerService, ReservationService, ReservationServiceLink, ServiceError,
    UpdateCustomerRequest, UpdateReservationRequest, UpdateUserRequest, UserService,
};
use resadmin::state::SharedState;
use serde_json::{Value, json};
use std::sync::Arc;
use uuid::Uuid;

/// Fails every call with a freshly built error.
#[derive(Clone, Copy)]
struct Failing(fn() -> ServiceError);

#[async_trait]
impl CustomerService for Failing {
    async fn create_customer(&self, _: CreateCustomerRequest) -> Result<Customer, ServiceError> {
        Err((self.0)())
    }

    async fn get_by_customer_id(&self, _: i32) -> Result<Customer, ServiceError> {
        Err((self.0)())
    }

    async fn get_by_internal_id(&self, _: Uuid) -> Result<Customer, ServiceError> {
        Err((self.0)())
    }

    async fn list_customers(&self) -> Result<Vec<Customer>, ServiceError> {
        Err((self.0)())
    }

    async fn update_customer(
        &self,
        _: i32,
        _: UpdateCustomerRequest,
    ) -> Result<Customer, ServiceError> {
        Err((self.0)())
    }
}

#[async_trait]
impl UserService for Failing {
    async fn create_user(&self, _: CreateUserRequest) -> Result<User, ServiceError> {
        Err((self.0)())
    }

    async fn update_user(&self, _: &str, _: UpdateUserRequest) -> Result<User, ServiceError> {
        Err((self.0)())
    }

    async fn get_by_username(&self, _: &str) -> Result<User, ServiceError> {
        Err((self.0)())
    }

    async fn get_by_email(&self, _: &str) -> Result<User, ServiceError> {
        Err((self.0)())
    }

    async fn get_by_role(&self, _: &str) -> Result<Vec<User>, ServiceError> {
        Err((self.0)())
    }
}

#[async_trait]
impl ReservationService for Failing {
    async fn create_reservation(
        &self,
        _: CreateReservationRequest,
    ) -> Result<Reservation, ServiceError> {
        Err((self.0)())
    }

    async fn get_reservation(&self, _: i32) -> Result<Reservation, ServiceError> {
        Err((self.0)())
    }

    async fn list_reservations(&self) -> Result<Vec<Reservation>, ServiceError> {
        Err((self.0)())
    }

    async fn list_for_customer(&self, _: i32) -> Result<Vec<Reservation>, ServiceError> {
        Err((self.0)())
    }

    async fn update_reservation(
        &self,
        _: i32,
        _: UpdateReservationRequest,
    ) -> Result<Reservation, ServiceError> {
        Err((self.0)())
    }

    async fn create_service(&self, _: CreateServiceRequest) -> Result<CatalogService, ServiceError> {
        Err((self.0)())
    }

    async fn list_services(&self) -> Result<Vec<CatalogService>, ServiceError> {
        Err((self.0)())
    }

    async fn attach_service(&self, _: i32, _: i32) -> Result<ReservationServiceLink, ServiceError> {
        Err((self.0)())
    }

    async fn services_for_reservation(&self, _: i32) -> Result<Vec<CatalogService>, ServiceError> {
        Err((self.0)())
    }
}

async fn failing_app(make: fn() -> ServiceError) -> Router {
    let config = test_config();
    let store = Store::new(&config.general.database_path)
        .await
        .expect("failed to open store");

    let fake = Arc::new(Failing(make));
    let shared = SharedState {
        config: Arc::new(config),
        store,
        customer_service: fake.clone(),
        user_service: fake.clone(),
        reservation_service: fake,
    };

    resadmin::api::router(resadmin::api::create_app_state(Arc::new(shared)))
}

/// One well-formed request per handler.
fn every_route() -> Vec<(Method, String, Option<Value>)> {
    let customer = json!({
        "customer_id": 1,
        "first_name": "Ada",
        "last_name": "Lovelace",
        "email": "ada@example.com",
    });
    let user = json!({ "username": "alice", "password": "pw", "email": "alice@example.com" });
    let reservation = json!({
        "reservation_id": 1,
        "start_date": "2021-01-01",
        "end_date": "2021-01-02",
        "customer_id": 1,
    });
    let service = json!({ "service_id": 1, "name": "Breakfast", "note": "" });
    let internal_id = Uuid::new_v4();

    vec![
        (Method::GET, "/api/customers".into(), None),
        (Method::POST, "/api/customers".into(), Some(customer)),
        (Method::GET, "/api/customers/1".into(), None),
        (
            Method::GET,
            format!("/api/customers/internal/{internal_id}"),
            None,
        ),
        (
            Method::PUT,
            "/api/customers/1".into(),
            Some(json!({ "first_name": "A" })),
        ),
        (
            Method::PATCH,
            "/api/customers/1".into(),
            Some(json!({ "first_name": "A" })),
        ),
        (Method::GET, "/api/customers/1/reservations".into(), None),
        (Method::POST, "/api/users".into(), Some(user)),
        (
            Method::PUT,
            "/api/users/alice".into(),
            Some(json!({ "role": "admin" })),
        ),
        (
            Method::PATCH,
            "/api/users/alice".into(),
            Some(json!({ "role": "admin" })),
        ),
        (Method::GET, "/api/users/alice".into(), None),
        (Method::GET, "/api/users/email/alice@example.com".into(), None),
        (Method::GET, "/api/users/role/admin".into(), None),
        (Method::GET, "/api/reservations".into(), None),
        (Method::POST, "/api/reservations".into(), Some(reservation)),
        (Method::GET, "/api/reservations/1".into(), None),
        (
            Method::PUT,
            "/api/reservations/1".into(),
            Some(json!({ "end_date": "2021-01-03" })),
        ),
        (
            Method::PATCH,
            "/api/reservations/1".into(),
            Some(json!({ "end_date": "2021-01-03" })),
        ),
        (Method::GET, "/api/reservations/1/services".into(), None),
        (Method::POST, "/api/reservations/1/services/1".into(), None),
        (Method::GET, "/api/services".into(), None),
        (Method::POST, "/api/services".into(), Some(service)),
    ]
}

#[tokio::test]
async fn test_internal_failure_is_opaque_500_on_every_route() {
    let app = failing_app(|| ServiceError::Internal("disk on fire: /var/db/secret.sqlite".into())).await;

    for (method, uri, body) in every_route() {
        let (status, response) = send(&app, method.clone(), &uri, body).await;

        assert_eq!(
            status,
            StatusCode::INTERNAL_SERVER_ERROR,
            "{method} {uri} returned {status}"
        );
        assert_eq!(
            response,
            json!({ "error": INTERNAL_ERROR_MESSAGE }),
            "{method} {uri} leaked its cause"
        );
    }
}

#[tokio::test]
async fn test_every_error_kind_is_uniform_500_on_every_route() {
    let kinds: [fn() -> ServiceError; 4] = [
        || ServiceError::not_found("Customer", 1),
        || ServiceError::Conflict("User 'alice' already exists".into()),
        || ServiceError::validation("Invalid email address: 'x'"),
        || ServiceError::Unavailable("pool timed out".into()),
    ];

    for make in kinds {
        let app = failing_app(make).await;

        for (method, uri, body) in every_route() {
            let (status, response) = send(&app, method.clone(), &uri, body).await;

            assert_eq!(
                status,
                StatusCode::INTERNAL_SERVER_ERROR,
                "{method} {uri} with {:?}",
                make()
            );
            assert_eq!(response, json!({ "error": INTERNAL_ERROR_MESSAGE }));
        }
    }
}
