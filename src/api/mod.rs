use axum::{
    Router,
    http::HeaderValue,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::services::{CustomerService, ReservationService, UserService};
use crate::state::SharedState;

mod customers;
mod error;
mod extract;
mod reservations;
mod system;
mod types;
mod users;

pub use error::{ApiError, INTERNAL_ERROR_MESSAGE};
pub use extract::{ApiJson, ApiPath};
pub use types::*;

#[derive(Clone)]
pub struct AppState {
    pub shared: Arc<SharedState>,

    pub start_time: std::time::Instant,
}

impl AppState {
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.shared.config
    }

    #[must_use]
    pub fn store(&self) -> &crate::db::Store {
        &self.shared.store
    }

    #[must_use]
    pub fn customers(&self) -> &Arc<dyn CustomerService> {
        &self.shared.customer_service
    }

    #[must_use]
    pub fn users(&self) -> &Arc<dyn UserService> {
        &self.shared.user_service
    }

    #[must_use]
    pub fn reservations(&self) -> &Arc<dyn ReservationService> {
        &self.shared.reservation_service
    }
}

#[must_use]
pub fn create_app_state(shared: Arc<SharedState>) -> Arc<AppState> {
    Arc::new(AppState {
        shared,
        start_time: std::time::Instant::now(),
    })
}

pub async fn create_app_state_from_config(config: Config) -> anyhow::Result<Arc<AppState>> {
    let shared = Arc::new(SharedState::new(config).await?);
    Ok(create_app_state(shared))
}

pub fn router(state: Arc<AppState>) -> Router {
    let cors_origins = state.config().server.cors_allowed_origins.clone();

    let cors_layer = if cors_origins.iter().any(|o| o == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    Router::new()
        .nest("/api", api_routes().with_state(state))
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
}

fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(system::health))
        .route(
            "/customers",
            get(customers::list_customers).post(customers::create_customer),
        )
        .route(
            "/customers/internal/{internal_id}",
            get(customers::get_customer_by_internal_id),
        )
        .route(
            "/customers/{customer_id}",
            get(customers::get_customer_by_customer_id)
                .put(customers::update_customer)
                .patch(customers::update_customer),
        )
        .route(
            "/customers/{customer_id}/reservations",
            get(customers::list_customer_reservations),
        )
        .route("/users", post(users::create_user))
        .route("/users/email/{email}", get(users::get_user_by_email))
        .route("/users/role/{role}", get(users::get_users_by_role))
        .route(
            "/users/{username}",
            get(users::get_user_by_username)
                .put(users::update_user)
                .patch(users::update_user),
        )
        .route(
            "/reservations",
            get(reservations::list_reservations).post(reservations::create_reservation),
        )
        .route(
            "/reservations/{reservation_id}",
            get(reservations::get_reservation)
                .put(reservations::update_reservation)
                .patch(reservations::update_reservation),
        )
        .route(
            "/reservations/{reservation_id}/services",
            get(reservations::list_reservation_services),
        )
        .route(
            "/reservations/{reservation_id}/services/{service_id}",
            post(reservations::attach_service),
        )
        .route(
            "/services",
            get(reservations::list_services).post(reservations::create_service),
        )
}
