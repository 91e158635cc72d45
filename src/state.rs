use std::sync::Arc;

use crate::config::Config;
use crate::db::Store;
use crate::services::{
    CustomerService, ReservationService, SeaOrmCustomerService, SeaOrmReservationService,
    SeaOrmUserService, UserService,
};

/// Long-lived resources built once at startup and shared by every request.
#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<Config>,

    pub store: Store,

    pub customer_service: Arc<dyn CustomerService>,

    pub user_service: Arc<dyn UserService>,

    pub reservation_service: Arc<dyn ReservationService>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        Ok(Self::with_store(config, store))
    }

    /// Wires the `SeaORM` services around an already opened store.
    #[must_use]
    pub fn with_store(config: Config, store: Store) -> Self {
        let customer_service =
            Arc::new(SeaOrmCustomerService::new(store.clone())) as Arc<dyn CustomerService>;
        let user_service = Arc::new(SeaOrmUserService::new(
            store.clone(),
            config.security.clone(),
        )) as Arc<dyn UserService>;
        let reservation_service =
            Arc::new(SeaOrmReservationService::new(store.clone())) as Arc<dyn ReservationService>;

        Self {
            config: Arc::new(config),
            store,
            customer_service,
            user_service,
            reservation_service,
        }
    }
}
