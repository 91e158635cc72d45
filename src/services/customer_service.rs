//! Domain service for customer records.

use serde::Deserialize;
use uuid::Uuid;

use super::ServiceError;
use crate::db::Customer;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateCustomerRequest {
    pub customer_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// Partial update; absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCustomerRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
}

#[async_trait::async_trait]
pub trait CustomerService: Send + Sync {
    async fn create_customer(
        &self,
        request: CreateCustomerRequest,
    ) -> Result<Customer, ServiceError>;

    /// Looks a customer up by business id.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::NotFound`] if no customer has that id.
    async fn get_by_customer_id(&self, customer_id: i32) -> Result<Customer, ServiceError>;

    async fn get_by_internal_id(&self, internal_id: Uuid) -> Result<Customer, ServiceError>;

    async fn list_customers(&self) -> Result<Vec<Customer>, ServiceError>;

    async fn update_customer(
        &self,
        customer_id: i32,
        request: UpdateCustomerRequest,
    ) -> Result<Customer, ServiceError>;
}
