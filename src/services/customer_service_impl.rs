//! `SeaORM` implementation of the `CustomerService` trait.

use async_trait::async_trait;
use uuid::Uuid;

use super::ServiceError;
use super::customer_service::{CreateCustomerRequest, CustomerService, UpdateCustomerRequest};
use super::validation::{validate_email, validate_required};
use crate::db::{Customer, CustomerChanges, NewCustomer, Store};

pub struct SeaOrmCustomerService {
    store: Store,
}

impl SeaOrmCustomerService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl CustomerService for SeaOrmCustomerService {
    async fn create_customer(
        &self,
        request: CreateCustomerRequest,
    ) -> Result<Customer, ServiceError> {
        validate_required("first_name", &request.first_name)?;
        validate_required("last_name", &request.last_name)?;
        validate_email(&request.email)?;

        let customer_id = request.customer_id;
        self.store
            .create_customer(NewCustomer {
                customer_id,
                first_name: request.first_name,
                last_name: request.last_name,
                email: request.email,
            })
            .await
            .map_err(|e| ServiceError::from_store(&e, &format!("Customer {customer_id}")))
    }

    async fn get_by_customer_id(&self, customer_id: i32) -> Result<Customer, ServiceError> {
        self.store
            .get_customer_by_customer_id(customer_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Customer", customer_id))
    }

    async fn get_by_internal_id(&self, internal_id: Uuid) -> Result<Customer, ServiceError> {
        self.store
            .get_customer_by_internal_id(internal_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Customer", internal_id))
    }

    async fn list_customers(&self) -> Result<Vec<Customer>, ServiceError> {
        Ok(self.store.list_customers().await?)
    }

    async fn update_customer(
        &self,
        customer_id: i32,
        request: UpdateCustomerRequest,
    ) -> Result<Customer, ServiceError> {
        if let Some(email) = &request.email {
            validate_email(email)?;
        }

        self.store
            .update_customer_by_customer_id(
                customer_id,
                CustomerChanges {
                    first_name: request.first_name,
                    last_name: request.last_name,
                    email: request.email,
                },
            )
            .await
            .map_err(|e| ServiceError::from_store(&e, &format!("Customer {customer_id}")))?
            .ok_or_else(|| ServiceError::not_found("Customer", customer_id))
    }
}
