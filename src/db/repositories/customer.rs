use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::customers;

pub use crate::entities::customers::Model as Customer;

#[derive(Debug, Clone)]
pub struct NewCustomer {
    pub customer_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

#[derive(Debug, Clone, Default)]
pub struct CustomerChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
}

impl CustomerChanges {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.first_name.is_none() && self.last_name.is_none() && self.email.is_none()
    }
}

pub struct CustomerRepository {
    conn: DatabaseConnection,
}

impl CustomerRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn create(&self, customer: NewCustomer) -> Result<Customer> {
        customers::ActiveModel {
            internal_id: Set(Uuid::new_v4()),
            customer_id: Set(customer.customer_id),
            first_name: Set(customer.first_name),
            last_name: Set(customer.last_name),
            email: Set(customer.email),
        }
        .insert(&self.conn)
        .await
        .with_context(|| format!("Failed to insert customer {}", customer.customer_id))
    }

    pub async fn get_by_customer_id(&self, customer_id: i32) -> Result<Option<Customer>> {
        customers::Entity::find()
            .filter(customers::Column::CustomerId.eq(customer_id))
            .one(&self.conn)
            .await
            .context("Failed to query customer by customer id")
    }

    pub async fn get_by_internal_id(&self, internal_id: Uuid) -> Result<Option<Customer>> {
        customers::Entity::find_by_id(internal_id)
            .one(&self.conn)
            .await
            .context("Failed to query customer by internal id")
    }

    pub async fn list_all(&self) -> Result<Vec<Customer>> {
        customers::Entity::find()
            .order_by_asc(customers::Column::CustomerId)
            .all(&self.conn)
            .await
            .context("Failed to list customers")
    }

    pub async fn update_by_customer_id(
        &self,
        customer_id: i32,
        changes: CustomerChanges,
    ) -> Result<Option<Customer>> {
        let Some(customer) = self.get_by_customer_id(customer_id).await? else {
            return Ok(None);
        };

        if changes.is_empty() {
            return Ok(Some(customer));
        }

        let mut active: customers::ActiveModel = customer.into();
        if let Some(first_name) = changes.first_name {
            active.first_name = Set(first_name);
        }
        if let Some(last_name) = changes.last_name {
            active.last_name = Set(last_name);
        }
        if let Some(email) = changes.email {
            active.email = Set(email);
        }

        let updated = active
            .update(&self.conn)
            .await
            .context("Failed to update customer")?;

        Ok(Some(updated))
    }

    pub async fn count(&self) -> Result<u64> {
        customers::Entity::find()
            .count(&self.conn)
            .await
            .context("Failed to count customers")
    }
}
