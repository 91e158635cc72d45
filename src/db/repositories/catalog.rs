use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::services;

pub use crate::entities::services::Model as CatalogService;

#[derive(Debug, Clone)]
pub struct NewCatalogService {
    pub service_id: i32,
    pub name: String,
    pub note: String,
}

/// Bookable extras (rows of the `services` table).
pub struct CatalogRepository {
    conn: DatabaseConnection,
}

impl CatalogRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn create(&self, service: NewCatalogService) -> Result<CatalogService> {
        services::ActiveModel {
            internal_id: Set(Uuid::new_v4()),
            service_id: Set(service.service_id),
            name: Set(service.name),
            note: Set(service.note),
        }
        .insert(&self.conn)
        .await
        .with_context(|| format!("Failed to insert service {}", service.service_id))
    }

    pub async fn get_by_service_id(&self, service_id: i32) -> Result<Option<CatalogService>> {
        services::Entity::find()
            .filter(services::Column::ServiceId.eq(service_id))
            .one(&self.conn)
            .await
            .context("Failed to query service by service id")
    }

    pub async fn list_all(&self) -> Result<Vec<CatalogService>> {
        services::Entity::find()
            .order_by_asc(services::Column::ServiceId)
            .all(&self.conn)
            .await
            .context("Failed to list services")
    }
}
