//! One-shot database reset: drop every table, recreate the schema, then load
//! the development fixtures.

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{error, info};

use crate::config::{Config, SecurityConfig, SeedConfig};
use crate::db::repositories::user::hash_password_blocking;
use crate::db::{Customer, NewUser, Reservation, Store, User};

pub mod fixtures;
pub mod pipeline;

pub use pipeline::{Pipeline, Stage, fan_out};

pub struct SeedContext {
    pub store: Store,
    pub security: SecurityConfig,
    pub seed: SeedConfig,
    pub report: SeedReport,
}

impl SeedContext {
    #[must_use]
    pub fn new(store: Store, config: &Config) -> Self {
        Self {
            store,
            security: config.security.clone(),
            seed: config.seed.clone(),
            report: SeedReport::default(),
        }
    }
}

/// What the seed stage inserted, in fixture order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SeedReport {
    pub admin: Option<User>,
    pub customers: Vec<Customer>,
    pub reservations: Vec<Reservation>,
}

pub struct DropTables;

#[async_trait::async_trait]
impl Stage<SeedContext> for DropTables {
    fn name(&self) -> &'static str {
        "drop tables"
    }

    async fn run(&self, ctx: &mut SeedContext) -> Result<()> {
        ctx.store
            .drop_tables()
            .await
            .inspect_err(|_| error!("Error dropping tables"))
    }
}

pub struct CreateTables;

#[async_trait::async_trait]
impl Stage<SeedContext> for CreateTables {
    fn name(&self) -> &'static str {
        "create tables"
    }

    async fn run(&self, ctx: &mut SeedContext) -> Result<()> {
        ctx.store
            .create_tables()
            .await
            .inspect_err(|_| error!("Error building tables"))
    }
}

pub struct InsertInitialData;

impl InsertInitialData {
    async fn insert(ctx: &SeedContext) -> Result<SeedReport> {
        let password_hash =
            hash_password_blocking(ctx.seed.admin_password.clone(), ctx.security.clone()).await?;

        let admin = ctx
            .store
            .create_user(NewUser {
                username: ctx.seed.admin_username.clone(),
                password_hash,
                email: ctx.seed.admin_email.clone(),
                role: Some(fixtures::ADMIN_ROLE.to_string()),
            })
            .await
            .context("Failed to insert admin user")?;
        info!(username = %admin.username, "Inserted admin user");

        let store = &ctx.store;

        let customers = fan_out(fixtures::customers(), |customer| async move {
            store.create_customer(customer).await
        })
        .await?;
        info!(count = customers.len(), "Inserted customers");

        let customer_ids: Vec<_> = customers.iter().map(|c| c.internal_id).collect();
        let reservations = fan_out(fixtures::reservations(&customer_ids)?, |reservation| async move {
            store.create_reservation(reservation).await
        })
        .await?;
        info!(count = reservations.len(), "Inserted reservations");

        Ok(SeedReport {
            admin: Some(admin),
            customers,
            reservations,
        })
    }
}

#[async_trait::async_trait]
impl Stage<SeedContext> for InsertInitialData {
    fn name(&self) -> &'static str {
        "insert initial data"
    }

    async fn run(&self, ctx: &mut SeedContext) -> Result<()> {
        ctx.report = Self::insert(ctx)
            .await
            .inspect_err(|_| error!("Error inserting initial data"))?;
        Ok(())
    }
}

#[must_use]
pub fn seed_pipeline() -> Pipeline<SeedContext> {
    Pipeline::new("seed")
        .stage(DropTables)
        .stage(CreateTables)
        .stage(InsertInitialData)
}

pub async fn run(store: Store, config: &Config) -> Result<SeedReport> {
    info!("Starting to seed the database...");

    let mut ctx = SeedContext::new(store, config);
    seed_pipeline()
        .run(&mut ctx)
        .await
        .inspect_err(|_| error!("Error seeding database"))?;

    info!(
        customers = ctx.report.customers.len(),
        reservations = ctx.report.reservations.len(),
        "Database seeded successfully"
    );
    Ok(ctx.report)
}
