//! Table definitions shared by the migrator and the seeder.
//!
//! Statements are listed in dependency order; drops run in reverse.

use anyhow::{Context, Result};
use sea_orm::sea_query::{
    ColumnDef, Expr, ForeignKey, ForeignKeyAction, Index, Table, TableCreateStatement,
    TableDropStatement,
};
use sea_orm::{ConnectionTrait, DatabaseConnection};
use tracing::debug;

use crate::entities::prelude::*;
use crate::entities::{customers, reservation_services, reservations, services, users};

/// SQL `LIKE` pattern every customer email must match.
pub const EMAIL_PATTERN: &str = "%_@__%.__%";

#[must_use]
pub fn users_table() -> TableCreateStatement {
    Table::create()
        .table(Users)
        .col(
            ColumnDef::new(users::Column::InternalId)
                .uuid()
                .not_null()
                .primary_key(),
        )
        .col(
            ColumnDef::new(users::Column::Username)
                .string_len(255)
                .not_null()
                .unique_key(),
        )
        .col(
            ColumnDef::new(users::Column::Password)
                .string_len(255)
                .not_null(),
        )
        .col(ColumnDef::new(users::Column::Email).string_len(255).not_null())
        .col(
            ColumnDef::new(users::Column::Role)
                .string_len(10)
                .not_null()
                .default("user"),
        )
        .to_owned()
}

#[must_use]
pub fn customers_table() -> TableCreateStatement {
    Table::create()
        .table(Customers)
        .col(
            ColumnDef::new(customers::Column::InternalId)
                .uuid()
                .not_null()
                .primary_key(),
        )
        .col(
            ColumnDef::new(customers::Column::CustomerId)
                .integer()
                .not_null()
                .unique_key(),
        )
        .col(
            ColumnDef::new(customers::Column::FirstName)
                .string_len(255)
                .not_null(),
        )
        .col(
            ColumnDef::new(customers::Column::LastName)
                .string_len(255)
                .not_null(),
        )
        .col(
            ColumnDef::new(customers::Column::Email)
                .string_len(255)
                .not_null()
                .check(Expr::col(customers::Column::Email).like(EMAIL_PATTERN)),
        )
        .to_owned()
}

#[must_use]
pub fn reservations_table() -> TableCreateStatement {
    Table::create()
        .table(Reservations)
        .col(
            ColumnDef::new(reservations::Column::InternalId)
                .uuid()
                .not_null()
                .primary_key(),
        )
        .col(
            ColumnDef::new(reservations::Column::ReservationId)
                .integer()
                .not_null()
                .unique_key(),
        )
        .col(
            ColumnDef::new(reservations::Column::StartDate)
                .date()
                .not_null(),
        )
        .col(ColumnDef::new(reservations::Column::EndDate).date().not_null())
        .col(
            ColumnDef::new(reservations::Column::CustomerId)
                .uuid()
                .not_null(),
        )
        .foreign_key(
            ForeignKey::create()
                .name("fk_reservations_customer")
                .from(Reservations, reservations::Column::CustomerId)
                .to(Customers, customers::Column::InternalId)
                .on_delete(ForeignKeyAction::NoAction),
        )
        .check(
            Expr::col(reservations::Column::StartDate)
                .lt(Expr::col(reservations::Column::EndDate)),
        )
        .to_owned()
}

#[must_use]
pub fn services_table() -> TableCreateStatement {
    Table::create()
        .table(Services)
        .col(
            ColumnDef::new(services::Column::InternalId)
                .uuid()
                .not_null()
                .primary_key(),
        )
        .col(
            ColumnDef::new(services::Column::ServiceId)
                .integer()
                .not_null()
                .unique_key(),
        )
        .col(ColumnDef::new(services::Column::Name).string_len(255).not_null())
        .col(ColumnDef::new(services::Column::Note).string_len(255).not_null())
        .to_owned()
}

#[must_use]
pub fn reservation_services_table() -> TableCreateStatement {
    Table::create()
        .table(ReservationServices)
        .col(
            ColumnDef::new(reservation_services::Column::InternalId)
                .uuid()
                .not_null()
                .primary_key(),
        )
        .col(
            ColumnDef::new(reservation_services::Column::ReservationId)
                .uuid()
                .not_null(),
        )
        .col(
            ColumnDef::new(reservation_services::Column::ServiceId)
                .uuid()
                .not_null(),
        )
        .foreign_key(
            ForeignKey::create()
                .name("fk_reservation_services_reservation")
                .from(
                    ReservationServices,
                    reservation_services::Column::ReservationId,
                )
                .to(Reservations, reservations::Column::InternalId)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .foreign_key(
            ForeignKey::create()
                .name("fk_reservation_services_service")
                .from(ReservationServices, reservation_services::Column::ServiceId)
                .to(Services, services::Column::InternalId)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .index(
            Index::create()
                .name("unique_reservation_service")
                .col(reservation_services::Column::ReservationId)
                .col(reservation_services::Column::ServiceId)
                .unique(),
        )
        .to_owned()
}

/// All tables, parents before children.
#[must_use]
pub fn create_statements() -> Vec<TableCreateStatement> {
    vec![
        users_table(),
        customers_table(),
        reservations_table(),
        services_table(),
        reservation_services_table(),
    ]
}

/// All tables, children before parents.
#[must_use]
pub fn drop_statements() -> Vec<TableDropStatement> {
    vec![
        Table::drop()
            .table(ReservationServices)
            .if_exists()
            .to_owned(),
        Table::drop().table(Reservations).if_exists().to_owned(),
        Table::drop().table(Services).if_exists().to_owned(),
        Table::drop().table(Customers).if_exists().to_owned(),
        Table::drop().table(Users).if_exists().to_owned(),
    ]
}

pub async fn drop_tables(conn: &DatabaseConnection) -> Result<()> {
    let backend = conn.get_database_backend();
    for stmt in drop_statements() {
        let stmt = backend.build(&stmt);
        debug!(sql = %stmt.sql, "Dropping table");
        conn.execute(stmt).await.context("Failed to drop table")?;
    }
    Ok(())
}

pub async fn create_tables(conn: &DatabaseConnection) -> Result<()> {
    let backend = conn.get_database_backend();
    for stmt in create_statements() {
        let stmt = backend.build(&stmt);
        debug!(sql = %stmt.sql, "Creating table");
        conn.execute(stmt).await.context("Failed to create table")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::DbBackend;

    #[test]
    fn test_customers_table_has_email_check() {
        let sql = DbBackend::Sqlite.build(&customers_table()).sql;
        assert!(sql.contains("CHECK"));
        assert!(sql.contains(EMAIL_PATTERN));
    }

    #[test]
    fn test_reservations_table_has_date_check_and_fk() {
        let sql = DbBackend::Sqlite.build(&reservations_table()).sql;
        assert!(sql.contains("CHECK"));
        assert!(sql.contains("\"start_date\" < \"end_date\""));
        assert!(sql.contains("REFERENCES \"customers\""));
    }

    #[test]
    fn test_reservation_services_reference_reservations() {
        let sql = DbBackend::Sqlite.build(&reservation_services_table()).sql;
        assert!(sql.contains("REFERENCES \"reservations\""));
        assert!(sql.contains("REFERENCES \"services\""));
    }

    #[test]
    fn test_drop_order_is_reverse_of_create() {
        let created: Vec<String> = create_statements()
            .iter()
            .map(|s| DbBackend::Sqlite.build(s).sql)
            .collect();
        let dropped: Vec<String> = drop_statements()
            .iter()
            .map(|s| DbBackend::Sqlite.build(s).sql)
            .collect();

        assert_eq!(created.len(), dropped.len());
        assert!(dropped[0].contains("\"reservation_services\""));
        assert!(dropped[4].contains("\"users\""));
        assert!(created[0].contains("\"users\""));
    }
}
