use sea_orm_migration::prelude::*;

use crate::db::schema;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for mut stmt in schema::create_statements() {
            manager.create_table(stmt.if_not_exists().to_owned()).await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for stmt in schema::drop_statements() {
            manager.drop_table(stmt).await?;
        }

        Ok(())
    }
}
