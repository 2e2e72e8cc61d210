use sea_query::{ColumnDef, Index, Table};

use crate::table::PantryLog;

pub struct CreateTable;

#[async_trait::async_trait]
impl sqlx_migrator::Operation<sqlx::Sqlite> for CreateTable {
    async fn up(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = Table::create()
            .table(PantryLog::Table)
            .col(
                ColumnDef::new(PantryLog::Id)
                    .string()
                    .not_null()
                    .string_len(26)
                    .primary_key(),
            )
            .col(
                ColumnDef::new(PantryLog::OwnerId)
                    .string()
                    .not_null()
                    .string_len(26),
            )
            .col(
                ColumnDef::new(PantryLog::PantryItemId)
                    .string()
                    .not_null()
                    .string_len(26),
            )
            .col(
                ColumnDef::new(PantryLog::Name)
                    .string()
                    .not_null()
                    .string_len(100),
            )
            .col(ColumnDef::new(PantryLog::Quantity).double().not_null())
            .col(
                ColumnDef::new(PantryLog::UnitId)
                    .string()
                    .not_null()
                    .string_len(26),
            )
            .col(
                ColumnDef::new(PantryLog::CategoryId)
                    .string()
                    .not_null()
                    .string_len(26),
            )
            .col(
                ColumnDef::new(PantryLog::Kind)
                    .string()
                    .not_null()
                    .string_len(10),
            )
            .col(
                ColumnDef::new(PantryLog::Date)
                    .string()
                    .not_null()
                    .string_len(10),
            )
            .col(ColumnDef::new(PantryLog::CreatedAt).big_integer().not_null())
            .to_owned()
            .to_string(sea_query::SqliteQueryBuilder);

        crate::execute(connection, statement).await
    }

    async fn down(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = Table::drop()
            .table(PantryLog::Table)
            .to_owned()
            .to_string(sea_query::SqliteQueryBuilder);

        crate::execute(connection, statement).await
    }
}

pub struct CreateOwnerDateIdx;

#[async_trait::async_trait]
impl sqlx_migrator::Operation<sqlx::Sqlite> for CreateOwnerDateIdx {
    async fn up(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = Index::create()
            .name("idx_pantry_log_owner_kind_date")
            .table(PantryLog::Table)
            .col(PantryLog::OwnerId)
            .col(PantryLog::Kind)
            .col(PantryLog::Date)
            .to_owned()
            .to_string(sea_query::SqliteQueryBuilder);

        crate::execute(connection, statement).await
    }

    async fn down(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = Index::drop()
            .name("idx_pantry_log_owner_kind_date")
            .table(PantryLog::Table)
            .to_owned()
            .to_string(sea_query::SqliteQueryBuilder);

        crate::execute(connection, statement).await
    }
}
