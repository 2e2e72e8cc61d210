use sea_query::{ColumnDef, Index, Table};

use crate::table::PantryItem;

pub struct CreateTable;

#[async_trait::async_trait]
impl sqlx_migrator::Operation<sqlx::Sqlite> for CreateTable {
    async fn up(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = Table::create()
            .table(PantryItem::Table)
            .col(
                ColumnDef::new(PantryItem::Id)
                    .string()
                    .not_null()
                    .string_len(26)
                    .primary_key(),
            )
            .col(
                ColumnDef::new(PantryItem::OwnerId)
                    .string()
                    .not_null()
                    .string_len(26),
            )
            .col(
                ColumnDef::new(PantryItem::Name)
                    .string()
                    .not_null()
                    .string_len(100),
            )
            .col(ColumnDef::new(PantryItem::Quantity).double().not_null())
            .col(
                ColumnDef::new(PantryItem::UnitId)
                    .string()
                    .not_null()
                    .string_len(26),
            )
            .col(
                ColumnDef::new(PantryItem::CategoryId)
                    .string()
                    .not_null()
                    .string_len(26),
            )
            .col(
                ColumnDef::new(PantryItem::ExpirationDate)
                    .string()
                    .not_null()
                    .string_len(10),
            )
            .col(
                ColumnDef::new(PantryItem::Location)
                    .string()
                    .not_null()
                    .string_len(50),
            )
            .col(
                ColumnDef::new(PantryItem::CreatedAt)
                    .big_integer()
                    .not_null(),
            )
            .col(
                ColumnDef::new(PantryItem::UpdatedAt)
                    .big_integer()
                    .not_null(),
            )
            .to_owned()
            .to_string(sea_query::SqliteQueryBuilder);

        crate::execute(connection, statement).await
    }

    async fn down(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = Table::drop()
            .table(PantryItem::Table)
            .to_owned()
            .to_string(sea_query::SqliteQueryBuilder);

        crate::execute(connection, statement).await
    }
}

pub struct CreateOwnerIdx;

#[async_trait::async_trait]
impl sqlx_migrator::Operation<sqlx::Sqlite> for CreateOwnerIdx {
    async fn up(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = Index::create()
            .name("idx_pantry_item_owner_expiration")
            .table(PantryItem::Table)
            .col(PantryItem::OwnerId)
            .col(PantryItem::ExpirationDate)
            .to_owned()
            .to_string(sea_query::SqliteQueryBuilder);

        crate::execute(connection, statement).await
    }

    async fn down(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = Index::drop()
            .name("idx_pantry_item_owner_expiration")
            .table(PantryItem::Table)
            .to_owned()
            .to_string(sea_query::SqliteQueryBuilder);

        crate::execute(connection, statement).await
    }
}
