use sea_query::{ColumnDef, Index, Table};

use crate::table::ShoppingList;

pub struct CreateTable;

#[async_trait::async_trait]
impl sqlx_migrator::Operation<sqlx::Sqlite> for CreateTable {
    async fn up(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = Table::create()
            .table(ShoppingList::Table)
            .col(
                ColumnDef::new(ShoppingList::Id)
                    .string()
                    .not_null()
                    .string_len(26)
                    .primary_key(),
            )
            .col(
                ColumnDef::new(ShoppingList::OwnerId)
                    .string()
                    .not_null()
                    .string_len(26),
            )
            .col(ColumnDef::new(ShoppingList::GroupId).string().string_len(26))
            .col(
                ColumnDef::new(ShoppingList::MealPlanId)
                    .string()
                    .string_len(26),
            )
            .col(
                ColumnDef::new(ShoppingList::Name)
                    .string()
                    .not_null()
                    .string_len(150),
            )
            .col(
                ColumnDef::new(ShoppingList::StartDate)
                    .string()
                    .not_null()
                    .string_len(10),
            )
            .col(
                ColumnDef::new(ShoppingList::EndDate)
                    .string()
                    .not_null()
                    .string_len(10),
            )
            .col(ColumnDef::new(ShoppingList::Items).blob().not_null())
            .col(
                ColumnDef::new(ShoppingList::CreatedAt)
                    .big_integer()
                    .not_null(),
            )
            .col(
                ColumnDef::new(ShoppingList::UpdatedAt)
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
            .table(ShoppingList::Table)
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
            .name("idx_shopping_list_owner")
            .table(ShoppingList::Table)
            .col(ShoppingList::OwnerId)
            .to_owned()
            .to_string(sea_query::SqliteQueryBuilder);

        crate::execute(connection, statement).await
    }

    async fn down(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = Index::drop()
            .name("idx_shopping_list_owner")
            .table(ShoppingList::Table)
            .to_owned()
            .to_string(sea_query::SqliteQueryBuilder);

        crate::execute(connection, statement).await
    }
}
