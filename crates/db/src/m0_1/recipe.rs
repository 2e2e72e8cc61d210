use sea_query::{ColumnDef, Index, Table};

use crate::table::Recipe;

pub struct CreateTable;

#[async_trait::async_trait]
impl sqlx_migrator::Operation<sqlx::Sqlite> for CreateTable {
    async fn up(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = Table::create()
            .table(Recipe::Table)
            .col(
                ColumnDef::new(Recipe::Id)
                    .string()
                    .not_null()
                    .string_len(26)
                    .primary_key(),
            )
            .col(
                ColumnDef::new(Recipe::OwnerId)
                    .string()
                    .not_null()
                    .string_len(26),
            )
            .col(
                ColumnDef::new(Recipe::Title)
                    .string()
                    .not_null()
                    .string_len(100),
            )
            .col(ColumnDef::new(Recipe::Instructions).text().not_null())
            .col(ColumnDef::new(Recipe::Servings).integer().not_null())
            .col(ColumnDef::new(Recipe::Ingredients).blob().not_null())
            .col(ColumnDef::new(Recipe::CreatedAt).big_integer().not_null())
            .col(ColumnDef::new(Recipe::UpdatedAt).big_integer().not_null())
            .to_owned()
            .to_string(sea_query::SqliteQueryBuilder);

        crate::execute(connection, statement).await
    }

    async fn down(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = Table::drop()
            .table(Recipe::Table)
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
            .name("idx_recipe_owner")
            .table(Recipe::Table)
            .col(Recipe::OwnerId)
            .to_owned()
            .to_string(sea_query::SqliteQueryBuilder);

        crate::execute(connection, statement).await
    }

    async fn down(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = Index::drop()
            .name("idx_recipe_owner")
            .table(Recipe::Table)
            .to_owned()
            .to_string(sea_query::SqliteQueryBuilder);

        crate::execute(connection, statement).await
    }
}
