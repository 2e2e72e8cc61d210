use sea_query::{ColumnDef, Index, Table};

use crate::table::{FoodCategory, Unit};

pub struct CreateUnitTable;

#[async_trait::async_trait]
impl sqlx_migrator::Operation<sqlx::Sqlite> for CreateUnitTable {
    async fn up(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = Table::create()
            .table(Unit::Table)
            .col(
                ColumnDef::new(Unit::Id)
                    .string()
                    .not_null()
                    .string_len(26)
                    .primary_key(),
            )
            .col(
                ColumnDef::new(Unit::Name)
                    .string()
                    .not_null()
                    .string_len(30),
            )
            .col(ColumnDef::new(Unit::Abbreviation).string().string_len(10))
            .col(ColumnDef::new(Unit::CreatedAt).big_integer().not_null())
            .to_owned()
            .to_string(sea_query::SqliteQueryBuilder);

        crate::execute(connection, statement).await
    }

    async fn down(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = Table::drop()
            .table(Unit::Table)
            .to_owned()
            .to_string(sea_query::SqliteQueryBuilder);

        crate::execute(connection, statement).await
    }
}

pub struct CreateUnitNameIdx;

#[async_trait::async_trait]
impl sqlx_migrator::Operation<sqlx::Sqlite> for CreateUnitNameIdx {
    async fn up(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = Index::create()
            .name("idx_unit_name")
            .table(Unit::Table)
            .unique()
            .col(Unit::Name)
            .to_owned()
            .to_string(sea_query::SqliteQueryBuilder);

        crate::execute(connection, statement).await
    }

    async fn down(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = Index::drop()
            .name("idx_unit_name")
            .table(Unit::Table)
            .to_owned()
            .to_string(sea_query::SqliteQueryBuilder);

        crate::execute(connection, statement).await
    }
}

pub struct CreateCategoryTable;

#[async_trait::async_trait]
impl sqlx_migrator::Operation<sqlx::Sqlite> for CreateCategoryTable {
    async fn up(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = Table::create()
            .table(FoodCategory::Table)
            .col(
                ColumnDef::new(FoodCategory::Id)
                    .string()
                    .not_null()
                    .string_len(26)
                    .primary_key(),
            )
            .col(
                ColumnDef::new(FoodCategory::Name)
                    .string()
                    .not_null()
                    .string_len(50),
            )
            .col(
                ColumnDef::new(FoodCategory::Description)
                    .string()
                    .string_len(200),
            )
            .col(
                ColumnDef::new(FoodCategory::CreatedAt)
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
            .table(FoodCategory::Table)
            .to_owned()
            .to_string(sea_query::SqliteQueryBuilder);

        crate::execute(connection, statement).await
    }
}

pub struct CreateCategoryNameIdx;

#[async_trait::async_trait]
impl sqlx_migrator::Operation<sqlx::Sqlite> for CreateCategoryNameIdx {
    async fn up(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = Index::create()
            .name("idx_food_category_name")
            .table(FoodCategory::Table)
            .unique()
            .col(FoodCategory::Name)
            .to_owned()
            .to_string(sea_query::SqliteQueryBuilder);

        crate::execute(connection, statement).await
    }

    async fn down(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = Index::drop()
            .name("idx_food_category_name")
            .table(FoodCategory::Table)
            .to_owned()
            .to_string(sea_query::SqliteQueryBuilder);

        crate::execute(connection, statement).await
    }
}
