use sea_query::{ColumnDef, Index, Table};

use crate::table::MealPlan;

pub struct CreateTable;

#[async_trait::async_trait]
impl sqlx_migrator::Operation<sqlx::Sqlite> for CreateTable {
    async fn up(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = Table::create()
            .table(MealPlan::Table)
            .col(
                ColumnDef::new(MealPlan::Id)
                    .string()
                    .not_null()
                    .string_len(26)
                    .primary_key(),
            )
            .col(
                ColumnDef::new(MealPlan::OwnerId)
                    .string()
                    .not_null()
                    .string_len(26),
            )
            .col(
                ColumnDef::new(MealPlan::Title)
                    .string()
                    .not_null()
                    .string_len(100),
            )
            .col(
                ColumnDef::new(MealPlan::Date)
                    .string()
                    .not_null()
                    .string_len(10),
            )
            .col(
                ColumnDef::new(MealPlan::PlanType)
                    .string()
                    .not_null()
                    .string_len(10),
            )
            .col(ColumnDef::new(MealPlan::RecipeIds).blob().not_null())
            .col(ColumnDef::new(MealPlan::CreatedAt).big_integer().not_null())
            .col(ColumnDef::new(MealPlan::UpdatedAt).big_integer().not_null())
            .to_owned()
            .to_string(sea_query::SqliteQueryBuilder);

        crate::execute(connection, statement).await
    }

    async fn down(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = Table::drop()
            .table(MealPlan::Table)
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
            .name("idx_meal_plan_owner_date")
            .table(MealPlan::Table)
            .col(MealPlan::OwnerId)
            .col(MealPlan::Date)
            .to_owned()
            .to_string(sea_query::SqliteQueryBuilder);

        crate::execute(connection, statement).await
    }

    async fn down(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = Index::drop()
            .name("idx_meal_plan_owner_date")
            .table(MealPlan::Table)
            .to_owned()
            .to_string(sea_query::SqliteQueryBuilder);

        crate::execute(connection, statement).await
    }
}
