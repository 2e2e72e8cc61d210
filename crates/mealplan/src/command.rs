use chrono::NaiveDate;
use larder_db::{table::MealPlan as MealPlanTable, types::Bitcode};
use larder_shared::{Metadata, State};
use sea_query::{Expr, ExprTrait, Query as SqlQuery, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Deserialize;
use validator::Validate;

use crate::{MealPlan, MealPlanType, Query};

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MealPlanInput {
    #[validate(length(min = 1, max = 100))]
    pub title: String,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub plan_type: MealPlanType,
    #[validate(length(min = 1, message = "a meal plan needs at least one recipe"))]
    pub recipe_ids: Vec<String>,
}

#[derive(Clone)]
pub struct Command(pub State);

impl Command {
    pub async fn create(
        &self,
        input: MealPlanInput,
        metadata: &Metadata,
    ) -> larder_shared::Result<MealPlan> {
        input.validate()?;

        let owner_id = metadata.trigger_by()?;
        self.ensure_recipes(&input.recipe_ids).await?;

        let now = larder_shared::timestamp();
        let meal_plan = MealPlan {
            id: larder_shared::new_id(),
            owner_id,
            title: input.title.trim().to_owned(),
            date: input.date,
            plan_type: input.plan_type,
            recipe_ids: input.recipe_ids,
            created_at: now,
            updated_at: now,
        };

        let statement = SqlQuery::insert()
            .into_table(MealPlanTable::Table)
            .columns([
                MealPlanTable::Id,
                MealPlanTable::OwnerId,
                MealPlanTable::Title,
                MealPlanTable::Date,
                MealPlanTable::PlanType,
                MealPlanTable::RecipeIds,
                MealPlanTable::CreatedAt,
                MealPlanTable::UpdatedAt,
            ])
            .values_panic([
                meal_plan.id.to_owned().into(),
                meal_plan.owner_id.to_owned().into(),
                meal_plan.title.to_owned().into(),
                meal_plan.date.to_string().into(),
                meal_plan.plan_type.to_string().into(),
                Bitcode::encode(&meal_plan.recipe_ids).into(),
                meal_plan.created_at.into(),
                meal_plan.updated_at.into(),
            ])
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values)
            .execute(&self.0.write_db)
            .await?;

        tracing::info!(
            meal_plan_id = %meal_plan.id,
            plan_type = %meal_plan.plan_type,
            recipes = meal_plan.recipe_ids.len(),
            "meal plan created"
        );

        Ok(meal_plan)
    }

    pub async fn update(
        &self,
        id: impl Into<String>,
        input: MealPlanInput,
        metadata: &Metadata,
    ) -> larder_shared::Result<MealPlan> {
        input.validate()?;

        let mut meal_plan = Query(self.0.read_db.clone()).get(id, metadata).await?;
        self.ensure_recipes(&input.recipe_ids).await?;

        meal_plan.title = input.title.trim().to_owned();
        meal_plan.date = input.date;
        meal_plan.plan_type = input.plan_type;
        meal_plan.recipe_ids = input.recipe_ids;
        meal_plan.updated_at = larder_shared::timestamp();

        let statement = SqlQuery::update()
            .table(MealPlanTable::Table)
            .values([
                (MealPlanTable::Title, meal_plan.title.to_owned().into()),
                (MealPlanTable::Date, meal_plan.date.to_string().into()),
                (MealPlanTable::PlanType, meal_plan.plan_type.to_string().into()),
                (
                    MealPlanTable::RecipeIds,
                    Bitcode::encode(&meal_plan.recipe_ids).into(),
                ),
                (MealPlanTable::UpdatedAt, meal_plan.updated_at.into()),
            ])
            .and_where(Expr::col(MealPlanTable::Id).eq(&meal_plan.id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values)
            .execute(&self.0.write_db)
            .await?;

        Ok(meal_plan)
    }

    pub async fn delete(
        &self,
        id: impl Into<String>,
        metadata: &Metadata,
    ) -> larder_shared::Result<()> {
        let meal_plan = Query(self.0.read_db.clone()).get(id, metadata).await?;

        let statement = SqlQuery::delete()
            .from_table(MealPlanTable::Table)
            .and_where(Expr::col(MealPlanTable::Id).eq(&meal_plan.id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values)
            .execute(&self.0.write_db)
            .await?;

        tracing::info!(meal_plan_id = %meal_plan.id, "meal plan deleted");

        Ok(())
    }

    async fn ensure_recipes(&self, ids: &[String]) -> larder_shared::Result<()> {
        larder_recipe::Query(self.0.read_db.clone())
            .resolve(ids)
            .await?;

        Ok(())
    }
}
