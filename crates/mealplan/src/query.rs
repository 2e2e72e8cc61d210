use chrono::NaiveDate;
use larder_db::{table::MealPlan as MealPlanTable, types::Bitcode};
use larder_recipe::Recipe;
use larder_shared::Metadata;
use sea_query::{Expr, ExprTrait, Order, Query as SqlQuery, SelectStatement, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Serialize;
use sqlx::{SqlitePool, prelude::FromRow};

use crate::{DateRange, MealPlanType};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPlan {
    pub id: String,
    pub owner_id: String,
    pub title: String,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub plan_type: MealPlanType,
    pub recipe_ids: Vec<String>,
    pub created_at: u64,
    pub updated_at: u64,
}

impl MealPlan {
    pub fn date_range(&self) -> DateRange {
        self.plan_type.date_range(self.date)
    }
}

/// A meal plan with its recipes loaded, in plan order.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPlanDetail {
    #[serde(flatten)]
    pub meal_plan: MealPlan,
    pub recipes: Vec<Recipe>,
}

#[derive(FromRow)]
struct MealPlanRow {
    pub id: String,
    pub owner_id: String,
    pub title: String,
    pub date: sqlx::types::Text<NaiveDate>,
    pub plan_type: sqlx::types::Text<MealPlanType>,
    pub recipe_ids: Bitcode<Vec<String>>,
    pub created_at: u64,
    pub updated_at: u64,
}

impl From<MealPlanRow> for MealPlan {
    fn from(row: MealPlanRow) -> Self {
        Self {
            id: row.id,
            owner_id: row.owner_id,
            title: row.title,
            date: row.date.0,
            plan_type: row.plan_type.0,
            recipe_ids: row.recipe_ids.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Clone)]
pub struct Query(pub SqlitePool);

impl Query {
    pub async fn find(&self, id: impl Into<String>) -> larder_shared::Result<Option<MealPlan>> {
        let statement = select_meal_plans()
            .and_where(Expr::col(MealPlanTable::Id).eq(id.into()))
            .limit(1)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, MealPlanRow, _>(&sql, values)
            .fetch_optional(&self.0)
            .await?
            .map(MealPlan::from))
    }

    /// Loads a meal plan the actor owns.
    pub async fn get(
        &self,
        id: impl Into<String>,
        metadata: &Metadata,
    ) -> larder_shared::Result<MealPlan> {
        let Some(meal_plan) = self.find(id).await? else {
            larder_shared::not_found!("meal plan not found");
        };

        metadata.ensure_owner(&meal_plan.owner_id)?;

        Ok(meal_plan)
    }

    /// Same as [`Query::get`] with the recipes attached. Recipes deleted since
    /// the plan was saved are left out.
    pub async fn get_detail(
        &self,
        id: impl Into<String>,
        metadata: &Metadata,
    ) -> larder_shared::Result<MealPlanDetail> {
        let meal_plan = self.get(id, metadata).await?;
        let found = larder_recipe::Query(self.0.clone())
            .find_many(&meal_plan.recipe_ids)
            .await?;

        let recipes = meal_plan
            .recipe_ids
            .iter()
            .filter_map(|id| found.iter().find(|r| &r.id == id).cloned())
            .collect();

        Ok(MealPlanDetail { meal_plan, recipes })
    }

    pub async fn list(&self, owner_id: &str) -> larder_shared::Result<Vec<MealPlan>> {
        let statement = select_meal_plans()
            .and_where(Expr::col(MealPlanTable::OwnerId).eq(owner_id))
            .order_by(MealPlanTable::Date, Order::Desc)
            .order_by(MealPlanTable::CreatedAt, Order::Desc)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, MealPlanRow, _>(&sql, values)
            .fetch_all(&self.0)
            .await?
            .into_iter()
            .map(MealPlan::from)
            .collect())
    }
}

fn select_meal_plans() -> SelectStatement {
    SqlQuery::select()
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
        .from(MealPlanTable::Table)
        .to_owned()
}
