use larder_db::{table::Recipe as RecipeTable, types::Bitcode};
use sea_query::{Expr, ExprTrait, Order, Query as SqlQuery, SelectStatement, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::{SqlitePool, prelude::FromRow};

use crate::{Ingredient, Recipe};

#[derive(FromRow)]
pub(crate) struct RecipeRow {
    pub id: String,
    pub owner_id: String,
    pub title: String,
    pub instructions: String,
    pub servings: u32,
    pub ingredients: Bitcode<Vec<Ingredient>>,
    pub created_at: u64,
    pub updated_at: u64,
}

impl From<RecipeRow> for Recipe {
    fn from(row: RecipeRow) -> Self {
        Self {
            id: row.id,
            owner_id: row.owner_id,
            title: row.title,
            instructions: row.instructions,
            servings: row.servings,
            ingredients: row.ingredients.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Clone)]
pub struct Query(pub SqlitePool);

impl Query {
    /// Every recipe, oldest first.
    pub async fn list(&self) -> larder_shared::Result<Vec<Recipe>> {
        let statement = select_recipes()
            .order_by(RecipeTable::CreatedAt, Order::Asc)
            .order_by_expr(Expr::cust("rowid"), Order::Asc)
            .to_owned();

        self.fetch_all(statement).await
    }

    pub async fn find(&self, id: impl Into<String>) -> larder_shared::Result<Option<Recipe>> {
        let statement = select_recipes()
            .and_where(Expr::col(RecipeTable::Id).eq(id.into()))
            .limit(1)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, RecipeRow, _>(&sql, values)
            .fetch_optional(&self.0)
            .await?
            .map(Recipe::from))
    }

    pub async fn get(&self, id: impl Into<String>) -> larder_shared::Result<Recipe> {
        match self.find(id).await? {
            Some(recipe) => Ok(recipe),
            _ => larder_shared::not_found!("recipe not found"),
        }
    }

    /// Loads the given recipes. Unknown ids are skipped and the result order
    /// is unspecified.
    pub async fn find_many(&self, ids: &[String]) -> larder_shared::Result<Vec<Recipe>> {
        if ids.is_empty() {
            return Ok(vec![]);
        }

        let statement = select_recipes()
            .and_where(Expr::col(RecipeTable::Id).is_in(ids.iter().cloned()))
            .to_owned();

        self.fetch_all(statement).await
    }

    /// Resolves every id in order, duplicates included.
    ///
    /// Fails with `recipe not found` as soon as one id is unknown.
    pub async fn resolve(&self, ids: &[String]) -> larder_shared::Result<Vec<Recipe>> {
        let recipes = self.find_many(ids).await?;

        ids.iter()
            .map(|id| match recipes.iter().find(|r| &r.id == id) {
                Some(recipe) => Ok(recipe.clone()),
                _ => Err(larder_shared::Error::NotFound("recipe not found".to_owned())),
            })
            .collect()
    }

    async fn fetch_all(&self, statement: SelectStatement) -> larder_shared::Result<Vec<Recipe>> {
        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, RecipeRow, _>(&sql, values)
            .fetch_all(&self.0)
            .await?
            .into_iter()
            .map(Recipe::from)
            .collect())
    }
}

fn select_recipes() -> SelectStatement {
    SqlQuery::select()
        .columns([
            RecipeTable::Id,
            RecipeTable::OwnerId,
            RecipeTable::Title,
            RecipeTable::Instructions,
            RecipeTable::Servings,
            RecipeTable::Ingredients,
            RecipeTable::CreatedAt,
            RecipeTable::UpdatedAt,
        ])
        .from(RecipeTable::Table)
        .to_owned()
}
