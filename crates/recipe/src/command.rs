use std::collections::HashSet;

use larder_db::{table::Recipe as RecipeTable, types::Bitcode};
use larder_shared::{Metadata, State};
use sea_query::{Expr, ExprTrait, Query as SqlQuery, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Deserialize;
use validator::Validate;

use crate::{Ingredient, Query, Recipe};

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RecipeInput {
    #[validate(length(min = 1, max = 100))]
    pub title: String,
    #[serde(default)]
    #[validate(length(max = 10000))]
    pub instructions: String,
    #[validate(range(min = 1))]
    pub servings: u32,
    #[serde(default)]
    #[validate(nested)]
    pub ingredients: Vec<Ingredient>,
}

#[derive(Clone)]
pub struct Command(pub State);

impl Command {
    pub async fn create(
        &self,
        input: RecipeInput,
        metadata: &Metadata,
    ) -> larder_shared::Result<Recipe> {
        input.validate()?;

        let owner_id = metadata.trigger_by()?;
        self.ensure_catalog_refs(&input.ingredients).await?;

        let now = larder_shared::timestamp();
        let recipe = Recipe {
            id: larder_shared::new_id(),
            owner_id,
            title: input.title.trim().to_owned(),
            instructions: input.instructions,
            servings: input.servings,
            ingredients: input.ingredients,
            created_at: now,
            updated_at: now,
        };

        let statement = SqlQuery::insert()
            .into_table(RecipeTable::Table)
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
            .values_panic([
                recipe.id.to_owned().into(),
                recipe.owner_id.to_owned().into(),
                recipe.title.to_owned().into(),
                recipe.instructions.to_owned().into(),
                recipe.servings.into(),
                Bitcode::encode(&recipe.ingredients).into(),
                recipe.created_at.into(),
                recipe.updated_at.into(),
            ])
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values)
            .execute(&self.0.write_db)
            .await?;

        tracing::info!(recipe_id = %recipe.id, owner_id = %recipe.owner_id, "recipe created");

        Ok(recipe)
    }

    pub async fn update(
        &self,
        id: impl Into<String>,
        input: RecipeInput,
        metadata: &Metadata,
    ) -> larder_shared::Result<Recipe> {
        input.validate()?;

        let mut recipe = self.load_owned(id, metadata).await?;
        self.ensure_catalog_refs(&input.ingredients).await?;

        recipe.title = input.title.trim().to_owned();
        recipe.instructions = input.instructions;
        recipe.servings = input.servings;
        recipe.ingredients = input.ingredients;
        recipe.updated_at = larder_shared::timestamp();

        let statement = SqlQuery::update()
            .table(RecipeTable::Table)
            .values([
                (RecipeTable::Title, recipe.title.to_owned().into()),
                (RecipeTable::Instructions, recipe.instructions.to_owned().into()),
                (RecipeTable::Servings, recipe.servings.into()),
                (
                    RecipeTable::Ingredients,
                    Bitcode::encode(&recipe.ingredients).into(),
                ),
                (RecipeTable::UpdatedAt, recipe.updated_at.into()),
            ])
            .and_where(Expr::col(RecipeTable::Id).eq(&recipe.id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values)
            .execute(&self.0.write_db)
            .await?;

        Ok(recipe)
    }

    /// Meal plans still pointing at a deleted recipe fail to generate a
    /// shopping list until the reference is removed.
    pub async fn delete(
        &self,
        id: impl Into<String>,
        metadata: &Metadata,
    ) -> larder_shared::Result<()> {
        let recipe = self.load_owned(id, metadata).await?;

        let statement = SqlQuery::delete()
            .from_table(RecipeTable::Table)
            .and_where(Expr::col(RecipeTable::Id).eq(&recipe.id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values)
            .execute(&self.0.write_db)
            .await?;

        tracing::info!(recipe_id = %recipe.id, "recipe deleted");

        Ok(())
    }

    async fn load_owned(
        &self,
        id: impl Into<String>,
        metadata: &Metadata,
    ) -> larder_shared::Result<Recipe> {
        let recipe = Query(self.0.read_db.clone()).get(id).await?;
        metadata.ensure_owner(&recipe.owner_id)?;

        Ok(recipe)
    }

    async fn ensure_catalog_refs(&self, ingredients: &[Ingredient]) -> larder_shared::Result<()> {
        let catalog = larder_catalog::Query(self.0.read_db.clone());

        let units = ingredients
            .iter()
            .map(|i| i.unit_id.as_str())
            .collect::<HashSet<_>>();
        for unit_id in units {
            if !catalog.unit_exists(unit_id).await? {
                larder_shared::not_found!("unit not found");
            }
        }

        let categories = ingredients
            .iter()
            .map(|i| i.category_id.as_str())
            .collect::<HashSet<_>>();
        for category_id in categories {
            if !catalog.category_exists(category_id).await? {
                larder_shared::not_found!("category not found");
            }
        }

        Ok(())
    }
}
