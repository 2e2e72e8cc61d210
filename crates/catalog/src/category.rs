use larder_db::table::FoodCategory as CategoryTable;
use sea_query::{Expr, ExprTrait, Order, Query as SqlQuery, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct FoodCategory {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub created_at: u64,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CategoryInput {
    #[validate(length(min = 1, max = 50))]
    pub name: String,
    #[validate(length(max = 200))]
    pub description: Option<String>,
}

impl super::Command {
    pub async fn create_category(
        &self,
        input: CategoryInput,
    ) -> larder_shared::Result<FoodCategory> {
        input.validate()?;

        let name = input.name.trim().to_owned();
        if self.find_category_by_name(&name).await?.is_some() {
            larder_shared::user!("Category '{name}' already exists");
        }

        let category = FoodCategory {
            id: larder_shared::new_id(),
            name,
            description: input.description,
            created_at: larder_shared::timestamp(),
        };

        let statement = SqlQuery::insert()
            .into_table(CategoryTable::Table)
            .columns([
                CategoryTable::Id,
                CategoryTable::Name,
                CategoryTable::Description,
                CategoryTable::CreatedAt,
            ])
            .values_panic([
                category.id.to_owned().into(),
                category.name.to_owned().into(),
                category.description.to_owned().into(),
                category.created_at.into(),
            ])
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values)
            .execute(&self.0.write_db)
            .await?;

        tracing::info!(category_id = %category.id, name = %category.name, "category created");

        Ok(category)
    }

    pub async fn update_category(
        &self,
        id: impl Into<String>,
        input: CategoryInput,
    ) -> larder_shared::Result<FoodCategory> {
        input.validate()?;

        let id = id.into();
        let Some(mut category) = super::Query(self.0.read_db.clone()).find_category(&id).await? else {
            larder_shared::not_found!("category not found");
        };

        let name = input.name.trim().to_owned();
        let existing = self.find_category_by_name(&name).await?;
        if existing.is_some_and(|other| other.id != category.id) {
            larder_shared::user!("Category '{name}' already exists");
        }

        category.name = name;
        category.description = input.description;

        let statement = SqlQuery::update()
            .table(CategoryTable::Table)
            .values([
                (CategoryTable::Name, category.name.to_owned().into()),
                (CategoryTable::Description, category.description.to_owned().into()),
            ])
            .and_where(Expr::col(CategoryTable::Id).eq(&category.id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values)
            .execute(&self.0.write_db)
            .await?;

        Ok(category)
    }

    pub async fn delete_category(&self, id: impl Into<String>) -> larder_shared::Result<()> {
        let statement = SqlQuery::delete()
            .from_table(CategoryTable::Table)
            .and_where(Expr::col(CategoryTable::Id).eq(id.into()))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let result = sqlx::query_with(&sql, values)
            .execute(&self.0.write_db)
            .await?;

        if result.rows_affected() == 0 {
            larder_shared::not_found!("category not found");
        }

        Ok(())
    }

    async fn find_category_by_name(
        &self,
        name: &str,
    ) -> larder_shared::Result<Option<FoodCategory>> {
        let statement = select_categories()
            .and_where(Expr::col(CategoryTable::Name).eq(name))
            .limit(1)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, FoodCategory, _>(&sql, values)
            .fetch_optional(&self.0.read_db)
            .await?)
    }
}

impl super::Query {
    pub async fn list_categories(&self) -> larder_shared::Result<Vec<FoodCategory>> {
        let statement = select_categories()
            .order_by(CategoryTable::Name, Order::Asc)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, FoodCategory, _>(&sql, values)
            .fetch_all(&self.0)
            .await?)
    }

    pub async fn find_category(
        &self,
        id: impl Into<String>,
    ) -> larder_shared::Result<Option<FoodCategory>> {
        let statement = select_categories()
            .and_where(Expr::col(CategoryTable::Id).eq(id.into()))
            .limit(1)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, FoodCategory, _>(&sql, values)
            .fetch_optional(&self.0)
            .await?)
    }
}

fn select_categories() -> sea_query::SelectStatement {
    SqlQuery::select()
        .columns([
            CategoryTable::Id,
            CategoryTable::Name,
            CategoryTable::Description,
            CategoryTable::CreatedAt,
        ])
        .from(CategoryTable::Table)
        .to_owned()
}
