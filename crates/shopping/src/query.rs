use chrono::NaiveDate;
use larder_db::{table::ShoppingList as ShoppingListTable, types::Bitcode};
use larder_shared::Metadata;
use sea_query::{Expr, ExprTrait, Order, Query as SqlQuery, SelectStatement, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::{SqlitePool, prelude::FromRow};

use crate::{ShoppingList, ShoppingListItem};

#[derive(FromRow)]
struct ShoppingListRow {
    pub id: String,
    pub owner_id: String,
    pub group_id: Option<String>,
    pub meal_plan_id: Option<String>,
    pub name: String,
    pub start_date: sqlx::types::Text<NaiveDate>,
    pub end_date: sqlx::types::Text<NaiveDate>,
    pub items: Bitcode<Vec<ShoppingListItem>>,
    pub created_at: u64,
    pub updated_at: u64,
}

impl From<ShoppingListRow> for ShoppingList {
    fn from(row: ShoppingListRow) -> Self {
        Self {
            id: row.id,
            owner_id: row.owner_id,
            group_id: row.group_id,
            meal_plan_id: row.meal_plan_id,
            name: row.name,
            start_date: row.start_date.0,
            end_date: row.end_date.0,
            items: row.items.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Clone)]
pub struct Query(pub SqlitePool);

impl Query {
    pub async fn find(&self, id: impl Into<String>) -> larder_shared::Result<Option<ShoppingList>> {
        find_list(&self.0, id.into()).await
    }

    /// Loads a list the actor owns.
    pub async fn get(
        &self,
        id: impl Into<String>,
        metadata: &Metadata,
    ) -> larder_shared::Result<ShoppingList> {
        let Some(list) = self.find(id).await? else {
            larder_shared::not_found!("shopping list not found");
        };

        metadata.ensure_owner(&list.owner_id)?;

        Ok(list)
    }

    /// Lists of the owner, most recent period first.
    pub async fn list(&self, owner_id: &str) -> larder_shared::Result<Vec<ShoppingList>> {
        let statement = select_lists()
            .and_where(Expr::col(ShoppingListTable::OwnerId).eq(owner_id))
            .order_by(ShoppingListTable::StartDate, Order::Desc)
            .order_by(ShoppingListTable::CreatedAt, Order::Desc)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, ShoppingListRow, _>(&sql, values)
            .fetch_all(&self.0)
            .await?
            .into_iter()
            .map(ShoppingList::from)
            .collect())
    }
}

pub(crate) async fn find_list<'e, E>(
    executor: E,
    id: String,
) -> larder_shared::Result<Option<ShoppingList>>
where
    E: sqlx::SqliteExecutor<'e>,
{
    let statement = select_lists()
        .and_where(Expr::col(ShoppingListTable::Id).eq(id))
        .limit(1)
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_as_with::<_, ShoppingListRow, _>(&sql, values)
        .fetch_optional(executor)
        .await?
        .map(ShoppingList::from))
}

fn select_lists() -> SelectStatement {
    SqlQuery::select()
        .columns([
            ShoppingListTable::Id,
            ShoppingListTable::OwnerId,
            ShoppingListTable::GroupId,
            ShoppingListTable::MealPlanId,
            ShoppingListTable::Name,
            ShoppingListTable::StartDate,
            ShoppingListTable::EndDate,
            ShoppingListTable::Items,
            ShoppingListTable::CreatedAt,
            ShoppingListTable::UpdatedAt,
        ])
        .from(ShoppingListTable::Table)
        .to_owned()
}
