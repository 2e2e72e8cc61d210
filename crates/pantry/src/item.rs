use chrono::{Days, NaiveDate};
use larder_db::table::PantryItem as PantryItemTable;
use larder_shared::Metadata;
use sea_query::{Expr, ExprTrait, Order, Query as SqlQuery, SelectStatement, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use validator::Validate;

/// Default look-ahead for the expiring items listing.
pub const DEFAULT_EXPIRING_DAYS: u64 = 7;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PantryItem {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    pub quantity: f64,
    pub unit_id: String,
    pub category_id: String,
    pub expiration_date: NaiveDate,
    pub location: String,
    pub created_at: u64,
    pub updated_at: u64,
}

#[derive(FromRow)]
pub(crate) struct PantryItemRow {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    pub quantity: f64,
    pub unit_id: String,
    pub category_id: String,
    pub expiration_date: sqlx::types::Text<NaiveDate>,
    pub location: String,
    pub created_at: u64,
    pub updated_at: u64,
}

impl From<PantryItemRow> for PantryItem {
    fn from(row: PantryItemRow) -> Self {
        Self {
            id: row.id,
            owner_id: row.owner_id,
            name: row.name,
            quantity: row.quantity,
            unit_id: row.unit_id,
            category_id: row.category_id,
            expiration_date: row.expiration_date.0,
            location: row.location,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PantryItemInput {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(range(min = 0.0))]
    pub quantity: f64,
    #[validate(length(min = 1))]
    pub unit_id: String,
    #[validate(length(min = 1))]
    pub category_id: String,
    pub expiration_date: NaiveDate,
    #[validate(length(min = 1, max = 50))]
    pub location: String,
}

impl super::Command {
    pub async fn create(
        &self,
        input: PantryItemInput,
        metadata: &Metadata,
    ) -> larder_shared::Result<PantryItem> {
        input.validate()?;

        let owner_id = metadata.trigger_by()?;
        self.ensure_catalog_refs(&input.unit_id, &input.category_id)
            .await?;

        let now = larder_shared::timestamp();
        let item = PantryItem {
            id: larder_shared::new_id(),
            owner_id,
            name: input.name.trim().to_owned(),
            quantity: input.quantity,
            unit_id: input.unit_id,
            category_id: input.category_id,
            expiration_date: input.expiration_date,
            location: input.location.trim().to_owned(),
            created_at: now,
            updated_at: now,
        };

        let statement = SqlQuery::insert()
            .into_table(PantryItemTable::Table)
            .columns([
                PantryItemTable::Id,
                PantryItemTable::OwnerId,
                PantryItemTable::Name,
                PantryItemTable::Quantity,
                PantryItemTable::UnitId,
                PantryItemTable::CategoryId,
                PantryItemTable::ExpirationDate,
                PantryItemTable::Location,
                PantryItemTable::CreatedAt,
                PantryItemTable::UpdatedAt,
            ])
            .values_panic([
                item.id.to_owned().into(),
                item.owner_id.to_owned().into(),
                item.name.to_owned().into(),
                item.quantity.into(),
                item.unit_id.to_owned().into(),
                item.category_id.to_owned().into(),
                item.expiration_date.to_string().into(),
                item.location.to_owned().into(),
                item.created_at.into(),
                item.updated_at.into(),
            ])
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values)
            .execute(&self.0.write_db)
            .await?;

        tracing::info!(item_id = %item.id, owner_id = %item.owner_id, "pantry item added");

        Ok(item)
    }

    pub async fn update(
        &self,
        id: impl Into<String>,
        input: PantryItemInput,
        metadata: &Metadata,
    ) -> larder_shared::Result<PantryItem> {
        input.validate()?;

        let mut item = self.query().get(id, metadata).await?;
        self.ensure_catalog_refs(&input.unit_id, &input.category_id)
            .await?;

        item.name = input.name.trim().to_owned();
        item.quantity = input.quantity;
        item.unit_id = input.unit_id;
        item.category_id = input.category_id;
        item.expiration_date = input.expiration_date;
        item.location = input.location.trim().to_owned();
        item.updated_at = larder_shared::timestamp();

        let statement = SqlQuery::update()
            .table(PantryItemTable::Table)
            .values([
                (PantryItemTable::Name, item.name.to_owned().into()),
                (PantryItemTable::Quantity, item.quantity.into()),
                (PantryItemTable::UnitId, item.unit_id.to_owned().into()),
                (PantryItemTable::CategoryId, item.category_id.to_owned().into()),
                (
                    PantryItemTable::ExpirationDate,
                    item.expiration_date.to_string().into(),
                ),
                (PantryItemTable::Location, item.location.to_owned().into()),
                (PantryItemTable::UpdatedAt, item.updated_at.into()),
            ])
            .and_where(Expr::col(PantryItemTable::Id).eq(&item.id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values)
            .execute(&self.0.write_db)
            .await?;

        Ok(item)
    }

    pub async fn delete(
        &self,
        id: impl Into<String>,
        metadata: &Metadata,
    ) -> larder_shared::Result<()> {
        let item = self.query().get(id, metadata).await?;

        let statement = SqlQuery::delete()
            .from_table(PantryItemTable::Table)
            .and_where(Expr::col(PantryItemTable::Id).eq(&item.id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values)
            .execute(&self.0.write_db)
            .await?;

        tracing::info!(item_id = %item.id, "pantry item deleted");

        Ok(())
    }
}

impl super::Query {
    pub async fn find(&self, id: impl Into<String>) -> larder_shared::Result<Option<PantryItem>> {
        find_item(&self.0, id.into()).await
    }

    /// Loads an item the actor owns.
    pub async fn get(
        &self,
        id: impl Into<String>,
        metadata: &Metadata,
    ) -> larder_shared::Result<PantryItem> {
        let Some(item) = self.find(id).await? else {
            larder_shared::not_found!("pantry item not found");
        };

        metadata.ensure_owner(&item.owner_id)?;

        Ok(item)
    }

    /// Every item of the owner, soonest expiration first.
    pub async fn list(&self, owner_id: &str) -> larder_shared::Result<Vec<PantryItem>> {
        let statement = select_items()
            .and_where(Expr::col(PantryItemTable::OwnerId).eq(owner_id))
            .order_by(PantryItemTable::ExpirationDate, Order::Asc)
            .order_by(PantryItemTable::Name, Order::Asc)
            .to_owned();

        self.fetch_all(statement).await
    }

    /// Every item of the owner in insertion order.
    ///
    /// Recipe suggestions pick the first item matching an ingredient, so the
    /// order returned here decides which one wins.
    pub async fn stock(&self, owner_id: &str) -> larder_shared::Result<Vec<PantryItem>> {
        let statement = select_items()
            .and_where(Expr::col(PantryItemTable::OwnerId).eq(owner_id))
            .order_by(PantryItemTable::CreatedAt, Order::Asc)
            .order_by_expr(Expr::cust("rowid"), Order::Asc)
            .to_owned();

        self.fetch_all(statement).await
    }

    /// Items expiring between `today` and `today + days`, both inclusive.
    pub async fn expiring(
        &self,
        owner_id: &str,
        today: NaiveDate,
        days: u64,
    ) -> larder_shared::Result<Vec<PantryItem>> {
        let until = today.checked_add_days(Days::new(days)).unwrap_or(NaiveDate::MAX);

        let statement = select_items()
            .and_where(Expr::col(PantryItemTable::OwnerId).eq(owner_id))
            .and_where(Expr::col(PantryItemTable::ExpirationDate).gte(today.to_string()))
            .and_where(Expr::col(PantryItemTable::ExpirationDate).lte(until.to_string()))
            .order_by(PantryItemTable::ExpirationDate, Order::Asc)
            .order_by(PantryItemTable::Name, Order::Asc)
            .to_owned();

        self.fetch_all(statement).await
    }

    /// Items whose expiration date is before `today`.
    pub async fn expired(
        &self,
        owner_id: &str,
        today: NaiveDate,
    ) -> larder_shared::Result<Vec<PantryItem>> {
        let statement = select_items()
            .and_where(Expr::col(PantryItemTable::OwnerId).eq(owner_id))
            .and_where(Expr::col(PantryItemTable::ExpirationDate).lt(today.to_string()))
            .order_by(PantryItemTable::ExpirationDate, Order::Asc)
            .order_by(PantryItemTable::Name, Order::Asc)
            .to_owned();

        self.fetch_all(statement).await
    }

    async fn fetch_all(&self, statement: SelectStatement) -> larder_shared::Result<Vec<PantryItem>> {
        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, PantryItemRow, _>(&sql, values)
            .fetch_all(&self.0)
            .await?
            .into_iter()
            .map(PantryItem::from)
            .collect())
    }
}

pub(crate) async fn find_item<'e, E>(
    executor: E,
    id: String,
) -> larder_shared::Result<Option<PantryItem>>
where
    E: sqlx::SqliteExecutor<'e>,
{
    let statement = select_items()
        .and_where(Expr::col(PantryItemTable::Id).eq(id))
        .limit(1)
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_as_with::<_, PantryItemRow, _>(&sql, values)
        .fetch_optional(executor)
        .await?
        .map(PantryItem::from))
}

pub(crate) fn select_items() -> SelectStatement {
    SqlQuery::select()
        .columns([
            PantryItemTable::Id,
            PantryItemTable::OwnerId,
            PantryItemTable::Name,
            PantryItemTable::Quantity,
            PantryItemTable::UnitId,
            PantryItemTable::CategoryId,
            PantryItemTable::ExpirationDate,
            PantryItemTable::Location,
            PantryItemTable::CreatedAt,
            PantryItemTable::UpdatedAt,
        ])
        .from(PantryItemTable::Table)
        .to_owned()
}
