use chrono::NaiveDate;
use larder_db::table::{PantryItem as PantryItemTable, PantryLog as PantryLogTable};
use larder_shared::Metadata;
use sea_query::{Expr, ExprTrait, Order, Query as SqlQuery, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use strum::{AsRefStr, Display, EnumString};
use validator::Validate;

use crate::{PantryItem, item::find_item};

#[derive(
    EnumString, Display, AsRefStr, Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PantryLogKind {
    Consumed,
    Wasted,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PantryLogEntry {
    pub id: String,
    pub owner_id: String,
    pub pantry_item_id: String,
    pub name: String,
    pub quantity: f64,
    pub unit_id: String,
    pub category_id: String,
    pub kind: PantryLogKind,
    pub date: NaiveDate,
    pub created_at: u64,
}

#[derive(FromRow)]
struct PantryLogRow {
    pub id: String,
    pub owner_id: String,
    pub pantry_item_id: String,
    pub name: String,
    pub quantity: f64,
    pub unit_id: String,
    pub category_id: String,
    pub kind: sqlx::types::Text<PantryLogKind>,
    pub date: sqlx::types::Text<NaiveDate>,
    pub created_at: u64,
}

impl From<PantryLogRow> for PantryLogEntry {
    fn from(row: PantryLogRow) -> Self {
        Self {
            id: row.id,
            owner_id: row.owner_id,
            pantry_item_id: row.pantry_item_id,
            name: row.name,
            quantity: row.quantity,
            unit_id: row.unit_id,
            category_id: row.category_id,
            kind: row.kind.0,
            date: row.date.0,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ConsumeInput {
    #[validate(range(exclusive_min = 0.0))]
    pub quantity: f64,
}

/// Without a quantity the whole remaining stock is thrown away.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct DiscardInput {
    #[validate(range(exclusive_min = 0.0))]
    pub quantity: Option<f64>,
}

impl super::Command {
    pub async fn consume(
        &self,
        id: impl Into<String>,
        input: ConsumeInput,
        metadata: &Metadata,
    ) -> larder_shared::Result<PantryItem> {
        input.validate()?;

        self.take_from_stock(id.into(), Some(input.quantity), PantryLogKind::Consumed, metadata)
            .await
    }

    pub async fn discard(
        &self,
        id: impl Into<String>,
        input: DiscardInput,
        metadata: &Metadata,
    ) -> larder_shared::Result<PantryItem> {
        input.validate()?;

        self.take_from_stock(id.into(), input.quantity, PantryLogKind::Wasted, metadata)
            .await
    }

    /// Stock is read and written under the same write lock, so concurrent
    /// takes from one item are serialized.
    async fn take_from_stock(
        &self,
        id: String,
        quantity: Option<f64>,
        kind: PantryLogKind,
        metadata: &Metadata,
    ) -> larder_shared::Result<PantryItem> {
        let mut tx = self.0.write_db.begin_with("BEGIN IMMEDIATE").await?;

        let Some(mut item) = find_item(&mut *tx, id).await? else {
            larder_shared::not_found!("pantry item not found");
        };

        metadata.ensure_owner(&item.owner_id)?;

        let quantity = quantity.unwrap_or(item.quantity);

        if quantity <= 0.0 {
            larder_shared::user!("Nothing left to discard");
        }

        if quantity > item.quantity {
            larder_shared::user!(
                "Only {} left of '{}', cannot take {quantity}",
                item.quantity,
                item.name
            );
        }

        item.quantity -= quantity;
        item.updated_at = larder_shared::timestamp();

        let entry = PantryLogEntry {
            id: larder_shared::new_id(),
            owner_id: item.owner_id.to_owned(),
            pantry_item_id: item.id.to_owned(),
            name: item.name.to_owned(),
            quantity,
            unit_id: item.unit_id.to_owned(),
            category_id: item.category_id.to_owned(),
            kind,
            date: larder_shared::today(),
            created_at: item.updated_at,
        };

        let update = SqlQuery::update()
            .table(PantryItemTable::Table)
            .values([
                (PantryItemTable::Quantity, item.quantity.into()),
                (PantryItemTable::UpdatedAt, item.updated_at.into()),
            ])
            .and_where(Expr::col(PantryItemTable::Id).eq(&item.id))
            .to_owned();

        let insert = SqlQuery::insert()
            .into_table(PantryLogTable::Table)
            .columns([
                PantryLogTable::Id,
                PantryLogTable::OwnerId,
                PantryLogTable::PantryItemId,
                PantryLogTable::Name,
                PantryLogTable::Quantity,
                PantryLogTable::UnitId,
                PantryLogTable::CategoryId,
                PantryLogTable::Kind,
                PantryLogTable::Date,
                PantryLogTable::CreatedAt,
            ])
            .values_panic([
                entry.id.to_owned().into(),
                entry.owner_id.to_owned().into(),
                entry.pantry_item_id.to_owned().into(),
                entry.name.to_owned().into(),
                entry.quantity.into(),
                entry.unit_id.to_owned().into(),
                entry.category_id.to_owned().into(),
                entry.kind.to_string().into(),
                entry.date.to_string().into(),
                entry.created_at.into(),
            ])
            .to_owned();

        let (sql, values) = update.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&mut *tx).await?;

        let (sql, values) = insert.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&mut *tx).await?;

        tx.commit().await?;

        tracing::info!(
            item_id = %item.id,
            kind = %kind,
            quantity,
            remaining = item.quantity,
            "pantry stock updated"
        );

        Ok(item)
    }
}

impl super::Query {
    /// Log entries of one kind dated within `[from, to]`, oldest first.
    pub async fn logs(
        &self,
        owner_id: &str,
        kind: PantryLogKind,
        from: NaiveDate,
        to: NaiveDate,
    ) -> larder_shared::Result<Vec<PantryLogEntry>> {
        let statement = SqlQuery::select()
            .columns([
                PantryLogTable::Id,
                PantryLogTable::OwnerId,
                PantryLogTable::PantryItemId,
                PantryLogTable::Name,
                PantryLogTable::Quantity,
                PantryLogTable::UnitId,
                PantryLogTable::CategoryId,
                PantryLogTable::Kind,
                PantryLogTable::Date,
                PantryLogTable::CreatedAt,
            ])
            .from(PantryLogTable::Table)
            .and_where(Expr::col(PantryLogTable::OwnerId).eq(owner_id))
            .and_where(Expr::col(PantryLogTable::Kind).eq(kind.to_string()))
            .and_where(Expr::col(PantryLogTable::Date).gte(from.to_string()))
            .and_where(Expr::col(PantryLogTable::Date).lte(to.to_string()))
            .order_by(PantryLogTable::Date, Order::Asc)
            .order_by(PantryLogTable::CreatedAt, Order::Asc)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, PantryLogRow, _>(&sql, values)
            .fetch_all(&self.0)
            .await?
            .into_iter()
            .map(PantryLogEntry::from)
            .collect())
    }
}
