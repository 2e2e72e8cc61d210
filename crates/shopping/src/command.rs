use std::collections::HashSet;

use chrono::NaiveDate;
use larder_db::{table::ShoppingList as ShoppingListTable, types::Bitcode};
use larder_shared::{Metadata, State};
use sea_query::{Expr, ExprTrait, Query as SqlQuery, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::{ItemStatus, Query, ShoppingList, ShoppingListItem, query::find_list};

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingListItemInput {
    /// Kept when updating an existing item, generated otherwise.
    pub id: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 1))]
    pub category_id: String,
    #[validate(range(min = 0.0))]
    pub quantity: f64,
    #[validate(length(min = 1))]
    pub unit_id: String,
    #[serde(default)]
    pub status: ItemStatus,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_period"))]
pub struct ShoppingListInput {
    #[validate(length(min = 1, max = 150))]
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub group_id: Option<String>,
    #[serde(default)]
    #[validate(nested)]
    pub items: Vec<ShoppingListItemInput>,
}

fn validate_period(input: &ShoppingListInput) -> Result<(), ValidationError> {
    if input.end_date < input.start_date {
        return Err(ValidationError::new("end_date")
            .with_message("end date must not be before start date".into()));
    }

    Ok(())
}

#[derive(Debug, Clone, Deserialize)]
pub struct ItemStatusInput {
    pub status: ItemStatus,
}

#[derive(Clone)]
pub struct Command(pub State);

impl Command {
    pub async fn create(
        &self,
        input: ShoppingListInput,
        metadata: &Metadata,
    ) -> larder_shared::Result<ShoppingList> {
        input.validate()?;

        let owner_id = metadata.trigger_by()?;
        self.ensure_catalog_refs(&input.items).await?;
        let items = into_items(input.items)?;

        let now = larder_shared::timestamp();
        let list = ShoppingList {
            id: larder_shared::new_id(),
            owner_id,
            group_id: input.group_id,
            meal_plan_id: None,
            name: input.name.trim().to_owned(),
            start_date: input.start_date,
            end_date: input.end_date,
            items,
            created_at: now,
            updated_at: now,
        };

        self.insert(&list).await?;

        Ok(list)
    }

    pub async fn update(
        &self,
        id: impl Into<String>,
        input: ShoppingListInput,
        metadata: &Metadata,
    ) -> larder_shared::Result<ShoppingList> {
        input.validate()?;

        self.ensure_catalog_refs(&input.items).await?;
        let items = into_items(input.items)?;

        let mut tx = self.0.write_db.begin_with("BEGIN IMMEDIATE").await?;

        let Some(mut list) = find_list(&mut *tx, id.into()).await? else {
            larder_shared::not_found!("shopping list not found");
        };

        metadata.ensure_owner(&list.owner_id)?;

        list.name = input.name.trim().to_owned();
        list.start_date = input.start_date;
        list.end_date = input.end_date;
        list.group_id = input.group_id;
        list.items = items;
        list.updated_at = larder_shared::timestamp();

        let statement = SqlQuery::update()
            .table(ShoppingListTable::Table)
            .values([
                (ShoppingListTable::Name, list.name.to_owned().into()),
                (ShoppingListTable::StartDate, list.start_date.to_string().into()),
                (ShoppingListTable::EndDate, list.end_date.to_string().into()),
                (ShoppingListTable::GroupId, list.group_id.to_owned().into()),
                (ShoppingListTable::Items, Bitcode::encode(&list.items).into()),
                (ShoppingListTable::UpdatedAt, list.updated_at.into()),
            ])
            .and_where(Expr::col(ShoppingListTable::Id).eq(&list.id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&mut *tx).await?;

        tx.commit().await?;

        Ok(list)
    }

    pub async fn delete(
        &self,
        id: impl Into<String>,
        metadata: &Metadata,
    ) -> larder_shared::Result<()> {
        let list = Query(self.0.read_db.clone()).get(id, metadata).await?;

        let statement = SqlQuery::delete()
            .from_table(ShoppingListTable::Table)
            .and_where(Expr::col(ShoppingListTable::Id).eq(&list.id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values)
            .execute(&self.0.write_db)
            .await?;

        tracing::info!(shopping_list_id = %list.id, "shopping list deleted");

        Ok(())
    }

    /// Marks one item as bought or back to pending.
    ///
    /// The items blob is rewritten as a whole, so the read happens inside
    /// the write transaction.
    pub async fn set_item_status(
        &self,
        id: impl Into<String>,
        item_id: &str,
        status: ItemStatus,
        metadata: &Metadata,
    ) -> larder_shared::Result<ShoppingList> {
        let mut tx = self.0.write_db.begin_with("BEGIN IMMEDIATE").await?;

        let Some(mut list) = find_list(&mut *tx, id.into()).await? else {
            larder_shared::not_found!("shopping list not found");
        };

        metadata.ensure_owner(&list.owner_id)?;

        let Some(item) = list.items.iter_mut().find(|item| item.id == item_id) else {
            larder_shared::not_found!("shopping list item not found");
        };

        item.status = status;
        list.updated_at = larder_shared::timestamp();

        let statement = SqlQuery::update()
            .table(ShoppingListTable::Table)
            .values([
                (ShoppingListTable::Items, Bitcode::encode(&list.items).into()),
                (ShoppingListTable::UpdatedAt, list.updated_at.into()),
            ])
            .and_where(Expr::col(ShoppingListTable::Id).eq(&list.id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&mut *tx).await?;

        tx.commit().await?;

        Ok(list)
    }

    pub(crate) async fn insert(&self, list: &ShoppingList) -> larder_shared::Result<()> {
        let statement = SqlQuery::insert()
            .into_table(ShoppingListTable::Table)
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
            .values_panic([
                list.id.to_owned().into(),
                list.owner_id.to_owned().into(),
                list.group_id.to_owned().into(),
                list.meal_plan_id.to_owned().into(),
                list.name.to_owned().into(),
                list.start_date.to_string().into(),
                list.end_date.to_string().into(),
                Bitcode::encode(&list.items).into(),
                list.created_at.into(),
                list.updated_at.into(),
            ])
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values)
            .execute(&self.0.write_db)
            .await?;

        tracing::info!(
            shopping_list_id = %list.id,
            owner_id = %list.owner_id,
            items = list.items.len(),
            "shopping list created"
        );

        Ok(())
    }

    async fn ensure_catalog_refs(
        &self,
        items: &[ShoppingListItemInput],
    ) -> larder_shared::Result<()> {
        let catalog = larder_catalog::Query(self.0.read_db.clone());

        let units = items
            .iter()
            .map(|i| i.unit_id.as_str())
            .collect::<HashSet<_>>();
        for unit_id in units {
            if !catalog.unit_exists(unit_id).await? {
                larder_shared::not_found!("unit not found");
            }
        }

        let categories = items
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

/// Item ids sent by the client are kept, so they must not repeat within
/// one list.
fn into_items(
    inputs: Vec<ShoppingListItemInput>,
) -> larder_shared::Result<Vec<ShoppingListItem>> {
    let mut seen = HashSet::new();
    let mut items = Vec::with_capacity(inputs.len());

    for input in inputs {
        let id = input.id.unwrap_or_else(larder_shared::new_id);

        if !seen.insert(id.to_owned()) {
            larder_shared::user!("Duplicate shopping list item id '{id}'");
        }

        items.push(ShoppingListItem {
            id,
            name: input.name.trim().to_owned(),
            category_id: input.category_id,
            quantity: input.quantity,
            unit_id: input.unit_id,
            status: input.status,
        });
    }

    Ok(items)
}
