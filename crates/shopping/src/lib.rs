mod aggregation;
mod command;
mod generate;
mod query;

pub use aggregation::*;
pub use command::*;
pub use generate::*;
pub use query::*;

use bitcode::{Decode, Encode};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Encode, Decode, Default, Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemStatus {
    #[default]
    Pending,
    Bought,
}

#[derive(Encode, Decode, Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingListItem {
    pub id: String,
    pub name: String,
    pub category_id: String,
    pub quantity: f64,
    pub unit_id: String,
    pub status: ItemStatus,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingList {
    pub id: String,
    pub owner_id: String,
    pub group_id: Option<String>,
    pub meal_plan_id: Option<String>,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub items: Vec<ShoppingListItem>,
    pub created_at: u64,
    pub updated_at: u64,
}
