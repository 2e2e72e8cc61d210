mod command;
mod query;

pub use command::*;
pub use query::*;

use bitcode::{Decode, Encode};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// One line of a recipe. Ingredients only live inside their recipe.
#[derive(Encode, Decode, Serialize, Deserialize, Validate, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(range(min = 0.0))]
    pub quantity: f64,
    #[validate(length(min = 1))]
    pub unit_id: String,
    #[validate(length(min = 1))]
    pub category_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: String,
    pub owner_id: String,
    pub title: String,
    pub instructions: String,
    pub servings: u32,
    pub ingredients: Vec<Ingredient>,
    pub created_at: u64,
    pub updated_at: u64,
}
