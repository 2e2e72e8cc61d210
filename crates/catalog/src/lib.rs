//! Reference vocabularies shared by every user: units of measure and food
//! categories. Pantry items, recipe ingredients and shopping items point at
//! them by id.

mod category;
mod labels;
mod seed;
mod unit;

pub use category::*;
pub use labels::*;
pub use unit::*;

use larder_shared::State;

#[derive(Clone)]
pub struct Command(pub State);

#[derive(Clone)]
pub struct Query(pub sqlx::SqlitePool);
