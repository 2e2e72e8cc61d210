//! Meal plans and what can be cooked from the pantry.

mod command;
mod query;
mod suggestion;
mod types;

pub use command::*;
pub use query::*;
pub use suggestion::*;
pub use types::*;
