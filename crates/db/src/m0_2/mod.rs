mod meal_plan;
mod pantry_log;
mod shopping_list;

use sqlx_migrator::vec_box;

pub struct Migration;

sqlx_migrator::sqlite_migration!(
    Migration,
    "larder",
    "m0_2",
    vec_box![crate::m0_1::Migration],
    vec_box![
        meal_plan::CreateTable,
        meal_plan::CreateOwnerIdx,
        shopping_list::CreateTable,
        shopping_list::CreateOwnerIdx,
        pantry_log::CreateTable,
        pantry_log::CreateOwnerDateIdx
    ]
);
