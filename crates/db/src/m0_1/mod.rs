mod catalog;
mod pantry_item;
mod recipe;
mod user;

use sqlx_migrator::vec_box;

pub struct Migration;

sqlx_migrator::sqlite_migration!(
    Migration,
    "larder",
    "m0_1",
    vec_box![],
    vec_box![
        user::CreateTable,
        user::CreateEmailIdx,
        catalog::CreateUnitTable,
        catalog::CreateUnitNameIdx,
        catalog::CreateCategoryTable,
        catalog::CreateCategoryNameIdx,
        pantry_item::CreateTable,
        pantry_item::CreateOwnerIdx,
        recipe::CreateTable,
        recipe::CreateOwnerIdx
    ]
);
