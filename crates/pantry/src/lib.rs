mod item;
mod log;
mod report;

pub use item::*;
pub use log::*;
pub use report::*;

use larder_shared::State;

#[derive(Clone)]
pub struct Command(pub State);

impl Command {
    fn query(&self) -> Query {
        Query(self.0.read_db.clone())
    }

    async fn ensure_catalog_refs(
        &self,
        unit_id: &str,
        category_id: &str,
    ) -> larder_shared::Result<()> {
        let catalog = larder_catalog::Query(self.0.read_db.clone());

        if !catalog.unit_exists(unit_id).await? {
            larder_shared::not_found!("unit not found");
        }

        if !catalog.category_exists(category_id).await? {
            larder_shared::not_found!("category not found");
        }

        Ok(())
    }
}

#[derive(Clone)]
pub struct Query(pub sqlx::SqlitePool);
