use sqlx_migrator::{Info, Migrator, vec_box};

mod m0_1;
mod m0_2;
pub mod table;
pub mod types;

pub use sqlx_migrator::{Migrate, Plan};

pub fn migrator() -> Result<Migrator<sqlx::Sqlite>, sqlx_migrator::Error> {
    let mut migrator = Migrator::default();
    migrator.add_migrations(vec_box![m0_1::Migration, m0_2::Migration])?;

    Ok(migrator)
}

/// Applies every pending migration on the given pool.
pub async fn migrate(pool: &sqlx::SqlitePool) -> anyhow::Result<()> {
    let mut conn = pool.acquire().await?;
    migrator()?.run(&mut *conn, &Plan::apply_all()).await?;

    Ok(())
}

async fn execute(
    connection: &mut sqlx::SqliteConnection,
    statement: String,
) -> Result<(), sqlx_migrator::Error> {
    sqlx::query(&statement).execute(connection).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};
    use temp_dir::TempDir;

    #[tokio::test]
    async fn test_migrate_creates_tables() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let path = dir.child("db.sqlite3");
        let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.display()))?
            .create_if_missing(true);
        let pool = SqlitePool::connect_with(opts).await?;

        super::migrate(&pool).await?;
        // Running twice only applies what is pending.
        super::migrate(&pool).await?;

        let tables: Vec<(String,)> =
            sqlx::query_as("SELECT name FROM sqlite_master WHERE type = 'table'")
                .fetch_all(&pool)
                .await?;
        let tables = tables.into_iter().map(|(name,)| name).collect::<Vec<_>>();

        for table in [
            "food_category",
            "meal_plan",
            "pantry_item",
            "pantry_log",
            "recipe",
            "shopping_list",
            "unit",
            "user",
        ] {
            assert!(tables.contains(&table.to_owned()), "missing table {table}");
        }

        Ok(())
    }
}
