use anyhow::Result;
use sqlx::migrate::MigrateDatabase;

use crate::config::Config;

#[tracing::instrument(skip(config))]
pub async fn migrate(config: Config) -> Result<()> {
    tracing::info!("Running database migrations...");

    if !sqlx::Sqlite::database_exists(&config.database.url).await? {
        tracing::info!("Database does not exist, creating: {}", config.database.url);
        sqlx::Sqlite::create_database(&config.database.url).await?;
    }

    let pool = crate::db::create_pool(&config.database.url, 1).await?;
    larder_db::migrate(&pool).await?;
    pool.close().await;

    tracing::info!("Migrations completed successfully");

    Ok(())
}

/// Drops the database file and migrates a fresh one.
#[tracing::instrument(skip(config))]
pub async fn reset(config: Config) -> Result<()> {
    tracing::info!("Resetting database...");

    if sqlx::Sqlite::database_exists(&config.database.url).await? {
        tracing::warn!("Dropping existing database: {}", config.database.url);
        sqlx::Sqlite::drop_database(&config.database.url).await?;
    } else {
        tracing::info!("Database does not exist, nothing to drop");
    }

    migrate(config).await?;

    tracing::info!("Database reset completed successfully");

    Ok(())
}

/// Inserts the default units and food categories. Safe to run twice.
#[tracing::instrument(skip(config))]
pub async fn seed(config: Config) -> Result<()> {
    migrate(config.clone()).await?;

    let pool = crate::db::create_pool(&config.database.url, 1).await?;
    let (units, categories) = larder_catalog::Command(larder_shared::State::new(pool.clone()))
        .seed_defaults()
        .await?;
    pool.close().await;

    tracing::info!(units, categories, "Seed completed successfully");

    Ok(())
}
