use sea_query::{ColumnDef, Index, Table};

use crate::table::User;

pub struct CreateTable;

#[async_trait::async_trait]
impl sqlx_migrator::Operation<sqlx::Sqlite> for CreateTable {
    async fn up(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = Table::create()
            .table(User::Table)
            .col(
                ColumnDef::new(User::Id)
                    .string()
                    .not_null()
                    .string_len(26)
                    .primary_key(),
            )
            .col(ColumnDef::new(User::Email).string().not_null())
            .col(
                ColumnDef::new(User::Name)
                    .string()
                    .not_null()
                    .string_len(50),
            )
            .col(ColumnDef::new(User::Password).string().not_null())
            .col(ColumnDef::new(User::CreatedAt).big_integer().not_null())
            .to_owned()
            .to_string(sea_query::SqliteQueryBuilder);

        crate::execute(connection, statement).await
    }

    async fn down(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = Table::drop()
            .table(User::Table)
            .to_owned()
            .to_string(sea_query::SqliteQueryBuilder);

        crate::execute(connection, statement).await
    }
}

pub struct CreateEmailIdx;

#[async_trait::async_trait]
impl sqlx_migrator::Operation<sqlx::Sqlite> for CreateEmailIdx {
    async fn up(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = Index::create()
            .name("idx_user_email")
            .table(User::Table)
            .unique()
            .col(User::Email)
            .to_owned()
            .to_string(sea_query::SqliteQueryBuilder);

        crate::execute(connection, statement).await
    }

    async fn down(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = Index::drop()
            .name("idx_user_email")
            .table(User::Table)
            .to_owned()
            .to_string(sea_query::SqliteQueryBuilder);

        crate::execute(connection, statement).await
    }
}
