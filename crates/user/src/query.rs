use larder_db::table::User;
use sea_query::{Expr, ExprTrait, Query as SqlQuery, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Serialize;
use sqlx::{SqlitePool, prelude::FromRow};

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub id: String,
    pub email: String,
    pub name: String,
    pub created_at: u64,
}

#[derive(FromRow)]
pub(crate) struct UserRow {
    pub id: String,
    pub email: String,
    pub name: String,
    pub password: String,
    pub created_at: u64,
}

impl From<UserRow> for UserView {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            email: row.email,
            name: row.name,
            created_at: row.created_at,
        }
    }
}

pub(crate) enum FindType {
    Id(String),
    Email(String),
}

pub(crate) async fn find(
    pool: &SqlitePool,
    arg_type: FindType,
) -> larder_shared::Result<Option<UserRow>> {
    let mut statement = SqlQuery::select()
        .columns([
            User::Id,
            User::Email,
            User::Name,
            User::Password,
            User::CreatedAt,
        ])
        .from(User::Table)
        .limit(1)
        .to_owned();

    match arg_type {
        FindType::Id(id) => statement.and_where(Expr::col(User::Id).eq(id)),
        FindType::Email(email) => statement.and_where(Expr::col(User::Email).eq(email)),
    };

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_as_with::<_, UserRow, _>(&sql, values)
        .fetch_optional(pool)
        .await?)
}

#[derive(Clone)]
pub struct Query(pub SqlitePool);

impl Query {
    pub async fn find_by_id(&self, id: impl Into<String>) -> larder_shared::Result<Option<UserView>> {
        Ok(find(&self.0, FindType::Id(id.into()))
            .await?
            .map(UserView::from))
    }

    pub async fn find_by_email(
        &self,
        email: impl Into<String>,
    ) -> larder_shared::Result<Option<UserView>> {
        let email = email.into().trim().to_lowercase();

        Ok(find(&self.0, FindType::Email(email))
            .await?
            .map(UserView::from))
    }
}
