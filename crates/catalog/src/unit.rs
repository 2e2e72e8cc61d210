use larder_db::table::Unit as UnitTable;
use sea_query::{Expr, ExprTrait, Order, Query as SqlQuery, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Unit {
    pub id: String,
    pub name: String,
    pub abbreviation: Option<String>,
    pub created_at: u64,
}

impl Unit {
    /// Short form used in reports and suggestions.
    pub fn label(&self) -> String {
        self.abbreviation
            .to_owned()
            .filter(|a| !a.is_empty())
            .unwrap_or_else(|| self.name.to_owned())
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UnitInput {
    #[validate(length(min = 1, max = 30))]
    pub name: String,
    #[validate(length(max = 10))]
    pub abbreviation: Option<String>,
}

impl super::Command {
    pub async fn create_unit(&self, input: UnitInput) -> larder_shared::Result<Unit> {
        input.validate()?;

        let name = input.name.trim().to_owned();
        if self.find_unit_by_name(&name).await?.is_some() {
            larder_shared::user!("Unit '{name}' already exists");
        }

        let unit = Unit {
            id: larder_shared::new_id(),
            name,
            abbreviation: input.abbreviation,
            created_at: larder_shared::timestamp(),
        };

        let statement = SqlQuery::insert()
            .into_table(UnitTable::Table)
            .columns([
                UnitTable::Id,
                UnitTable::Name,
                UnitTable::Abbreviation,
                UnitTable::CreatedAt,
            ])
            .values_panic([
                unit.id.to_owned().into(),
                unit.name.to_owned().into(),
                unit.abbreviation.to_owned().into(),
                unit.created_at.into(),
            ])
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values)
            .execute(&self.0.write_db)
            .await?;

        tracing::info!(unit_id = %unit.id, name = %unit.name, "unit created");

        Ok(unit)
    }

    pub async fn update_unit(
        &self,
        id: impl Into<String>,
        input: UnitInput,
    ) -> larder_shared::Result<Unit> {
        input.validate()?;

        let id = id.into();
        let Some(mut unit) = super::Query(self.0.read_db.clone()).find_unit(&id).await? else {
            larder_shared::not_found!("unit not found");
        };

        let name = input.name.trim().to_owned();
        let existing = self.find_unit_by_name(&name).await?;
        if existing.is_some_and(|other| other.id != unit.id) {
            larder_shared::user!("Unit '{name}' already exists");
        }

        unit.name = name;
        unit.abbreviation = input.abbreviation;

        let statement = SqlQuery::update()
            .table(UnitTable::Table)
            .values([
                (UnitTable::Name, unit.name.to_owned().into()),
                (UnitTable::Abbreviation, unit.abbreviation.to_owned().into()),
            ])
            .and_where(Expr::col(UnitTable::Id).eq(&unit.id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values)
            .execute(&self.0.write_db)
            .await?;

        Ok(unit)
    }

    pub async fn delete_unit(&self, id: impl Into<String>) -> larder_shared::Result<()> {
        let statement = SqlQuery::delete()
            .from_table(UnitTable::Table)
            .and_where(Expr::col(UnitTable::Id).eq(id.into()))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let result = sqlx::query_with(&sql, values)
            .execute(&self.0.write_db)
            .await?;

        if result.rows_affected() == 0 {
            larder_shared::not_found!("unit not found");
        }

        Ok(())
    }

    async fn find_unit_by_name(&self, name: &str) -> larder_shared::Result<Option<Unit>> {
        let statement = select_units()
            .and_where(Expr::col(UnitTable::Name).eq(name))
            .limit(1)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, Unit, _>(&sql, values)
            .fetch_optional(&self.0.read_db)
            .await?)
    }
}

impl super::Query {
    pub async fn list_units(&self) -> larder_shared::Result<Vec<Unit>> {
        let statement = select_units()
            .order_by(UnitTable::Name, Order::Asc)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, Unit, _>(&sql, values)
            .fetch_all(&self.0)
            .await?)
    }

    pub async fn find_unit(&self, id: impl Into<String>) -> larder_shared::Result<Option<Unit>> {
        let statement = select_units()
            .and_where(Expr::col(UnitTable::Id).eq(id.into()))
            .limit(1)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, Unit, _>(&sql, values)
            .fetch_optional(&self.0)
            .await?)
    }
}

fn select_units() -> sea_query::SelectStatement {
    SqlQuery::select()
        .columns([
            UnitTable::Id,
            UnitTable::Name,
            UnitTable::Abbreviation,
            UnitTable::CreatedAt,
        ])
        .from(UnitTable::Table)
        .to_owned()
}
