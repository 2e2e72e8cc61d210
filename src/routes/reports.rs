use axum::{Json, extract::State};
use chrono::NaiveDate;
use larder_pantry::{PantryLogKind, Report, ReportRange, Summary};
use serde::Deserialize;

use super::AppState;
use crate::{
    auth::AuthUser,
    error::{AppError, QueryParams},
};

/// `?from=YYYY-MM-DD&to=YYYY-MM-DD`, both optional.
#[derive(Deserialize)]
pub struct RangeParams {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl RangeParams {
    fn range(&self) -> larder_shared::Result<ReportRange> {
        ReportRange::new(self.from, self.to, larder_shared::today())
    }
}

async fn report(
    user: AuthUser,
    app: AppState,
    kind: PantryLogKind,
    params: RangeParams,
) -> Result<Json<Report>, AppError> {
    let report = larder_pantry::Query(app.db.read_db.clone())
        .report(user.id(), kind, params.range()?)
        .await?;

    Ok(Json(report))
}

pub async fn consumption(
    user: AuthUser,
    State(app): State<AppState>,
    QueryParams(params): QueryParams<RangeParams>,
) -> Result<Json<Report>, AppError> {
    report(user, app, PantryLogKind::Consumed, params).await
}

pub async fn waste(
    user: AuthUser,
    State(app): State<AppState>,
    QueryParams(params): QueryParams<RangeParams>,
) -> Result<Json<Report>, AppError> {
    report(user, app, PantryLogKind::Wasted, params).await
}

pub async fn summary(
    user: AuthUser,
    State(app): State<AppState>,
    QueryParams(params): QueryParams<RangeParams>,
) -> Result<Json<Summary>, AppError> {
    let summary = larder_pantry::Query(app.db.read_db.clone())
        .summary(user.id(), params.range()?, larder_shared::today())
        .await?;

    Ok(Json(summary))
}
