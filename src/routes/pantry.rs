use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use larder_pantry::{
    ConsumeInput, DEFAULT_EXPIRING_DAYS, DiscardInput, PantryItem, PantryItemInput,
};
use serde::Deserialize;

use super::AppState;
use crate::{
    auth::AuthUser,
    error::{AppError, JsonBody, QueryParams},
};

#[derive(Deserialize)]
pub struct ExpiringParams {
    pub days: Option<u64>,
}

fn query(app: &AppState) -> larder_pantry::Query {
    larder_pantry::Query(app.db.read_db.clone())
}

fn command(app: &AppState) -> larder_pantry::Command {
    larder_pantry::Command(app.db.clone())
}

pub async fn list(
    user: AuthUser,
    State(app): State<AppState>,
) -> Result<Json<Vec<PantryItem>>, AppError> {
    Ok(Json(query(&app).list(user.id()).await?))
}

pub async fn get(
    user: AuthUser,
    State(app): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PantryItem>, AppError> {
    Ok(Json(query(&app).get(id, &user.metadata()).await?))
}

pub async fn expiring(
    user: AuthUser,
    State(app): State<AppState>,
    QueryParams(params): QueryParams<ExpiringParams>,
) -> Result<Json<Vec<PantryItem>>, AppError> {
    let days = params.days.unwrap_or(DEFAULT_EXPIRING_DAYS);
    let items = query(&app)
        .expiring(user.id(), larder_shared::today(), days)
        .await?;

    Ok(Json(items))
}

pub async fn expired(
    user: AuthUser,
    State(app): State<AppState>,
) -> Result<Json<Vec<PantryItem>>, AppError> {
    let items = query(&app)
        .expired(user.id(), larder_shared::today())
        .await?;

    Ok(Json(items))
}

#[tracing::instrument(skip_all, fields(user_id = %user.id()))]
pub async fn create(
    user: AuthUser,
    State(app): State<AppState>,
    JsonBody(input): JsonBody<PantryItemInput>,
) -> Result<impl IntoResponse, AppError> {
    let item = command(&app).create(input, &user.metadata()).await?;

    Ok((StatusCode::CREATED, Json(item)))
}

#[tracing::instrument(skip_all, fields(user_id = %user.id(), pantry_item_id = %id))]
pub async fn update(
    user: AuthUser,
    State(app): State<AppState>,
    Path(id): Path<String>,
    JsonBody(input): JsonBody<PantryItemInput>,
) -> Result<Json<PantryItem>, AppError> {
    let item = command(&app).update(id, input, &user.metadata()).await?;

    Ok(Json(item))
}

#[tracing::instrument(skip_all, fields(user_id = %user.id(), pantry_item_id = %id))]
pub async fn delete(
    user: AuthUser,
    State(app): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    command(&app).delete(id, &user.metadata()).await?;

    Ok(StatusCode::NO_CONTENT)
}

#[tracing::instrument(skip_all, fields(user_id = %user.id(), pantry_item_id = %id))]
pub async fn consume(
    user: AuthUser,
    State(app): State<AppState>,
    Path(id): Path<String>,
    JsonBody(input): JsonBody<ConsumeInput>,
) -> Result<Json<PantryItem>, AppError> {
    let item = command(&app).consume(id, input, &user.metadata()).await?;

    Ok(Json(item))
}

/// An empty body discards the whole remaining stock.
#[tracing::instrument(skip_all, fields(user_id = %user.id(), pantry_item_id = %id))]
pub async fn discard(
    user: AuthUser,
    State(app): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<PantryItem>, AppError> {
    let input = if body.iter().all(u8::is_ascii_whitespace) {
        DiscardInput::default()
    } else {
        serde_json::from_slice::<DiscardInput>(&body)
            .map_err(|e| AppError::Rejection(format!("Failed to parse the request body: {e}")))?
    };
    let item = command(&app).discard(id, input, &user.metadata()).await?;

    Ok(Json(item))
}
