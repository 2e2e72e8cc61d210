use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use larder_shopping::{ItemStatusInput, ShoppingList, ShoppingListInput};

use super::AppState;
use crate::{
    auth::AuthUser,
    error::{AppError, JsonBody},
};

fn query(app: &AppState) -> larder_shopping::Query {
    larder_shopping::Query(app.db.read_db.clone())
}

fn command(app: &AppState) -> larder_shopping::Command {
    larder_shopping::Command(app.db.clone())
}

pub async fn list(
    user: AuthUser,
    State(app): State<AppState>,
) -> Result<Json<Vec<ShoppingList>>, AppError> {
    Ok(Json(query(&app).list(user.id()).await?))
}

pub async fn get(
    user: AuthUser,
    State(app): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ShoppingList>, AppError> {
    Ok(Json(query(&app).get(id, &user.metadata()).await?))
}

#[tracing::instrument(skip_all, fields(user_id = %user.id()))]
pub async fn create(
    user: AuthUser,
    State(app): State<AppState>,
    JsonBody(input): JsonBody<ShoppingListInput>,
) -> Result<impl IntoResponse, AppError> {
    let list = command(&app).create(input, &user.metadata()).await?;

    Ok((StatusCode::CREATED, Json(list)))
}

#[tracing::instrument(skip_all, fields(user_id = %user.id(), shopping_list_id = %id))]
pub async fn update(
    user: AuthUser,
    State(app): State<AppState>,
    Path(id): Path<String>,
    JsonBody(input): JsonBody<ShoppingListInput>,
) -> Result<Json<ShoppingList>, AppError> {
    let list = command(&app).update(id, input, &user.metadata()).await?;

    Ok(Json(list))
}

#[tracing::instrument(skip_all, fields(user_id = %user.id(), shopping_list_id = %id))]
pub async fn delete(
    user: AuthUser,
    State(app): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    command(&app).delete(id, &user.metadata()).await?;

    Ok(StatusCode::NO_CONTENT)
}

#[tracing::instrument(skip_all, fields(user_id = %user.id(), shopping_list_id = %id))]
pub async fn set_item_status(
    user: AuthUser,
    State(app): State<AppState>,
    Path((id, item_id)): Path<(String, String)>,
    JsonBody(input): JsonBody<ItemStatusInput>,
) -> Result<Json<ShoppingList>, AppError> {
    let list = command(&app)
        .set_item_status(id, &item_id, input.status, &user.metadata())
        .await?;

    Ok(Json(list))
}
