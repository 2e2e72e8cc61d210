use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use larder_recipe::{Recipe, RecipeInput};

use super::AppState;
use crate::{
    auth::AuthUser,
    error::{AppError, JsonBody},
};

/// Every recipe, whoever wrote it.
pub async fn list(
    _user: AuthUser,
    State(app): State<AppState>,
) -> Result<Json<Vec<Recipe>>, AppError> {
    let recipes = larder_recipe::Query(app.db.read_db.clone()).list().await?;

    Ok(Json(recipes))
}

pub async fn get(
    _user: AuthUser,
    State(app): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Recipe>, AppError> {
    let recipe = larder_recipe::Query(app.db.read_db.clone()).get(id).await?;

    Ok(Json(recipe))
}

#[tracing::instrument(skip_all, fields(user_id = %user.id()))]
pub async fn create(
    user: AuthUser,
    State(app): State<AppState>,
    JsonBody(input): JsonBody<RecipeInput>,
) -> Result<impl IntoResponse, AppError> {
    let recipe = larder_recipe::Command(app.db.clone())
        .create(input, &user.metadata())
        .await?;

    Ok((StatusCode::CREATED, Json(recipe)))
}

#[tracing::instrument(skip_all, fields(user_id = %user.id(), recipe_id = %id))]
pub async fn update(
    user: AuthUser,
    State(app): State<AppState>,
    Path(id): Path<String>,
    JsonBody(input): JsonBody<RecipeInput>,
) -> Result<Json<Recipe>, AppError> {
    let recipe = larder_recipe::Command(app.db.clone())
        .update(id, input, &user.metadata())
        .await?;

    Ok(Json(recipe))
}

#[tracing::instrument(skip_all, fields(user_id = %user.id(), recipe_id = %id))]
pub async fn delete(
    user: AuthUser,
    State(app): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    larder_recipe::Command(app.db.clone())
        .delete(id, &user.metadata())
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
