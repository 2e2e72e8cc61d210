use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use larder_catalog::{CategoryInput, FoodCategory, Unit, UnitInput};

use super::AppState;
use crate::{
    auth::AuthUser,
    error::{AppError, JsonBody},
};

pub async fn list_units(
    _user: AuthUser,
    State(app): State<AppState>,
) -> Result<Json<Vec<Unit>>, AppError> {
    let units = larder_catalog::Query(app.db.read_db.clone())
        .list_units()
        .await?;

    Ok(Json(units))
}

pub async fn get_unit(
    _user: AuthUser,
    State(app): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Unit>, AppError> {
    let Some(unit) = larder_catalog::Query(app.db.read_db.clone())
        .find_unit(id)
        .await?
    else {
        return Err(larder_shared::Error::NotFound("unit not found".to_owned()).into());
    };

    Ok(Json(unit))
}

#[tracing::instrument(skip_all, fields(user_id = %user.id()))]
pub async fn create_unit(
    user: AuthUser,
    State(app): State<AppState>,
    JsonBody(input): JsonBody<UnitInput>,
) -> Result<impl IntoResponse, AppError> {
    let unit = larder_catalog::Command(app.db.clone())
        .create_unit(input)
        .await?;

    Ok((StatusCode::CREATED, Json(unit)))
}

#[tracing::instrument(skip_all, fields(user_id = %user.id()))]
pub async fn update_unit(
    user: AuthUser,
    State(app): State<AppState>,
    Path(id): Path<String>,
    JsonBody(input): JsonBody<UnitInput>,
) -> Result<Json<Unit>, AppError> {
    let unit = larder_catalog::Command(app.db.clone())
        .update_unit(id, input)
        .await?;

    Ok(Json(unit))
}

#[tracing::instrument(skip_all, fields(user_id = %user.id()))]
pub async fn delete_unit(
    user: AuthUser,
    State(app): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    larder_catalog::Command(app.db.clone())
        .delete_unit(id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_categories(
    _user: AuthUser,
    State(app): State<AppState>,
) -> Result<Json<Vec<FoodCategory>>, AppError> {
    let categories = larder_catalog::Query(app.db.read_db.clone())
        .list_categories()
        .await?;

    Ok(Json(categories))
}

pub async fn get_category(
    _user: AuthUser,
    State(app): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<FoodCategory>, AppError> {
    let Some(category) = larder_catalog::Query(app.db.read_db.clone())
        .find_category(id)
        .await?
    else {
        return Err(larder_shared::Error::NotFound("category not found".to_owned()).into());
    };

    Ok(Json(category))
}

#[tracing::instrument(skip_all, fields(user_id = %user.id()))]
pub async fn create_category(
    user: AuthUser,
    State(app): State<AppState>,
    JsonBody(input): JsonBody<CategoryInput>,
) -> Result<impl IntoResponse, AppError> {
    let category = larder_catalog::Command(app.db.clone())
        .create_category(input)
        .await?;

    Ok((StatusCode::CREATED, Json(category)))
}

#[tracing::instrument(skip_all, fields(user_id = %user.id()))]
pub async fn update_category(
    user: AuthUser,
    State(app): State<AppState>,
    Path(id): Path<String>,
    JsonBody(input): JsonBody<CategoryInput>,
) -> Result<Json<FoodCategory>, AppError> {
    let category = larder_catalog::Command(app.db.clone())
        .update_category(id, input)
        .await?;

    Ok(Json(category))
}

#[tracing::instrument(skip_all, fields(user_id = %user.id()))]
pub async fn delete_category(
    user: AuthUser,
    State(app): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    larder_catalog::Command(app.db.clone())
        .delete_category(id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
