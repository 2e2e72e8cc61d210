use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use larder_mealplan::{MealPlan, MealPlanDetail, MealPlanInput, Suggestion};
use larder_shopping::ShoppingList;
use serde::Serialize;

use super::AppState;
use crate::{
    auth::AuthUser,
    error::{AppError, JsonBody},
};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    pub message: &'static str,
    pub shopping_list: ShoppingList,
}

fn query(app: &AppState) -> larder_mealplan::Query {
    larder_mealplan::Query(app.db.read_db.clone())
}

fn command(app: &AppState) -> larder_mealplan::Command {
    larder_mealplan::Command(app.db.clone())
}

pub async fn list(
    user: AuthUser,
    State(app): State<AppState>,
) -> Result<Json<Vec<MealPlan>>, AppError> {
    Ok(Json(query(&app).list(user.id()).await?))
}

/// The plan with its recipes loaded.
pub async fn get(
    user: AuthUser,
    State(app): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MealPlanDetail>, AppError> {
    Ok(Json(query(&app).get_detail(id, &user.metadata()).await?))
}

#[tracing::instrument(skip_all, fields(user_id = %user.id()))]
pub async fn create(
    user: AuthUser,
    State(app): State<AppState>,
    JsonBody(input): JsonBody<MealPlanInput>,
) -> Result<impl IntoResponse, AppError> {
    let meal_plan = command(&app).create(input, &user.metadata()).await?;

    Ok((StatusCode::CREATED, Json(meal_plan)))
}

#[tracing::instrument(skip_all, fields(user_id = %user.id(), meal_plan_id = %id))]
pub async fn update(
    user: AuthUser,
    State(app): State<AppState>,
    Path(id): Path<String>,
    JsonBody(input): JsonBody<MealPlanInput>,
) -> Result<Json<MealPlan>, AppError> {
    let meal_plan = command(&app).update(id, input, &user.metadata()).await?;

    Ok(Json(meal_plan))
}

#[tracing::instrument(skip_all, fields(user_id = %user.id(), meal_plan_id = %id))]
pub async fn delete(
    user: AuthUser,
    State(app): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    command(&app).delete(id, &user.metadata()).await?;

    Ok(StatusCode::NO_CONTENT)
}

#[tracing::instrument(skip_all, fields(user_id = %user.id(), meal_plan_id = %id))]
pub async fn generate_shopping_list(
    user: AuthUser,
    State(app): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let shopping_list = larder_shopping::Command(app.db.clone())
        .generate_from_meal_plan(id, &user.metadata())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(GenerateResponse {
            message: "Shopping list generated successfully",
            shopping_list,
        }),
    ))
}

/// Recipes that can be cooked, fully or partly, from the caller's pantry.
#[tracing::instrument(skip_all, fields(user_id = %user.id()))]
pub async fn suggestions(
    user: AuthUser,
    State(app): State<AppState>,
) -> Result<Json<Vec<Suggestion>>, AppError> {
    Ok(Json(query(&app).suggestions(user.id()).await?))
}
