use axum::{
    Router,
    routing::{get, patch, post},
};

use crate::config::Config;

mod auth;
mod catalog;
mod health;
mod meal_plans;
mod pantry;
mod recipes;
mod reports;
mod shopping_lists;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub db: larder_shared::State,
}

pub fn router(app_state: AppState) -> Router {
    let api = Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/me", get(auth::me))
        .route("/units", get(catalog::list_units).post(catalog::create_unit))
        .route(
            "/units/{id}",
            get(catalog::get_unit)
                .put(catalog::update_unit)
                .delete(catalog::delete_unit),
        )
        .route(
            "/categories",
            get(catalog::list_categories).post(catalog::create_category),
        )
        .route(
            "/categories/{id}",
            get(catalog::get_category)
                .put(catalog::update_category)
                .delete(catalog::delete_category),
        )
        .route("/pantry", get(pantry::list).post(pantry::create))
        .route("/pantry/expiring", get(pantry::expiring))
        .route("/pantry/expired", get(pantry::expired))
        .route(
            "/pantry/{id}",
            get(pantry::get).put(pantry::update).delete(pantry::delete),
        )
        .route("/pantry/{id}/consume", post(pantry::consume))
        .route("/pantry/{id}/discard", post(pantry::discard))
        .route("/reports/consumption", get(reports::consumption))
        .route("/reports/waste", get(reports::waste))
        .route("/reports/summary", get(reports::summary))
        .route("/recipes", get(recipes::list).post(recipes::create))
        .route(
            "/recipes/{id}",
            get(recipes::get).put(recipes::update).delete(recipes::delete),
        )
        .route("/mealplans", get(meal_plans::list).post(meal_plans::create))
        .route("/mealplans/suggestions", get(meal_plans::suggestions))
        .route(
            "/mealplans/{id}",
            get(meal_plans::get)
                .put(meal_plans::update)
                .delete(meal_plans::delete),
        )
        .route(
            "/mealplans/{id}/generate-shopping-list",
            post(meal_plans::generate_shopping_list),
        )
        .route(
            "/shoppinglists",
            get(shopping_lists::list).post(shopping_lists::create),
        )
        .route(
            "/shoppinglists/{id}",
            get(shopping_lists::get)
                .put(shopping_lists::update)
                .delete(shopping_lists::delete),
        )
        .route(
            "/shoppinglists/{id}/items/{item_id}",
            patch(shopping_lists::set_item_status),
        );

    Router::new()
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .nest("/api", api)
        .fallback(health::not_found)
        .with_state(app_state)
}
