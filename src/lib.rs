pub mod auth;
pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod observability;
pub mod routes;

pub use routes::AppState;

/// Builds the router without binding a socket, for tests and embedding.
pub fn create_app(config: config::Config, db: larder_shared::State) -> axum::Router {
    routes::router(AppState { config, db })
}
