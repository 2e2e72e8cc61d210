use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use axum_extra::extract::{
    CookieJar,
    cookie::{Cookie, SameSite},
};
use larder_user::{LoginInput, RegisterInput, UserView};
use serde::Serialize;

use super::AppState;
use crate::{
    auth::{AUTH_COOKIE_NAME, AuthUser, generate_token},
    error::{AppError, JsonBody},
};

#[derive(Serialize)]
pub struct AuthResponse {
    pub message: &'static str,
    pub token: String,
    pub user: UserView,
}

fn session(
    app: &AppState,
    jar: CookieJar,
    message: &'static str,
    user: UserView,
) -> Result<(CookieJar, Json<AuthResponse>), AppError> {
    let token = generate_token(&app.config.jwt, &user.id)?;

    let cookie = Cookie::build((AUTH_COOKIE_NAME, token.to_owned()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .build();

    Ok((
        jar.add(cookie),
        Json(AuthResponse {
            message,
            token,
            user,
        }),
    ))
}

#[tracing::instrument(skip_all)]
pub async fn register(
    State(app): State<AppState>,
    jar: CookieJar,
    JsonBody(input): JsonBody<RegisterInput>,
) -> Result<impl IntoResponse, AppError> {
    let user = larder_user::Command(app.db.clone()).register(input).await?;
    let (jar, body) = session(&app, jar, "User registered successfully", user)?;

    Ok((StatusCode::CREATED, jar, body))
}

#[tracing::instrument(skip_all)]
pub async fn login(
    State(app): State<AppState>,
    jar: CookieJar,
    JsonBody(input): JsonBody<LoginInput>,
) -> Result<impl IntoResponse, AppError> {
    let user = larder_user::Command(app.db.clone()).login(input).await?;
    tracing::info!(user_id = %user.id, "user logged in");

    session(&app, jar, "Login successful", user)
}

pub async fn me(AuthUser(user): AuthUser) -> Json<UserView> {
    Json(user)
}
