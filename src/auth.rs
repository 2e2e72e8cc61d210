use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::{
    TypedHeader,
    extract::CookieJar,
    headers::{Authorization, authorization::Bearer},
};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use larder_shared::Metadata;
use larder_user::UserView;
use serde::{Deserialize, Serialize};

use crate::{config::JwtConfig, error::AppError, routes::AppState};

pub const AUTH_COOKIE_NAME: &str = "auth_token";

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub aud: String,
    pub exp: u64,
    pub iat: u64,
    pub iss: String,
    pub sub: String,
}

pub fn generate_token(config: &JwtConfig, sub: impl Into<String>) -> anyhow::Result<String> {
    let now = larder_shared::timestamp();
    let claims = Claims {
        aud: config.audience.to_owned(),
        exp: now + config.expiration_days * 24 * 60 * 60,
        iat: now,
        iss: config.issuer.to_owned(),
        sub: sub.into(),
    };

    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )?;

    Ok(token)
}

/// Checks signature, expiry, issuer and audience.
pub fn validate_token(config: &JwtConfig, token: &str) -> anyhow::Result<Claims> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[config.issuer.to_owned()]);
    validation.set_audience(&[config.audience.to_owned()]);

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )?;

    Ok(token_data.claims)
}

/// The user behind the request's bearer token or `auth_token` cookie.
pub struct AuthUser(pub UserView);

impl AuthUser {
    pub fn id(&self) -> &str {
        &self.0.id
    }

    pub fn metadata(&self) -> Metadata {
        Metadata::by(self.0.id.to_owned())
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let bearer =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .ok()
                .map(|TypedHeader(authorization)| authorization.token().to_owned());

        let token = match bearer {
            Some(token) => token,
            None => {
                let jar = CookieJar::from_request_parts(parts, state)
                    .await
                    .map_err(|_| larder_shared::Error::Unauthorized)?;

                jar.get(AUTH_COOKIE_NAME)
                    .map(|cookie| cookie.value().to_owned())
                    .ok_or(larder_shared::Error::Unauthorized)?
            }
        };

        let claims = validate_token(&state.config.jwt, &token).map_err(|e| {
            tracing::debug!(error = %e, "rejected token");
            larder_shared::Error::Unauthorized
        })?;

        let Some(user) = larder_user::Query(state.db.read_db.clone())
            .find_by_id(&claims.sub)
            .await?
        else {
            tracing::warn!(user_id = %claims.sub, "token refers to an unknown user");
            return Err(larder_shared::Error::Unauthorized.into());
        };

        Ok(AuthUser(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(secret: &str) -> JwtConfig {
        JwtConfig {
            secret: secret.to_owned(),
            expiration_days: 7,
            issuer: "larder".to_owned(),
            audience: "larder-api".to_owned(),
        }
    }

    #[test]
    fn test_token_round_trip() {
        let config = config("test_secret_key_minimum_32_characters_long");
        let token = generate_token(&config, "01HZX3").unwrap();
        let claims = validate_token(&config, &token).unwrap();

        assert_eq!(claims.sub, "01HZX3");
        assert_eq!(claims.iss, "larder");
        assert_eq!(claims.exp - claims.iat, 7 * 24 * 60 * 60);
    }

    #[test]
    fn test_token_rejected_with_other_secret_or_audience() {
        let config = config("test_secret_key_minimum_32_characters_long");
        let token = generate_token(&config, "01HZX3").unwrap();

        let other = self::config("another_secret_key_minimum_32_characters");
        assert!(validate_token(&other, &token).is_err());

        let mut other = config.clone();
        other.audience = "someone-else".to_owned();
        assert!(validate_token(&other, &token).is_err());

        assert!(validate_token(&config, "not-a-token").is_err());
    }
}
