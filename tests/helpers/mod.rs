#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use http_body_util::BodyExt;
use larder::config::{
    Config, CorsConfig, DatabaseConfig, JwtConfig, ObservabilityConfig, ServerConfig,
};
use serde_json::{Value, json};
use temp_dir::TempDir;
use tower::ServiceExt;

pub struct TestApp {
    pub router: Router,
    pub state: larder_shared::State,
    _dir: TempDir,
}

pub fn test_config(url: String) -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_owned(),
            port: 3000,
        },
        database: DatabaseConfig {
            url,
            max_connections: 1,
        },
        jwt: JwtConfig {
            secret: "test_secret_key_minimum_32_characters_long".to_owned(),
            expiration_days: 1,
            issuer: "larder".to_owned(),
            audience: "larder-api".to_owned(),
        },
        observability: ObservabilityConfig::default(),
        cors: CorsConfig::default(),
    }
}

impl TestApp {
    pub async fn new() -> anyhow::Result<Self> {
        let dir = TempDir::new()?;
        let url = format!("sqlite:{}", dir.child("db.sqlite3").display());

        let pool = larder::db::create_pool(&url, 1).await?;
        larder_db::migrate(&pool).await?;

        let state = larder_shared::State::new(pool);
        let router = larder::create_app(test_config(url), state.clone());

        Ok(Self {
            router,
            state,
            _dir: dir,
        })
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> anyhow::Result<(StatusCode, Value)> {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&body)?))?,
            None => builder.body(Body::empty())?,
        };

        let response = self.router.clone().oneshot(request).await?;
        let status = response.status();
        let bytes = response.into_body().collect().await?.to_bytes();

        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)?
        };

        Ok((status, value))
    }

    pub async fn get(&self, uri: &str, token: &str) -> anyhow::Result<(StatusCode, Value)> {
        self.request(Method::GET, uri, Some(token), None).await
    }

    pub async fn post(
        &self,
        uri: &str,
        token: &str,
        body: Value,
    ) -> anyhow::Result<(StatusCode, Value)> {
        self.request(Method::POST, uri, Some(token), Some(body))
            .await
    }

    /// Registers a user and returns their bearer token.
    pub async fn register(&self, email: &str) -> anyhow::Result<String> {
        let (status, body) = self
            .request(
                Method::POST,
                "/api/auth/register",
                None,
                Some(json!({
                    "email": email,
                    "name": "Test",
                    "password": "my_password",
                })),
            )
            .await?;

        assert_eq!(status, StatusCode::CREATED, "{body}");

        Ok(body["token"]
            .as_str()
            .map(ToOwned::to_owned)
            .unwrap_or_default())
    }

    /// Creates a unit and a category, returning their ids.
    pub async fn catalog(&self, token: &str) -> anyhow::Result<(String, String)> {
        let (_, unit) = self
            .post(
                "/api/units",
                token,
                json!({"name": "piece", "abbreviation": "pcs"}),
            )
            .await?;
        let (_, category) = self
            .post("/api/categories", token, json!({"name": "Dairy & Eggs"}))
            .await?;

        Ok((id(&unit), id(&category)))
    }
}

pub fn id(value: &Value) -> String {
    value["id"].as_str().map(ToOwned::to_owned).unwrap_or_default()
}
