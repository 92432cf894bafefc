//! Shared helpers for the HTTP integration tests
//!
//! Each test gets a fresh SQLite database from `#[sqlx::test]`; [`TestApp`]
//! wraps the full router around it and drives it with `oneshot`.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    response::Response,
    Router,
};
use serde_json::{json, Value};
use smartforce_server::{
    api::{create_router, AppState},
    config::Config,
    middleware::rate_limit::RateLimitConfig,
};
use sqlx::SqlitePool;
use tower::ServiceExt;

/// Configuration with a quota large enough to never throttle a test
pub fn test_config() -> Config {
    let mut config = Config::default();
    config.auth.secret_key = "integration-test-secret".to_string();
    config.rate_limit = RateLimitConfig {
        requests_per_minute: 10_000,
    };
    config
}

/// A registered account and its bearer token
#[derive(Debug, Clone)]
pub struct Account {
    pub id: i64,
    pub token: String,
}

pub struct TestApp {
    pub router: Router,
    pub pool: SqlitePool,
}

impl TestApp {
    pub fn new(pool: SqlitePool) -> Self {
        Self::with_config(pool, test_config())
    }

    pub fn with_config(pool: SqlitePool, config: Config) -> Self {
        let state = AppState::new(pool.clone(), &config).unwrap();
        let router = create_router(state, &config).unwrap();
        Self { router, pool }
    }

    pub async fn send(&self, request: Request<Body>) -> Response {
        self.router.clone().oneshot(request).await.unwrap()
    }

    /// Send a JSON request and decode the JSON response (`Null` for other bodies)
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.send(request).await;
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    pub async fn get(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, Some(token), None).await
    }

    pub async fn post(&self, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(token), Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::PUT, uri, Some(token), Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.request(Method::DELETE, uri, Some(token), None).await
    }

    pub async fn register(&self, email: &str, name: &str, role: &str) -> Account {
        let (status, body) = self
            .request(
                Method::POST,
                "/api/v1/auth/register",
                None,
                Some(json!({
                    "email": email,
                    "name": name,
                    "password": "secret123",
                    "role": role
                })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "register failed: {}", body);

        Account {
            id: body["data"]["user"]["id"].as_i64().unwrap(),
            token: body["data"]["access_token"].as_str().unwrap().to_string(),
        }
    }

    pub async fn student(&self, email: &str) -> Account {
        self.register(email, "Student", "student").await
    }

    pub async fn professor(&self, email: &str) -> Account {
        self.register(email, "Professor", "professor").await
    }

    pub async fn create_exercise(&self, token: &str, name: &str) -> i64 {
        let (status, body) = self
            .post(
                "/api/v1/exercises",
                token,
                json!({ "name": name, "description": format!("{} description", name) }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "create exercise failed: {}", body);
        body["data"]["id"].as_i64().unwrap()
    }

    pub async fn count(&self, table: &str) -> i64 {
        sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
            .fetch_one(&self.pool)
            .await
            .unwrap()
    }
}
