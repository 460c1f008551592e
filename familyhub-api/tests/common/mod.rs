//! Common test utilities for integration tests
//!
//! Builds the full router over an in-memory document and drives it with
//! `tower::ServiceExt::oneshot`, so no socket is opened.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use familyhub_api::app::{build_router, AppState};
use familyhub_api::config::{ApiConfig, Config, JwtConfig, StorageConfig};
use familyhub_shared::models::user::User;
use familyhub_shared::store::{Document, DocumentStore, MemoryStorage};
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

pub const SECRET: &str = "integration-test-secret-at-least-32-bytes";
pub const PASSWORD: &str = "correct horse battery";

/// Test context holding the router and the store behind it
pub struct TestContext {
    pub app: Router,
    pub store: Arc<DocumentStore>,
    pub config: Config,
}

/// Status and parsed JSON body of a response (`Null` when empty)
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: Value,
}

pub fn test_config() -> Config {
    Config {
        api: ApiConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            cors_origins: vec!["*".to_string()],
            production: false,
        },
        storage: StorageConfig {
            data_path: PathBuf::from("unused.json"),
        },
        jwt: JwtConfig {
            secret: SECRET.to_string(),
            ttl_days: 7,
        },
    }
}

impl TestContext {
    /// Creates a context over an empty document
    pub fn new() -> Self {
        Self::with_document(Document::default())
    }

    /// Creates a context over a pre-seeded document
    pub fn with_document(document: Document) -> Self {
        let config = test_config();
        let state = AppState::new(
            DocumentStore::new(MemoryStorage::with_document(document)),
            config.clone(),
        );
        let store = state.store.clone();
        let app = build_router(state);

        Self { app, store, config }
    }

    /// Sends a request, optionally with a bearer token and a JSON body
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let body = match body {
            Some(value) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(value.to_string())
            }
            None => Body::empty(),
        };

        self.send(builder.body(body).unwrap()).await
    }

    /// Sends a raw request
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.app.clone().oneshot(request).await.unwrap();

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                panic!("non-JSON body ({}): {}", status, String::from_utf8_lossy(&bytes))
            })
        };

        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> TestResponse {
        self.request(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> TestResponse {
        self.request(Method::POST, uri, token, Some(body)).await
    }

    pub async fn register(&self, name: &str, email: &str) -> TestResponse {
        self.post(
            "/api/auth/register",
            None,
            json!({ "name": name, "email": email, "password": PASSWORD }),
        )
        .await
    }

    pub async fn login(&self, email: &str, password: &str) -> TestResponse {
        self.post(
            "/api/auth/login",
            None,
            json!({ "email": email, "password": password }),
        )
        .await
    }

    /// Registers the first (owner) account and returns its token
    pub async fn owner_token(&self) -> String {
        let registered = self.register("Owner", "owner@example.com").await;
        assert_eq!(registered.status, StatusCode::CREATED, "{}", registered.body);
        self.token_for("owner@example.com").await
    }

    /// Registers an account, approves it through the store and returns its token
    ///
    /// Requires an owner to exist already, otherwise the account is the owner.
    pub async fn member_token(&self, name: &str, email: &str) -> String {
        let registered = self.register(name, email).await;
        assert_eq!(registered.status, StatusCode::CREATED, "{}", registered.body);

        let id = user_id(&registered.body);
        User::approve(&self.store, id).await.unwrap();
        self.token_for(email).await
    }

    async fn token_for(&self, email: &str) -> String {
        let login = self.login(email, PASSWORD).await;
        assert_eq!(login.status, StatusCode::OK, "{}", login.body);
        login.body["token"].as_str().unwrap().to_string()
    }
}

/// Reads the `id` field of a response body as a UUID
pub fn user_id(body: &Value) -> Uuid {
    body["id"].as_str().unwrap().parse().unwrap()
}
