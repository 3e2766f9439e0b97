//! # Common Test Utilities
//!
//! Provides shared test infrastructure including mock database state,
//! token minting, user fixtures and request helpers.

#![allow(dead_code)]

use std::sync::{Arc, Once};

use auth::{JwtConfig, PasswordConfig, TokenSubject, create_access_token, hash_password, secrecy::ExposeSecret};
use axum::{Router, body::Body};
use chrono::{DateTime, TimeZone, Utc};
use entity::{
    sea_orm_active_enums::{UserRole, UserStatus},
    users,
};
use http::{Method, Request, StatusCode, header};
use migration::{AdminSeedConfig, AdminSeedGuard, SeaAccountStore};
use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase, Transaction};
use server::{AppState, Clock, DEFAULT_TIMEZONE, create_app_router, middleware::security_headers::CorsConfig};
use tower::ServiceExt;
use uuid::Uuid;

/// Base64 of a 48-byte test secret
pub const TEST_JWT_SECRET: &str = "dml0YWxvZy10ZXN0LXNlY3JldC1mb3Itcm91dGVyLXRlc3RzLTAxMjM0NTY3ODk=";

/// Password of every fixture user
pub const TEST_PASSWORD: &str = "hydrate2024";

/// Initialize test logging (run once per test session)
static INIT: Once = Once::new();

/// Initialize test environment including structured logging
pub fn init_test_env() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing::Level::DEBUG)
            .try_init();
    });
}

/// Fast Argon2 parameters for fixtures
pub fn fast_hashing() -> PasswordConfig {
    PasswordConfig {
        memory_cost: 1024,
        time_cost: 1,
        parallelism: 1,
        ..Default::default()
    }
}

pub fn test_jwt_config() -> JwtConfig { JwtConfig::new(TEST_JWT_SECRET) }

/// 2024-03-10 12:00 in Taipei
pub fn fixed_now() -> DateTime<Utc> { Utc.with_ymd_and_hms(2024, 3, 10, 4, 0, 0).unwrap() }

/// Postgres-flavoured mock database
pub fn mock_db() -> MockDatabase { MockDatabase::new(DatabaseBackend::Postgres) }

/// State over `db` with seeding disabled and a clock frozen at [`fixed_now`].
///
/// Accepts either an owned connection or one already shared with the test.
pub fn test_state(db: impl Into<Arc<DatabaseConnection>>) -> AppState {
    let db = db.into();
    let guard = AdminSeedGuard::new(
        SeaAccountStore::new(Arc::clone(&db)),
        AdminSeedConfig::default(),
    );
    state_with_guard(db, guard)
}

pub fn state_with_guard(db: impl Into<Arc<DatabaseConnection>>, seed_guard: AdminSeedGuard) -> AppState {
    AppState {
        db: db.into(),
        jwt_config: test_jwt_config(),
        seed_guard,
        clock: Clock::fixed(DEFAULT_TIMEZONE, fixed_now()),
    }
}

/// Statements the mock connection received.
///
/// Every router and state built over `db` must be dropped first.
pub fn transaction_log(db: Arc<DatabaseConnection>) -> Vec<Transaction> {
    match Arc::try_unwrap(db) {
        Ok(db) => db.into_transaction_log(),
        Err(_) => panic!("mock connection is still shared with a live router"),
    }
}

/// Full application router over `state`.
pub fn app(state: AppState) -> Router { create_app_router(state, CorsConfig::default()) }

/// Test fixtures for user data
pub struct UserFixture {
    pub id:       Uuid,
    pub username: String,
    pub name:     String,
    pub role:     UserRole,
    pub status:   UserStatus,
}

impl Default for UserFixture {
    fn default() -> Self {
        Self {
            id:       Uuid::new_v4(),
            username: "amy".to_string(),
            name:     "Amy".to_string(),
            role:     UserRole::Member,
            status:   UserStatus::Active,
        }
    }
}

impl UserFixture {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    #[must_use]
    pub fn admin() -> Self {
        Self {
            username: "admin".to_string(),
            name: "Administrator".to_string(),
            role: UserRole::Admin,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = username.into();
        self
    }

    #[must_use]
    pub fn with_status(mut self, status: UserStatus) -> Self {
        self.status = status;
        self
    }

    /// Account row with [`TEST_PASSWORD`] hashed.
    pub fn model(&self) -> users::Model {
        let secret = auth::secrecy::SecretString::from(TEST_PASSWORD.to_string());
        let hash = hash_password(&secret, Some(fast_hashing())).unwrap();
        users::Model {
            id:            self.id,
            username:      self.username.clone(),
            password_hash: hash.expose_secret().to_string(),
            name:          self.name.clone(),
            avatar:        users::default_avatar(&self.username),
            role:          self.role,
            status:        self.status,
            created_at:    fixed_now(),
            updated_at:    fixed_now(),
        }
    }

    /// Bearer token for this user.
    pub fn token(&self) -> String {
        let id = self.id.to_string();
        create_access_token(
            &test_jwt_config(),
            TokenSubject {
                user_id:  &id,
                username: &self.username,
                name:     &self.name,
                role:     self.role.as_str(),
            },
        )
        .unwrap()
    }
}

/// Request without a body.
pub fn request(method: Method, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

/// Request with a JSON body.
pub fn json_request(method: Method, uri: &str, token: Option<&str>, body: serde_json::Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

/// Send `request` through `app`; returns the status and the JSON body (null when empty).
pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    }
    else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| serde_json::Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, json)
}
