//! # Administrator Seed
//!
//! Guarantees that the configured administrator account exists.
//!
//! [`AdminSeedGuard::ensure_seeded`] is safe to call from any number of tasks
//! at once: concurrent callers share a single in-flight seeding operation, a
//! successful run is remembered for the lifetime of the guard, and a failed
//! run is reported to every waiting caller and then left retryable.
//!
//! ```rust,ignore
//! let guard = AdminSeedGuard::new(SeaAccountStore::new(Arc::clone(&db)), AdminSeedConfig::from_env());
//! guard.ensure_seeded().await?;
//! ```

use std::{
    fmt,
    sync::{Arc, Mutex, PoisonError},
};

use async_trait::async_trait;
use auth::{
    PasswordConfig,
    hash_password,
    secrecy::{ExposeSecret, SecretString},
};
use chrono::Utc;
use entity::{
    sea_orm_active_enums::{UserRole, UserStatus},
    users,
};
use error::AppError;
use futures::future::{BoxFuture, FutureExt, Shared};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryFilter, Set, SqlErr};
use tracing::{error, info, warn};

/// Display name given to the seeded account.
pub const ADMIN_DISPLAY_NAME: &str = "Administrator";

/// Failures reported by an [`AdminAccountStore`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccountStoreError {
    /// The username is already taken (unique constraint violation).
    #[error("username already exists")]
    DuplicateKey,

    #[error("store failure: {0}")]
    Database(String),
}

/// Account to be inserted by the seed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAdminAccount {
    pub username:      String,
    pub password_hash: String,
    pub name:          String,
    pub avatar:        String,
}

/// Persistence used by the seed.
#[async_trait]
pub trait AdminAccountStore: Send + Sync {
    /// Whether an account with this username exists.
    async fn username_exists(&self, username: &str) -> Result<bool, AccountStoreError>;

    /// Insert an active administrator account.
    ///
    /// Must report a username collision as [`AccountStoreError::DuplicateKey`].
    async fn create_admin(&self, account: NewAdminAccount) -> Result<(), AccountStoreError>;
}

/// [`AdminAccountStore`] backed by the `users` table.
#[derive(Debug, Clone)]
pub struct SeaAccountStore {
    db: Arc<DatabaseConnection>,
}

impl SeaAccountStore {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            db,
        }
    }
}

/// Map a database error, singling out unique constraint violations.
pub fn classify_db_err(err: DbErr) -> AccountStoreError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => AccountStoreError::DuplicateKey,
        _ => AccountStoreError::Database(err.to_string()),
    }
}

#[async_trait]
impl AdminAccountStore for SeaAccountStore {
    async fn username_exists(&self, username: &str) -> Result<bool, AccountStoreError> {
        let count = users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .count(&*self.db)
            .await
            .map_err(classify_db_err)?;
        Ok(count > 0)
    }

    async fn create_admin(&self, account: NewAdminAccount) -> Result<(), AccountStoreError> {
        let now = Utc::now();
        let model = users::ActiveModel {
            id:            Set(uuid::Uuid::new_v4()),
            username:      Set(account.username),
            password_hash: Set(account.password_hash),
            name:          Set(account.name),
            avatar:        Set(account.avatar),
            role:          Set(UserRole::Admin),
            status:        Set(UserStatus::Active),
            created_at:    Set(now),
            updated_at:    Set(now),
        };
        model
            .insert(&*self.db)
            .await
            .map(|_| ())
            .map_err(classify_db_err)
    }
}

/// Administrator credentials read from configuration.
#[derive(Clone, Default)]
pub struct AdminSeedConfig {
    pub username: Option<String>,
    pub password: Option<String>,
    /// Argon2 parameters; `None` uses the defaults.
    pub hashing:  Option<PasswordConfig>,
}

impl fmt::Debug for AdminSeedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminSeedConfig")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl AdminSeedConfig {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            password: Some(password.into()),
            hashing:  None,
        }
    }

    /// Reads `VITALOG_ADMIN_USERNAME` and `VITALOG_ADMIN_PASSWORD`.
    pub fn from_env() -> Self {
        Self {
            username: std::env::var("VITALOG_ADMIN_USERNAME").ok(),
            password: std::env::var("VITALOG_ADMIN_PASSWORD").ok(),
            hashing:  None,
        }
    }

    /// Both values, if present and non-empty.
    fn credentials(&self) -> Option<(&str, &str)> {
        let username = self.username.as_deref().map(str::trim)?;
        let password = self.password.as_deref()?;
        if username.is_empty() || password.is_empty() {
            None
        }
        else {
            Some((username, password))
        }
    }
}

/// What a call to [`AdminSeedGuard::ensure_seeded`] observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// This run inserted the account.
    Created,
    /// The account was already present.
    AlreadyExists,
    /// Another writer inserted the account between lookup and insert.
    CreatedConcurrently,
    /// Credentials are not configured; seeding is disabled.
    SkippedMissingConfig,
    /// An earlier run already completed.
    AlreadySeeded,
}

/// Failure of a seeding run. Cloned to every caller awaiting the run.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SeedError {
    #[error("failed to look up administrator account: {0}")]
    Lookup(String),

    #[error("failed to hash administrator password: {0}")]
    Hashing(String),

    #[error("failed to create administrator account: {0}")]
    Create(String),
}

impl From<SeedError> for AppError {
    fn from(err: SeedError) -> Self { AppError::internal(err.to_string()) }
}

type SeedFuture = Shared<BoxFuture<'static, Result<SeedOutcome, SeedError>>>;

enum SeedState {
    Idle,
    Pending(SeedFuture),
    Seeded,
}

struct GuardInner {
    store:  Arc<dyn AdminAccountStore>,
    config: AdminSeedConfig,
    state:  Mutex<SeedState>,
}

/// Single-flight, run-once administrator seed.
///
/// Cloning is cheap; clones share the same state.
#[derive(Clone)]
pub struct AdminSeedGuard {
    inner: Arc<GuardInner>,
}

impl fmt::Debug for AdminSeedGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminSeedGuard")
            .field("config", &self.inner.config)
            .field("seeded", &self.is_seeded())
            .finish()
    }
}

impl AdminSeedGuard {
    pub fn new(store: impl AdminAccountStore + 'static, config: AdminSeedConfig) -> Self {
        Self::with_store(Arc::new(store), config)
    }

    pub fn with_store(store: Arc<dyn AdminAccountStore>, config: AdminSeedConfig) -> Self {
        Self {
            inner: Arc::new(GuardInner {
                store,
                config,
                state: Mutex::new(SeedState::Idle),
            }),
        }
    }

    /// Whether a run has completed successfully.
    pub fn is_seeded(&self) -> bool { matches!(*self.inner.lock_state(), SeedState::Seeded) }

    /// Make sure the administrator account exists.
    ///
    /// Returns immediately once seeded. Otherwise joins the in-flight run or
    /// starts a new one. A failed run clears the in-flight marker so that the
    /// next call retries; it is never retried automatically.
    ///
    /// # Errors
    ///
    /// Returns the run's [`SeedError`] to every caller that awaited it.
    pub async fn ensure_seeded(&self) -> Result<SeedOutcome, SeedError> {
        let run = {
            let mut state = self.inner.lock_state();
            match &*state {
                SeedState::Seeded => return Ok(SeedOutcome::AlreadySeeded),
                SeedState::Pending(run) => run.clone(),
                SeedState::Idle => {
                    let run = Arc::clone(&self.inner).start_run();
                    *state = SeedState::Pending(run.clone());
                    run
                },
            }
        };
        run.await
    }
}

impl GuardInner {
    fn lock_state(&self) -> std::sync::MutexGuard<'_, SeedState> { self.state.lock().unwrap_or_else(PoisonError::into_inner) }

    /// Build the shared run; it records its own result in the state.
    fn start_run(self: Arc<Self>) -> SeedFuture {
        async move {
            let result = self.seed_once().await;
            {
                let mut state = self.lock_state();
                *state = if result.is_ok() {
                    SeedState::Seeded
                }
                else {
                    SeedState::Idle
                };
            }
            result
        }
        .boxed()
        .shared()
    }

    async fn seed_once(&self) -> Result<SeedOutcome, SeedError> {
        let Some((username, password)) = self.config.credentials()
        else {
            warn!("VITALOG_ADMIN_USERNAME or VITALOG_ADMIN_PASSWORD is not set, administrator seeding is disabled");
            return Ok(SeedOutcome::SkippedMissingConfig);
        };

        let exists = self.store.username_exists(username).await.map_err(|e| {
            error!(username = %username, error = %e, "Administrator lookup failed");
            SeedError::Lookup(e.to_string())
        })?;
        if exists {
            info!(username = %username, "Administrator account already present");
            return Ok(SeedOutcome::AlreadyExists);
        }

        let secret = SecretString::from(password.to_string());
        let password_hash = hash_password(&secret, self.config.hashing.clone()).map_err(|e| {
            error!(error = %e, "Administrator password hashing failed");
            SeedError::Hashing(e.to_string())
        })?;

        let account = NewAdminAccount {
            username:      username.to_string(),
            password_hash: password_hash.expose_secret().to_string(),
            name:          ADMIN_DISPLAY_NAME.to_string(),
            avatar:        users::default_avatar(username),
        };

        match self.store.create_admin(account).await {
            Ok(()) => {
                info!(username = %username, "Administrator account created");
                Ok(SeedOutcome::Created)
            },
            Err(AccountStoreError::DuplicateKey) => {
                info!(username = %username, "Administrator account was created concurrently");
                Ok(SeedOutcome::CreatedConcurrently)
            },
            Err(e) => {
                error!(username = %username, error = %e, "Administrator account creation failed");
                Err(SeedError::Create(e.to_string()))
            },
        }
    }
}
