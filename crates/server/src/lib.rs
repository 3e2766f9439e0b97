//! # Vitalog API Server
//!
//! Axum-based HTTP API server for the Vitalog health tracker.
//!
//! ## Modules
//!
//! - [`auth`]: Login, profile and member management endpoints
//! - [`calendar`]: Calendar date and clock-time helpers
//! - [`dto`]: Request/response data transfer objects
//! - [`extract`]: Extractors that reject with the JSON error envelope
//! - [`middleware`]: HTTP middleware (auth, admin gate, request ids, headers)
//! - [`router`]: API route configuration
//! - [`tracking`]: Water, task and log endpoints
//! - [`trends`]: Date-range resolution and trend aggregation

use std::{fmt, sync::Arc};

use ::auth::JwtConfig;
use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use migration::AdminSeedGuard;

pub mod auth;
pub mod calendar;
pub mod dto;
pub mod extract;
pub mod middleware;
pub mod router;
pub mod tracking;
pub mod trends;

pub use router::create_app_router;

/// Timezone every calendar date is computed in unless configured otherwise.
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::Asia::Taipei;

/// Application state shared across request handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Database connection pool
    pub db:         Arc<sea_orm::DbConn>,
    /// JWT configuration
    pub jwt_config: JwtConfig,
    /// Ensures the administrator account exists
    pub seed_guard: AdminSeedGuard,
    /// Source of "now" and the local timezone
    pub clock:      Clock,
}

impl AppState {
    /// Creates the state with a system clock in `tz`.
    pub fn new(db: Arc<sea_orm::DbConn>, jwt_config: JwtConfig, seed_guard: AdminSeedGuard, tz: Tz) -> Self {
        Self {
            db,
            jwt_config,
            seed_guard,
            clock: Clock::system(tz),
        }
    }
}

type NowFn = dyn Fn() -> DateTime<Utc> + Send + Sync;

/// Current instant plus the timezone that turns it into a calendar date.
#[derive(Clone)]
pub struct Clock {
    tz:  Tz,
    now: Arc<NowFn>,
}

impl Clock {
    /// Wall clock in `tz`.
    pub fn system(tz: Tz) -> Self {
        Self {
            tz,
            now: Arc::new(Utc::now),
        }
    }

    /// Clock frozen at `instant`.
    pub fn fixed(tz: Tz, instant: DateTime<Utc>) -> Self {
        Self {
            tz,
            now: Arc::new(move || instant),
        }
    }

    pub fn timezone(&self) -> Tz { self.tz }

    pub fn now(&self) -> DateTime<Utc> { (self.now)() }

    /// Today's calendar date in the configured timezone.
    pub fn today(&self) -> NaiveDate { trends::range::today_in(self.tz, self.now()) }
}

impl fmt::Debug for Clock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Clock")
            .field("tz", &self.tz)
            .finish_non_exhaustive()
    }
}
