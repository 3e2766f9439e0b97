//! # Seed Data Management
//!
//! Start-up data the service needs before it can accept logins.

pub mod admin;

pub use admin::{
    AccountStoreError,
    AdminAccountStore,
    AdminSeedConfig,
    AdminSeedGuard,
    NewAdminAccount,
    SeaAccountStore,
    SeedError,
    SeedOutcome,
};
