//! Entity definitions for Vitalog
//!
//! Sea-ORM entity definitions for the database models. Calendar dates are
//! stored as `YYYY-MM-DD` strings and clock times as `HH:mm` strings, so
//! lexicographic order equals chronological order.

pub mod sea_orm_active_enums;

pub mod logs;
pub use logs::Entity as Logs;
pub mod tasks;
pub use tasks::Entity as Tasks;
pub mod users;
pub use users::Entity as Users;
pub mod water_entries;
pub use water_entries::Entity as WaterEntries;
pub mod water_settings;
pub use water_settings::Entity as WaterSettings;
