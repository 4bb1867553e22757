//! Data models
//!
//! Entities and payloads exchanged with the backend's REST collections.
//! All IDs are `i64` (server-side INTEGER PRIMARY KEY).

pub mod dining_table;
pub mod menu_item;
pub mod role;
pub mod user;

// Re-exports
pub use dining_table::*;
pub use menu_item::*;
pub use role::*;
pub use user::*;
