//! Shared types for the Bistro client
//!
//! Entities, payloads and wire DTOs used by `bistro-client` and by anything
//! else that speaks the backend's JSON (test backends, UI shells).

pub mod client;
pub mod models;
pub mod resource;
pub mod response;

// Re-exports
pub use client::{LoginRequest, LoginResponse, Principal};
pub use models::{
    DiningTable, DiningTablePayload, MenuCategory, MenuItem, MenuItemPayload, ParseRoleError,
    Role, TableStatus, User, UserCreate, UserUpdate,
};
pub use resource::Resource;
pub use serde::{Deserialize, Serialize};
