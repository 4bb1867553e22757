//! Role Model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Staff role carried by every user and by the session principal.
///
/// Each role owns exactly one dashboard. Serialized lowercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Manager,
    Waiter,
    Cashier,
    Kitchen,
    Bar,
    /// Butchery station. Older forms and tokens spell it `butcher`.
    #[serde(alias = "butcher")]
    Butchery,
}

impl Role {
    /// Every role, in dashboard order
    pub const ALL: [Role; 7] = [
        Role::Admin,
        Role::Manager,
        Role::Waiter,
        Role::Cashier,
        Role::Kitchen,
        Role::Bar,
        Role::Butchery,
    ];

    /// Canonical wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Manager => "manager",
            Self::Waiter => "waiter",
            Self::Cashier => "cashier",
            Self::Kitchen => "kitchen",
            Self::Bar => "bar",
            Self::Butchery => "butchery",
        }
    }

    /// Human readable label for role pickers
    pub fn label(&self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::Manager => "Manager",
            Self::Waiter => "Waiter",
            Self::Cashier => "Cashier",
            Self::Kitchen => "Kitchen",
            Self::Bar => "Bar",
            Self::Butchery => "Butchery",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown role name
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown role: {0}")]
pub struct ParseRoleError(pub String);

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "manager" => Ok(Self::Manager),
            "waiter" => Ok(Self::Waiter),
            "cashier" => Ok(Self::Cashier),
            "kitchen" => Ok(Self::Kitchen),
            "bar" => Ok(Self::Bar),
            "butchery" | "butcher" => Ok(Self::Butchery),
            other => Err(ParseRoleError(other.to_string())),
        }
    }
}
