//! Menu Item Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::resource::Resource;

/// Menu section, also the prep station an item is routed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuCategory {
    Food,
    RawMeat,
    Drinks,
}

impl MenuCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Food => "food",
            Self::RawMeat => "raw_meat",
            Self::Drinks => "drinks",
        }
    }
}

/// Menu item entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: Decimal,
    pub category: MenuCategory,
    #[serde(default = "default_available")]
    pub is_available: bool,
    #[serde(default)]
    pub image_url: Option<String>,
}

fn default_available() -> bool {
    true
}

/// Create/update menu item payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItemPayload {
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub category: MenuCategory,
    pub is_available: bool,
    pub image_url: Option<String>,
}

impl Resource for MenuItem {
    type Id = i64;
    type Create = MenuItemPayload;
    type Update = MenuItemPayload;

    const COLLECTION: &'static str = "menu-items";
    const SINGULAR: &'static str = "menu item";
    const PLURAL: &'static str = "menu items";

    fn id(&self) -> &i64 {
        &self.id
    }

    fn label(&self) -> String {
        self.name.clone()
    }
}
