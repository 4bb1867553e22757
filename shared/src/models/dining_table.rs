//! Dining Table Model

use serde::{Deserialize, Serialize};

use crate::resource::Resource;

/// Table occupancy status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableStatus {
    #[default]
    Available,
    Occupied,
    Reserved,
}

/// Dining table entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiningTable {
    pub id: i64,
    /// Short label painted on the table, e.g. "T1"
    pub number: String,
    #[serde(default)]
    pub status: TableStatus,
    #[serde(default)]
    pub is_vip: bool,
    /// Assigned waiter (User id)
    #[serde(default)]
    pub waiter_id: Option<i64>,
    /// Read-only, filled in by the server when it joins the waiter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub waiter_name: Option<String>,
}

/// Create/update dining table payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiningTablePayload {
    pub number: String,
    pub status: TableStatus,
    pub is_vip: bool,
    pub waiter_id: Option<i64>,
}

impl DiningTablePayload {
    pub fn new(number: impl Into<String>) -> Self {
        Self {
            number: number.into(),
            status: TableStatus::Available,
            is_vip: false,
            waiter_id: None,
        }
    }
}

impl From<&DiningTable> for DiningTablePayload {
    fn from(table: &DiningTable) -> Self {
        Self {
            number: table.number.clone(),
            status: table.status,
            is_vip: table.is_vip,
            waiter_id: table.waiter_id,
        }
    }
}

impl Resource for DiningTable {
    type Id = i64;
    type Create = DiningTablePayload;
    type Update = DiningTablePayload;

    const COLLECTION: &'static str = "tables";
    const SINGULAR: &'static str = "table";
    const PLURAL: &'static str = "tables";

    fn id(&self) -> &i64 {
        &self.id
    }

    fn label(&self) -> String {
        format!("Table {}", self.number)
    }
}
