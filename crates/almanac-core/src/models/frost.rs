//! The reference frost date and the outcome of changing it.

use jiff::civil::{self, Date};
use serde::{Deserialize, Serialize};

/// Frost date used when an owner never set one.
pub const DEFAULT_FROST_DATE: Date = civil::date(2026, 5, 15);

/// Settings key the frost date is stored under.
pub const FROST_DATE_KEY: &str = "frost_date";

/// Effective frost date of an owner.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct FrostDate {
    pub date: Date,

    /// False when `date` is the fallback default
    pub explicit: bool,
}

/// A plant whose regeneration failed during a frost date change.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlantFailure {
    pub plant_id: u64,
    pub error: String,
}

/// Result of setting a new frost date.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FrostDateUpdate {
    pub frost_date: Date,

    /// Plants whose tasks were rebuilt
    pub regenerated: Vec<u64>,

    /// Plants left with their previous tasks
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failed: Vec<PlantFailure>,
}
