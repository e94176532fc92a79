//! Plant model definition and related functionality.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{OffsetDays, SowingMethod, Task};

/// Validated sowing configuration of a plant.
///
/// Produced only by [`crate::validation::validate_plant`], so every value of
/// this type already satisfies the per-method required-offset rules.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlantConfig {
    /// Common name, never blank
    pub name: String,

    /// Cultivar or variety name
    pub variety: Option<String>,

    /// How the plant is started
    pub sowing_method: SowingMethod,

    /// Offset of the seed-starting date from the frost date
    pub seed_start_offset_days: Option<OffsetDays>,

    /// Offset of the start of hardening off
    pub hardening_offset_days: Option<OffsetDays>,

    /// Offset of the transplant date
    pub transplant_offset_days: Option<OffsetDays>,

    /// Free text such as "7-14"
    pub days_to_sprout: Option<String>,

    /// "1/4", "0" or "surface sow"
    pub seed_depth: Option<String>,

    /// Free text containing at least one number
    pub plant_spacing: Option<String>,

    /// Free-form notes
    pub notes: Option<String>,
}

impl PlantConfig {
    /// "Name (Variety)" or just the name.
    pub fn label(&self) -> String {
        match &self.variety {
            Some(variety) => format!("{} ({variety})", self.name),
            None => self.name.clone(),
        }
    }
}

/// A stored plant.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Plant {
    /// Unique identifier for the plant
    pub id: u64,

    /// Owner scope the plant belongs to
    pub owner: String,

    #[serde(flatten)]
    pub config: PlantConfig,

    /// When set, the plant's tasks are hidden from active task views
    #[serde(skip_serializing_if = "Option::is_none")]
    pub muted_at: Option<Timestamp>,

    /// Timestamp when the plant was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the plant was last modified (UTC)
    pub updated_at: Timestamp,
}

impl Plant {
    pub fn is_muted(&self) -> bool {
        self.muted_at.is_some()
    }
}

/// A plant together with its current task set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlantSchedule {
    #[serde(flatten)]
    pub plant: Plant,

    /// Tasks ordered by due date
    #[serde(default)]
    pub tasks: Vec<Task>,
}
