//! Status and kind enumerations for tasks.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Type-safe enumeration of task statuses.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    /// Task still needs doing
    #[default]
    Pending,

    /// Task was carried out
    Done,

    /// Task was deliberately not carried out
    Skipped,
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(TaskStatus::Pending),
            "done" | "complete" | "completed" => Ok(TaskStatus::Done),
            "skipped" | "skip" => Ok(TaskStatus::Skipped),
            _ => Err(format!("Invalid task status: {s}")),
        }
    }
}

impl TaskStatus {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::Done => "done",
            TaskStatus::Skipped => "skipped",
        }
    }

    /// Get status with consistent icon formatting for display.
    ///
    /// ```rust
    /// use almanac_core::models::TaskStatus;
    ///
    /// assert_eq!(TaskStatus::Done.with_icon(), "✓ Done");
    /// assert_eq!(TaskStatus::Skipped.with_icon(), "↷ Skipped");
    /// assert_eq!(TaskStatus::Pending.with_icon(), "○ Pending");
    /// ```
    pub fn with_icon(&self) -> &'static str {
        match self {
            TaskStatus::Done => "✓ Done",
            TaskStatus::Skipped => "↷ Skipped",
            TaskStatus::Pending => "○ Pending",
        }
    }
}

/// Kind of garden task.
///
/// The first four are produced by schedule generation. `BeginStratification`
/// and `GardenTask` are only ever created by hand.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TaskType {
    PlantSeeds,
    ObserveSprouts,
    BeginHardeningOff,
    PlantSeedlings,
    BeginStratification,
    GardenTask,
}

impl TaskType {
    /// Every kind, in schedule order.
    pub const ALL: [TaskType; 6] = [
        TaskType::PlantSeeds,
        TaskType::ObserveSprouts,
        TaskType::BeginHardeningOff,
        TaskType::PlantSeedlings,
        TaskType::BeginStratification,
        TaskType::GardenTask,
    ];

    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskType::PlantSeeds => "plant_seeds",
            TaskType::ObserveSprouts => "observe_sprouts",
            TaskType::BeginHardeningOff => "begin_hardening_off",
            TaskType::PlantSeedlings => "plant_seedlings",
            TaskType::BeginStratification => "begin_stratification",
            TaskType::GardenTask => "garden_task",
        }
    }

    /// Human readable label.
    pub fn display_name(&self) -> &'static str {
        match self {
            TaskType::PlantSeeds => "Plant seeds",
            TaskType::ObserveSprouts => "Check for sprouts",
            TaskType::BeginHardeningOff => "Begin hardening off",
            TaskType::PlantSeedlings => "Plant seedlings",
            TaskType::BeginStratification => "Begin fridge stratification",
            TaskType::GardenTask => "Garden task",
        }
    }

    /// Returns true for the kinds the schedule generator owns.
    pub fn is_generated(&self) -> bool {
        matches!(
            self,
            TaskType::PlantSeeds
                | TaskType::ObserveSprouts
                | TaskType::BeginHardeningOff
                | TaskType::PlantSeedlings
        )
    }
}

impl FromStr for TaskType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', ' '], "_");
        TaskType::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| format!("Invalid task type: {s}"))
    }
}
