//! Parameter structures for Almanac operations
//!
//! This module contains shared parameter structures used by every interface
//! (CLI, MCP) to call the [`crate::Scheduler`]. They carry raw user input:
//! dates are ISO `YYYY-MM-DD` strings, enums are strings and offsets are
//! [`OffsetInput`] triples. Parsing and validation happen in the core so that
//! every surface reports the same errors.
//!
//! ## Parameter Wrapper Pattern
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   CLI Args      │    │   MCP Params    │    │  Core Params    │
//! │  (clap derives) │───▶│ (serde derives) │───▶│ (minimal deps)  │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! Interface layers wrap these structs with their own derives and convert
//! into them via `From`. JSON schema generation is only compiled with the
//! `schema` feature.

use jiff::civil::Date;
#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    error::{AlmanacError, Result},
    models::{NewTask, OffsetDays, OffsetInput, PlantConfig, TaskType, TaskUpdate},
};

/// Parses an ISO `YYYY-MM-DD` calendar date, ignoring surrounding whitespace.
///
/// ```rust
/// use almanac_core::params::parse_date;
///
/// assert_eq!(parse_date(" 2026-05-15 ")?, jiff::civil::date(2026, 5, 15));
/// assert!(parse_date("15/05/2026").is_err());
/// # Ok::<(), almanac_core::AlmanacError>(())
/// ```
pub fn parse_date(input: &str) -> Result<Date> {
    input
        .trim()
        .parse::<Date>()
        .map_err(|source| AlmanacError::DateParse {
            input: input.to_string(),
            source,
        })
}

/// Blank strings become `None`, everything else is trimmed.
pub(crate) fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Generic parameters for operations requiring just an ID.
///
/// Used for show_plant, regenerate_tasks, mute/unmute, and the task
/// lifecycle transitions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Id {
    /// The ID of the resource to operate on
    pub id: u64,
}

/// Parameters for creating a plant.
///
/// All fields are raw input and are checked by
/// [`crate::validation::validate_plant`] before anything is written.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct CreatePlant {
    /// Common name of the plant (required)
    pub name: String,
    /// Cultivar or variety
    pub variety: Option<String>,
    /// 'indoor_start', 'direct_sow', 'outdoor_start' or 'fridge_stratify'
    pub sowing_method: String,
    /// When to plant seeds relative to the last frost (required)
    pub seed_start: Option<OffsetInput>,
    /// When to begin hardening off (indoor starts only)
    pub hardening: Option<OffsetInput>,
    /// When to transplant seedlings (required unless direct sowing)
    pub transplant: Option<OffsetInput>,
    /// Days until sprouts appear, e.g. '7-14'
    pub days_to_sprout: Option<String>,
    /// Sowing depth: a fraction like '1/4', '0' or 'surface sow'
    pub seed_depth: Option<String>,
    /// Spacing between plants, e.g. '12 inches'
    pub plant_spacing: Option<String>,
    /// Free-form notes
    pub notes: Option<String>,
}

impl From<&PlantConfig> for CreatePlant {
    fn from(config: &PlantConfig) -> Self {
        Self {
            name: config.name.clone(),
            variety: config.variety.clone(),
            sowing_method: config.sowing_method.as_str().to_string(),
            seed_start: config.seed_start_offset_days.map(OffsetDays::to_input),
            hardening: config.hardening_offset_days.map(OffsetDays::to_input),
            transplant: config.transplant_offset_days.map(OffsetDays::to_input),
            days_to_sprout: config.days_to_sprout.clone(),
            seed_depth: config.seed_depth.clone(),
            plant_spacing: config.plant_spacing.clone(),
            notes: config.notes.clone(),
        }
    }
}

/// Parameters for updating a plant.
///
/// Omitted fields keep their stored value. A blank string clears an optional
/// text field and an offset with a blank magnitude clears that offset. The
/// merged configuration is revalidated and the plant's tasks regenerated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct UpdatePlant {
    /// Plant ID to update (required)
    pub id: u64,
    pub name: Option<String>,
    pub variety: Option<String>,
    pub sowing_method: Option<String>,
    pub seed_start: Option<OffsetInput>,
    pub hardening: Option<OffsetInput>,
    pub transplant: Option<OffsetInput>,
    pub days_to_sprout: Option<String>,
    pub seed_depth: Option<String>,
    pub plant_spacing: Option<String>,
    pub notes: Option<String>,
}

impl UpdatePlant {
    /// Overlays the provided fields on a stored configuration.
    pub fn merge_into(&self, current: &PlantConfig) -> CreatePlant {
        let base = CreatePlant::from(current);
        CreatePlant {
            name: self.name.clone().unwrap_or(base.name),
            variety: self.variety.clone().or(base.variety),
            sowing_method: self.sowing_method.clone().unwrap_or(base.sowing_method),
            seed_start: self.seed_start.clone().or(base.seed_start),
            hardening: self.hardening.clone().or(base.hardening),
            transplant: self.transplant.clone().or(base.transplant),
            days_to_sprout: self.days_to_sprout.clone().or(base.days_to_sprout),
            seed_depth: self.seed_depth.clone().or(base.seed_depth),
            plant_spacing: self.plant_spacing.clone().or(base.plant_spacing),
            notes: self.notes.clone().or(base.notes),
        }
    }

    /// Returns true when no field besides the ID was provided.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.variety.is_none()
            && self.sowing_method.is_none()
            && self.seed_start.is_none()
            && self.hardening.is_none()
            && self.transplant.is_none()
            && self.days_to_sprout.is_none()
            && self.seed_depth.is_none()
            && self.plant_spacing.is_none()
            && self.notes.is_none()
    }
}

/// Parameters for deleting a plant and its tasks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct DeletePlant {
    /// The ID of the plant to delete
    pub id: u64,
    /// Must be true; deletion also removes every task of the plant
    #[serde(default)]
    pub confirmed: bool,
}

/// Parameters for listing plants.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ListPlants {
    /// Whether to include muted plants
    #[serde(default)]
    pub include_muted: bool,
}

/// Parameters for querying the task calendar.
///
/// Without a range and without `all`, tasks due more than seven days ago are
/// hidden.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ListTasks {
    /// Earliest due date to include (YYYY-MM-DD, inclusive)
    pub from: Option<String>,
    /// Latest due date to include (YYYY-MM-DD, inclusive)
    pub to: Option<String>,
    /// Hide tasks due more than this many days before today
    pub history_days: Option<u32>,
    /// Show every task regardless of age
    #[serde(default)]
    pub all: bool,
    /// Only tasks of this plant
    pub plant_id: Option<u64>,
    /// Only tasks with this status ('pending', 'done' or 'skipped')
    pub status: Option<String>,
    /// Include tasks of muted plants
    #[serde(default)]
    pub include_muted: bool,
}

/// Parameters for changing the last frost date.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct SetFrostDate {
    /// New last frost date (YYYY-MM-DD)
    pub date: String,
}

/// Parameters for adding a general garden task that belongs to no plant.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct CreateTask {
    /// Due date (YYYY-MM-DD)
    pub due_date: String,
    /// Optional last day of the task window (YYYY-MM-DD)
    pub end_date: Option<String>,
    /// What needs doing
    pub notes: Option<String>,
}

impl CreateTask {
    /// Parses dates and checks the window.
    pub fn validate(&self) -> Result<NewTask> {
        let due_date = parse_date(&self.due_date)?;
        let end_date = non_blank(self.end_date.as_deref())
            .map(|d| parse_date(&d))
            .transpose()?;
        check_window(due_date, end_date)?;

        Ok(NewTask {
            task_type: TaskType::GardenTask,
            due_date,
            end_date,
            notes: non_blank(self.notes.as_deref()),
        })
    }
}

/// Parameters for manually overriding a task.
///
/// Overrides of generated tasks last until the plant's next regeneration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct UpdateTask {
    /// Task ID to update (required)
    pub id: u64,
    /// New due date (YYYY-MM-DD)
    pub due_date: Option<String>,
    /// New end date (YYYY-MM-DD); blank clears it
    pub end_date: Option<String>,
    /// New notes; blank clears them
    pub notes: Option<String>,
    /// New task type
    pub task_type: Option<String>,
}

impl UpdateTask {
    /// Parses every provided field.
    ///
    /// The end-after-due rule is checked once the stored task is known.
    pub fn validate(&self) -> Result<TaskUpdate> {
        let task_type = self
            .task_type
            .as_deref()
            .map(|t| {
                t.parse::<TaskType>()
                    .map_err(|e| AlmanacError::invalid_input("task_type").with_reason(e))
            })
            .transpose()?;
        let due_date = self.due_date.as_deref().map(parse_date).transpose()?;
        let end_date = self
            .end_date
            .as_deref()
            .map(|d| non_blank(Some(d)).map(|d| parse_date(&d)).transpose())
            .transpose()?;
        let notes = self.notes.as_deref().map(|n| non_blank(Some(n)));

        let update = TaskUpdate {
            task_type,
            due_date,
            end_date,
            notes,
        };
        if update.is_empty() {
            return Err(AlmanacError::invalid_input("id")
                .with_reason("Nothing to update; provide at least one field"));
        }
        Ok(update)
    }
}

/// Parameters for writing a journal entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct CreateEntry {
    /// Date of the entry (YYYY-MM-DD); defaults to today
    pub entry_date: Option<String>,
    /// Entry text (required)
    pub body: String,
}

impl CreateEntry {
    pub fn validate(&self, today: Date) -> Result<(Date, String)> {
        let entry_date = non_blank(self.entry_date.as_deref())
            .map(|d| parse_date(&d))
            .transpose()?
            .unwrap_or(today);
        let body = non_blank(Some(&self.body)).ok_or_else(|| {
            AlmanacError::invalid_input("body").with_reason("Journal entry cannot be blank")
        })?;
        Ok((entry_date, body))
    }
}

/// Parameters for listing journal entries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ListEntries {
    /// Show at most this many entries, newest first
    pub limit: Option<u32>,
}

/// Parameters for editing a journal entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct UpdateEntry {
    /// Entry ID to update (required)
    pub id: u64,
    /// New date (YYYY-MM-DD)
    pub entry_date: Option<String>,
    /// New text
    pub body: Option<String>,
}

impl UpdateEntry {
    pub fn validate(&self) -> Result<(Option<Date>, Option<String>)> {
        let entry_date = self.entry_date.as_deref().map(parse_date).transpose()?;
        let body = match self.body.as_deref() {
            Some(body) => Some(non_blank(Some(body)).ok_or_else(|| {
                AlmanacError::invalid_input("body").with_reason("Journal entry cannot be blank")
            })?),
            None => None,
        };
        Ok((entry_date, body))
    }
}

pub(crate) fn check_window(due_date: Date, end_date: Option<Date>) -> Result<()> {
    match end_date {
        Some(end) if end < due_date => Err(AlmanacError::invalid_input("end_date")
            .with_reason(format!("End date {end} is before due date {due_date}"))),
        _ => Ok(()),
    }
}
