//! Core library for the Almanac garden scheduler.
//!
//! Almanac turns a per-plant sowing plan, expressed as offsets from the
//! owner's last spring frost date, into a calendar of dated tasks. Moving the
//! frost date reschedules every plant; manual task edits are overwritten the
//! next time a plant's schedule is regenerated.
//!
//! # Architecture
//!
//! - **Models** ([`models`]): plants, tasks, offsets, journal entries
//! - **Validation** ([`validation`]): turns raw plant input into a
//!   [`models::PlantConfig`], collecting every problem at once
//! - **Engine** ([`engine`]): pure task generation from a config and a frost
//!   date
//! - **Persistence** ([`db`]): SQLite storage with transactional schedule
//!   replacement
//! - **Scheduler** ([`scheduler`]): the async, owner-scoped API the CLI and
//!   MCP server call
//! - **Display** ([`display`]): markdown formatting for every result
//!
//! # Quick Start
//!
//! ```rust
//! use almanac_core::{SchedulerBuilder, params::{CreatePlant, ListTasks}};
//! use almanac_core::models::{OffsetDirection, OffsetInput, OffsetUnit};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let scheduler = SchedulerBuilder::new()
//!     .with_database_path(Some("test.db"))
//!     .build()
//!     .await?;
//!
//! let schedule = scheduler
//!     .create_plant(&CreatePlant {
//!         name: "Carrot".to_string(),
//!         sowing_method: "direct_sow".to_string(),
//!         seed_start: Some(OffsetInput::new(2, OffsetUnit::Weeks, OffsetDirection::Before)),
//!         days_to_sprout: Some("14-21".to_string()),
//!         ..Default::default()
//!     })
//!     .await?;
//! println!("{schedule}");
//!
//! for row in scheduler.list_tasks(&ListTasks::default()).await? {
//!     println!("{} {}", row.task.due_date, row.subject());
//! }
//! # Ok(())
//! # }
//! ```

pub mod db;
pub mod display;
pub mod engine;
pub mod error;
pub mod models;
pub mod params;
pub mod scheduler;
pub mod validation;

// Re-export commonly used types
pub use db::Database;
pub use display::{
    CreateResult, DeleteResult, JournalEntries, OperationStatus, Plants, ScheduledTasks,
    UpdateResult,
};
pub use error::{AlmanacError, Result};
pub use models::{
    FrostDate, FrostDateUpdate, JournalEntry, OffsetDays, Plant, PlantConfig, PlantSchedule,
    ScheduledTask, SowingMethod, Task, TaskFilter, TaskStatus, TaskType,
};
pub use params::{
    CreateEntry, CreatePlant, CreateTask, DeletePlant, Id, ListEntries, ListPlants, ListTasks,
    SetFrostDate, UpdateEntry, UpdatePlant, UpdateTask,
};
pub use scheduler::{Scheduler, SchedulerBuilder};
