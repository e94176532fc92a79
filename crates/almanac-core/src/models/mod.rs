//! Data models for plants, tasks and the frost date.
//!
//! This module contains the domain types of the Almanac garden scheduler.
//! Display implementations for these models live in
//! [`crate::display::models`], keeping data structures apart from
//! presentation.
//!
//! # Offsets
//!
//! Every scheduled date is the owner's frost date shifted by an
//! [`OffsetDays`]. A plant carries up to three of them (seed start,
//! hardening off, transplant); an absent offset means the matching task is
//! simply not generated.
//!
//! # Examples
//!
//! ```rust
//! use almanac_core::models::{OffsetDays, SowingMethod, TaskType};
//!
//! assert_eq!(OffsetDays(-42).to_string(), "6 weeks before frost");
//! assert!(SowingMethod::IndoorStart.hardens_off());
//! assert_eq!(TaskType::ObserveSprouts.display_name(), "Check for sprouts");
//! ```

pub mod filters;
pub mod frost;
pub mod journal;
pub mod offset;
pub mod plant;
pub mod sowing;
pub mod sprout;
pub mod status;
pub mod task;


pub use filters::{HISTORY_DAYS, TaskFilter};
pub use frost::{DEFAULT_FROST_DATE, FrostDate, FrostDateUpdate, PlantFailure};
pub use journal::JournalEntry;
pub use offset::{OffsetDays, OffsetDirection, OffsetInput, OffsetUnit, format_offset, to_days};
pub use plant::{Plant, PlantConfig, PlantSchedule};
pub use sowing::SowingMethod;
pub use sprout::SproutWindow;
pub use status::{TaskStatus, TaskType};
pub use task::{NewTask, ScheduledTask, Task, TaskUpdate};
