//! High-level scheduler API for plants, tasks and the frost date.
//!
//! [`Scheduler`] is the boundary every interface talks to. It is scoped to a
//! single owner: every plant, task, setting and journal entry it reads or
//! writes belongs to that owner, so changing one owner's frost date can never
//! touch another owner's calendar.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   Scheduler     │    │     Engine      │    │    Database     │
//! │ (plant_ops,     │───▶│ (validation,    │───▶│   (via db/)     │
//! │  task_ops, ...) │    │  generate)      │    │                 │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! Each operation runs on the blocking thread pool with its own connection.
//!
//! # Usage
//!
//! ```rust,no_run
//! use almanac_core::{SchedulerBuilder, params::{CreatePlant, SetFrostDate}};
//! use almanac_core::models::{OffsetDirection, OffsetInput, OffsetUnit};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let scheduler = SchedulerBuilder::new()
//!     .with_database_path(Some("garden.db"))
//!     .with_owner("alex")
//!     .build()
//!     .await?;
//!
//! let schedule = scheduler
//!     .create_plant(&CreatePlant {
//!         name: "Tomato".to_string(),
//!         sowing_method: "indoor_start".to_string(),
//!         seed_start: Some(OffsetInput::new(6, OffsetUnit::Weeks, OffsetDirection::Before)),
//!         transplant: Some(OffsetInput::new(1, OffsetUnit::Weeks, OffsetDirection::After)),
//!         ..Default::default()
//!     })
//!     .await?;
//! println!("{} tasks scheduled", schedule.tasks.len());
//!
//! let update = scheduler
//!     .set_frost_date(&SetFrostDate { date: "2026-05-01".to_string() })
//!     .await?;
//! println!("{} plants rescheduled", update.regenerated.len());
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;

use jiff::{Zoned, civil::Date};
use rusqlite::Connection;
use tokio::task;

use crate::{
    db::Database,
    error::{AlmanacError, Result},
    models::FrostDate,
};

pub mod builder;
pub mod frost_ops;
pub mod journal_ops;
pub mod plant_ops;
pub mod task_ops;

#[cfg(test)]
mod tests;

pub use builder::SchedulerBuilder;

/// Main scheduler interface, bound to one owner.
#[derive(Debug, Clone)]
pub struct Scheduler {
    pub(crate) db_path: PathBuf,
    pub(crate) owner: String,
    pub(crate) default_frost_date: Date,
}

impl Scheduler {
    pub(crate) fn new(db_path: PathBuf, owner: String, default_frost_date: Date) -> Self {
        Self {
            db_path,
            owner,
            default_frost_date,
        }
    }

    /// Owner scope of this scheduler.
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Path of the SQLite database file.
    pub fn database_path(&self) -> &std::path::Path {
        &self.db_path
    }

    /// Today's date in the system time zone.
    pub fn today() -> Date {
        Zoned::now().date()
    }

    /// Runs `op` against a fresh connection on the blocking pool.
    pub(crate) async fn run<T, F>(&self, op: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Database, &Context) -> Result<T> + Send + 'static,
    {
        let db_path = self.db_path.clone();
        let context = Context {
            owner: self.owner.clone(),
            default_frost_date: self.default_frost_date,
        };

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            op(&mut db, &context)
        })
        .await
        .map_err(|e| AlmanacError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }
}

/// Owner settings handed to every blocking operation.
pub(crate) struct Context {
    pub(crate) owner: String,
    pub(crate) default_frost_date: Date,
}

impl Context {
    /// The stored frost date, or the configured default.
    ///
    /// Writers pass their open transaction so the date they generate from is
    /// the date they commit against.
    pub(crate) fn frost_date(&self, conn: &Connection) -> Result<FrostDate> {
        Ok(match Database::select_frost_date(conn, &self.owner)? {
            Some(date) => FrostDate {
                date,
                explicit: true,
            },
            None => FrostDate {
                date: self.default_frost_date,
                explicit: false,
            },
        })
    }
}
