//! Display formatting wrappers for plants, tasks and operation results.
//!
//! Domain models implement [`std::fmt::Display`] directly (see [`models`]);
//! the wrappers here add context such as "today" for the calendar or the
//! kind of operation that produced a resource. Everything formats as
//! markdown.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Domain Models  │    │  Collections &  │    │   Formatted     │
//! │ (Plant, Task)   │───▶│  Result Types   │───▶│    Output       │
//! │                 │    │                 │    │  (Terminal/MCP) │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`collections`]: Plants, the task calendar, journal entries
//! - [`results`]: CreateResult, UpdateResult, DeleteResult
//! - [`status`]: One-line confirmations (OperationStatus)
//! - [`datetime`]: Timestamp and calendar date formatting
//! - [`models`]: Display implementations for domain models

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;
pub mod status;

pub use collections::{JournalEntries, Plants, ScheduledTasks};
pub use datetime::{CalendarDate, DateSpan, LocalDateTime};
pub use results::{CreateResult, DeleteResult, UpdateResult};
pub use status::OperationStatus;
