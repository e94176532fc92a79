//! Task model definition and related functionality.

use jiff::{Timestamp, civil::Date};
use serde::{Deserialize, Serialize};

use super::{TaskStatus, TaskType};

/// A dated garden task.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    /// Unique identifier for the task
    pub id: u64,

    /// Owner scope the task belongs to
    pub owner: String,

    /// Owning plant; `None` for general garden tasks
    pub plant_id: Option<u64>,

    /// Kind of task
    pub task_type: TaskType,

    /// Date the task falls due
    pub due_date: Date,

    /// Last day of a windowed task, never before `due_date`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<Date>,

    /// Current status of the task
    pub status: TaskStatus,

    /// Short description shown on the calendar
    pub notes: Option<String>,

    /// Timestamp when the task was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the task was last updated (UTC)
    pub updated_at: Timestamp,
}

impl Task {
    /// A pending task whose due date is already behind `today`.
    pub fn is_overdue(&self, today: Date) -> bool {
        self.status == TaskStatus::Pending && self.due_date < today
    }
}

/// A task about to be inserted. Always stored as pending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub task_type: TaskType,
    pub due_date: Date,
    pub end_date: Option<Date>,
    pub notes: Option<String>,
}

/// Validated manual override of a task. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskUpdate {
    pub task_type: Option<TaskType>,
    pub due_date: Option<Date>,
    /// `Some(None)` clears the end date
    pub end_date: Option<Option<Date>>,
    /// `Some(None)` clears the notes
    pub notes: Option<Option<String>>,
}

impl TaskUpdate {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Task row joined with the name and variety of its plant.
///
/// Serializes flat, which is the calendar JSON projection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScheduledTask {
    #[serde(flatten)]
    pub task: Task,

    pub plant_name: Option<String>,

    pub plant_variety: Option<String>,
}

impl ScheduledTask {
    /// Plant label for the row, or the task's display name for general tasks.
    pub fn subject(&self) -> String {
        match (&self.plant_name, &self.plant_variety) {
            (Some(name), Some(variety)) => format!("{name} ({variety})"),
            (Some(name), None) => name.clone(),
            (None, _) => self.task.task_type.display_name().to_string(),
        }
    }
}
