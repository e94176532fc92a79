//! Collection wrapper types for displaying groups of domain objects.
//!
//! This module provides wrapper types that format collections of domain objects
//! with consistent structure and empty collection handling.

use std::{fmt, ops::Index};

use jiff::civil::Date;

use super::datetime::{CalendarDate, DateSpan};
use crate::models::{JournalEntry, Plant, ScheduledTask, TaskStatus};

/// Newtype wrapper for displaying a list of plants.
///
/// Each plant is one compact markdown section; muted plants are marked.
///
/// ```rust
/// use almanac_core::display::Plants;
///
/// assert_eq!(Plants(vec![]).to_string(), "No plants found.\n");
/// ```
pub struct Plants(pub Vec<Plant>);

impl Plants {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Plant> {
        self.0.iter()
    }
}

impl Index<usize> for Plants {
    type Output = Plant;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl<'a> IntoIterator for &'a Plants {
    type Item = &'a Plant;
    type IntoIter = std::slice::Iter<'a, Plant>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Plants {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No plants found.");
        }

        for plant in &self.0 {
            let muted = if plant.is_muted() { " (muted)" } else { "" };
            writeln!(
                f,
                "## {} (ID: {}){muted}",
                plant.config.label(),
                plant.id
            )?;
            writeln!(f)?;
            writeln!(f, "- **Sowing method**: {}", plant.config.sowing_method)?;
            if let Some(offset) = plant.config.seed_start_offset_days {
                writeln!(f, "- **Plant seeds**: {offset}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// The task calendar: scheduled tasks grouped under their due dates.
///
/// Pending tasks due before `today` are flagged as overdue.
pub struct ScheduledTasks {
    pub tasks: Vec<ScheduledTask>,
    pub today: Date,
}

impl ScheduledTasks {
    pub fn new(tasks: Vec<ScheduledTask>, today: Date) -> Self {
        Self { tasks, today }
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Number of overdue tasks in the collection.
    pub fn overdue_count(&self) -> usize {
        self.tasks
            .iter()
            .filter(|t| t.task.is_overdue(self.today))
            .count()
    }
}

impl fmt::Display for ScheduledTasks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.tasks.is_empty() {
            return writeln!(f, "No tasks found.");
        }

        let mut current: Option<Date> = None;
        for row in &self.tasks {
            let task = &row.task;
            if current != Some(task.due_date) {
                if current.is_some() {
                    writeln!(f)?;
                }
                let marker = if task.due_date == self.today {
                    " (today)"
                } else {
                    ""
                };
                writeln!(f, "## {}{marker}", CalendarDate(&task.due_date))?;
                writeln!(f)?;
                current = Some(task.due_date);
            }

            let flag = if task.is_overdue(self.today) {
                "**Overdue** "
            } else {
                ""
            };
            let checkbox = match task.status {
                TaskStatus::Pending => "[ ]",
                TaskStatus::Done => "[x]",
                TaskStatus::Skipped => "[-]",
            };
            write!(
                f,
                "- {checkbox} {flag}{}: {}",
                task.task_type,
                row.subject()
            )?;
            if task.end_date.is_some() {
                write!(f, " ({})", DateSpan(&task.due_date, task.end_date.as_ref()))?;
            }
            writeln!(f, " (ID: {})", task.id)?;
            if let Some(notes) = &task.notes {
                writeln!(f, "  {notes}")?;
            }
        }
        Ok(())
    }
}

/// Newtype wrapper for displaying journal entries.
pub struct JournalEntries(pub Vec<JournalEntry>);

impl JournalEntries {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for JournalEntries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No journal entries found.")
        } else {
            for entry in &self.0 {
                write!(f, "{entry}")?;
            }
            Ok(())
        }
    }
}
