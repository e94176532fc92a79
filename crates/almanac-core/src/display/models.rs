//! Display implementations for domain models.
//!
//! All output is markdown so the CLI can render it in the terminal and the
//! MCP server can return it verbatim.

use std::fmt;

use super::datetime::{CalendarDate, DateSpan, LocalDateTime};
use crate::{
    models::{
        FrostDate, FrostDateUpdate, JournalEntry, OffsetDays, Plant, PlantSchedule, ScheduledTask,
        SowingMethod, Task, TaskStatus, TaskType,
    },
    validation::{HARDENING_LABEL, SEED_START_LABEL, TRANSPLANT_LABEL},
};

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl fmt::Display for SowingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

fn write_offset(f: &mut fmt::Formatter<'_>, label: &str, offset: Option<OffsetDays>) -> fmt::Result {
    match offset {
        Some(offset) => writeln!(f, "- {label}: {offset}"),
        None => Ok(()),
    }
}

impl fmt::Display for Plant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let config = &self.config;
        writeln!(f, "# {}. {}", self.id, config.label())?;
        writeln!(f)?;

        writeln!(f, "- Sowing method: {}", config.sowing_method)?;
        write_offset(f, SEED_START_LABEL, config.seed_start_offset_days)?;
        if config.sowing_method.hardens_off() {
            write_offset(f, HARDENING_LABEL, config.hardening_offset_days)?;
        }
        if config.sowing_method.transplants() {
            write_offset(f, TRANSPLANT_LABEL, config.transplant_offset_days)?;
        }
        if let Some(days) = &config.days_to_sprout {
            writeln!(f, "- Days to sprout: {days}")?;
        }
        if let Some(depth) = &config.seed_depth {
            writeln!(f, "- Seed depth: {depth}")?;
        }
        if let Some(spacing) = &config.plant_spacing {
            writeln!(f, "- Plant spacing: {spacing}")?;
        }
        if let Some(muted_at) = &self.muted_at {
            writeln!(f, "- Muted: {}", LocalDateTime(muted_at))?;
        }
        writeln!(f, "- Created: {}", LocalDateTime(&self.created_at))?;
        writeln!(f, "- Updated: {}", LocalDateTime(&self.updated_at))?;

        if let Some(notes) = &config.notes {
            writeln!(f)?;
            writeln!(f, "{notes}")?;
        }

        Ok(())
    }
}

impl fmt::Display for PlantSchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.plant)?;

        if self.tasks.is_empty() {
            writeln!(f, "\nNo tasks scheduled for this plant.")?;
        } else {
            writeln!(f, "\n## Tasks")?;
            writeln!(f)?;
            for task in &self.tasks {
                write!(f, "{task}")?;
            }
        }

        Ok(())
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "- **{}** {} ({}",
            DateSpan(&self.due_date, self.end_date.as_ref()),
            self.task_type,
            self.status.with_icon()
        )?;
        writeln!(f, ", ID: {})", self.id)?;

        if let Some(notes) = &self.notes {
            writeln!(f, "  {notes}")?;
        }

        Ok(())
    }
}

impl fmt::Display for ScheduledTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let task = &self.task;
        writeln!(
            f,
            "### {}. {}: {} ({})",
            task.id,
            task.task_type,
            self.subject(),
            task.status.with_icon()
        )?;
        writeln!(f)?;
        writeln!(
            f,
            "- Due: {}",
            DateSpan(&task.due_date, task.end_date.as_ref())
        )?;
        if let Some(plant_id) = task.plant_id {
            writeln!(f, "- Plant ID: {plant_id}")?;
        }
        if let Some(notes) = &task.notes {
            writeln!(f, "- Notes: {notes}")?;
        }
        writeln!(f)?;

        Ok(())
    }
}

impl fmt::Display for JournalEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "## {} (ID: {})",
            CalendarDate(&self.entry_date),
            self.id
        )?;
        writeln!(f)?;
        writeln!(f, "{}", self.body)?;
        writeln!(f)?;
        Ok(())
    }
}

impl fmt::Display for FrostDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Last frost date: {}", CalendarDate(&self.date))?;
        if !self.explicit {
            write!(f, " (default)")?;
        }
        writeln!(f)
    }
}

impl fmt::Display for FrostDateUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Last frost date set to {}",
            CalendarDate(&self.frost_date)
        )?;
        writeln!(f)?;

        match self.regenerated.len() {
            0 => writeln!(f, "No plants needed rescheduling.")?,
            1 => writeln!(f, "Rescheduled tasks for 1 plant.")?,
            n => writeln!(f, "Rescheduled tasks for {n} plants.")?,
        }

        if !self.failed.is_empty() {
            writeln!(f)?;
            writeln!(f, "Could not reschedule:")?;
            for failure in &self.failed {
                writeln!(f, "- Plant {}: {}", failure.plant_id, failure.error)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use jiff::{Timestamp, civil::date};

    use super::*;
    use crate::models::{PlantConfig, PlantFailure};

    fn create_test_plant() -> Plant {
        Plant {
            id: 3,
            owner: "default".to_string(),
            config: PlantConfig {
                name: "Carrot".to_string(),
                variety: Some("Nantes".to_string()),
                sowing_method: SowingMethod::DirectSow,
                seed_start_offset_days: Some(OffsetDays(-14)),
                hardening_offset_days: Some(OffsetDays(-7)),
                transplant_offset_days: None,
                days_to_sprout: Some("14-21".to_string()),
                seed_depth: Some("1/4".to_string()),
                plant_spacing: None,
                notes: Some("Keep the bed moist".to_string()),
            },
            muted_at: None,
            created_at: Timestamp::from_second(1767225600).unwrap(),
            updated_at: Timestamp::from_second(1767225600).unwrap(),
        }
    }

    #[test]
    fn test_plant_display_hides_irrelevant_offsets() {
        let output = create_test_plant().to_string();
        assert!(output.starts_with("# 3. Carrot (Nantes)"));
        assert!(output.contains("- Sowing method: Direct Sow"));
        assert!(output.contains("- Plant seeds: 2 weeks before frost"));
        assert!(!output.contains("hardening"));
        assert!(output.contains("Keep the bed moist"));
    }

    #[test]
    fn test_task_display() {
        let task = Task {
            id: 8,
            owner: "default".to_string(),
            plant_id: Some(3),
            task_type: TaskType::ObserveSprouts,
            due_date: date(2026, 5, 15),
            end_date: Some(date(2026, 5, 22)),
            status: TaskStatus::Pending,
            notes: Some("Carrot (Nantes) seedlings expected to appear".to_string()),
            created_at: Timestamp::from_second(1767225600).unwrap(),
            updated_at: Timestamp::from_second(1767225600).unwrap(),
        };
        let output = task.to_string();
        assert!(output.contains("**2026-05-15 to 2026-05-22** Check for sprouts"));
        assert!(output.contains("○ Pending, ID: 8"));

        let row = ScheduledTask {
            task,
            plant_name: Some("Carrot".to_string()),
            plant_variety: Some("Nantes".to_string()),
        };
        assert!(
            row.to_string()
                .starts_with("### 8. Check for sprouts: Carrot (Nantes) (○ Pending)")
        );
    }

    #[test]
    fn test_frost_date_update_lists_failures() {
        let update = FrostDateUpdate {
            frost_date: date(2026, 5, 1),
            regenerated: vec![1, 2],
            failed: vec![PlantFailure {
                plant_id: 3,
                error: "database is locked".to_string(),
            }],
        };
        let output = update.to_string();
        assert!(output.contains("Rescheduled tasks for 2 plants."));
        assert!(output.contains("- Plant 3: database is locked"));

        let default = FrostDate {
            date: date(2026, 5, 15),
            explicit: false,
        };
        assert_eq!(
            default.to_string(),
            "Last frost date: Fri 2026-05-15 (default)\n"
        );
    }
}
