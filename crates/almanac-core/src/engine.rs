//! Task generation engine.
//!
//! [`generate`] turns a validated plant configuration and a frost date into
//! the plant's dated tasks. It is a pure function: the same inputs always
//! produce the same tasks in the same order, and it never reads the clock or
//! the database. Persisting the result is the job of
//! [`crate::Database::replace_generated_tasks`].

use jiff::{Span, civil::Date};

use crate::{
    error::{AlmanacError, Result},
    models::{NewTask, OffsetDays, PlantConfig, SowingMethod, SproutWindow, TaskType},
};

/// Computes the tasks for one plant.
///
/// Rules, in emission order:
///
/// 1. `plant_seeds` on frost + seed start offset.
/// 2. `observe_sprouts` spanning the sprout window after the seed date, when
///    `days_to_sprout` contains a number.
/// 3. `begin_hardening_off` on frost + hardening offset, indoor starts only.
/// 4. `plant_seedlings` on frost + transplant offset, every method except
///    direct sowing.
///
/// A rule whose offset is absent emits nothing.
///
/// # Errors
///
/// [`AlmanacError::InvalidInput`] naming the offending field when a date
/// falls outside the supported calendar range.
///
/// ```rust
/// use almanac_core::{engine::generate, models::*};
/// use jiff::civil::date;
///
/// let config = PlantConfig {
///     name: "Carrot".to_string(),
///     variety: None,
///     sowing_method: SowingMethod::DirectSow,
///     seed_start_offset_days: Some(OffsetDays(-14)),
///     hardening_offset_days: None,
///     transplant_offset_days: None,
///     days_to_sprout: None,
///     seed_depth: None,
///     plant_spacing: None,
///     notes: None,
/// };
/// let tasks = generate(&config, date(2026, 5, 15))?;
/// assert_eq!(tasks.len(), 1);
/// assert_eq!(tasks[0].due_date, date(2026, 5, 1));
/// # Ok::<(), almanac_core::AlmanacError>(())
/// ```
pub fn generate(config: &PlantConfig, frost_date: Date) -> Result<Vec<NewTask>> {
    let mut tasks = Vec::with_capacity(4);

    if let Some(seed_start) = config.seed_start_offset_days {
        let seed_date = shift(frost_date, seed_start, "seed_start_offset_days")?;
        tasks.push(NewTask {
            task_type: TaskType::PlantSeeds,
            due_date: seed_date,
            end_date: None,
            notes: Some(seed_notes(config)),
        });

        let window = config
            .days_to_sprout
            .as_deref()
            .and_then(|text| SproutWindow::parse(text).map(|window| (text, window)));
        if let Some((text, window)) = window {
            tasks.push(NewTask {
                task_type: TaskType::ObserveSprouts,
                due_date: after_sowing(seed_date, window.earliest)?,
                end_date: Some(after_sowing(seed_date, window.latest)?),
                notes: Some(format!(
                    "{} seedlings expected to appear ({text} days after planting)",
                    config.label()
                )),
            });
        }
    }

    if config.sowing_method.hardens_off()
        && let Some(hardening) = config.hardening_offset_days
    {
        tasks.push(NewTask {
            task_type: TaskType::BeginHardeningOff,
            due_date: shift(frost_date, hardening, "hardening_offset_days")?,
            end_date: None,
            notes: Some(format!("Begin hardening off {} seedlings", config.name)),
        });
    }

    if config.sowing_method.transplants()
        && let Some(transplant) = config.transplant_offset_days
    {
        tasks.push(NewTask {
            task_type: TaskType::PlantSeedlings,
            due_date: shift(frost_date, transplant, "transplant_offset_days")?,
            end_date: None,
            notes: Some(format!("Transplant {} seedlings", config.name)),
        });
    }

    Ok(tasks)
}

fn seed_notes(config: &PlantConfig) -> String {
    match config.sowing_method {
        SowingMethod::DirectSow => format!("Plant {} seeds outdoors", config.name),
        SowingMethod::IndoorStart | SowingMethod::OutdoorStart | SowingMethod::FridgeStratify => {
            format!("Sow seeds for {}", config.label())
        }
    }
}

fn shift(date: Date, offset: OffsetDays, field: &str) -> Result<Date> {
    Span::new()
        .try_days(i64::from(offset.days()))
        .and_then(|span| date.checked_add(span))
        .map_err(|e| AlmanacError::invalid_input(field).with_reason(e.to_string()))
}

fn after_sowing(seed_date: Date, days: u32) -> Result<Date> {
    Span::new()
        .try_days(i64::from(days))
        .and_then(|span| seed_date.checked_add(span))
        .map_err(|e| AlmanacError::invalid_input("days_to_sprout").with_reason(e.to_string()))
}
