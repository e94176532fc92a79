//! Command-line subcommands and their handlers.
//!
//! Every subcommand has a clap argument struct that converts into the
//! matching `almanac_core::params` type, so the core never sees clap:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Scheduler → Display → Renderer
//! ```
//!
//! [`Cli`] runs the converted parameters against the scheduler and renders
//! the markdown `Display` output of the result.

use almanac_core::{
    Scheduler,
    display::{
        CreateResult, DeleteResult, JournalEntries, OperationStatus, Plants, ScheduledTasks,
        UpdateResult,
    },
    models::{OffsetInput, ScheduledTask, TaskStatus, TaskType},
    params::*,
};
use anyhow::{Context, Result, bail};
use clap::{Args, Subcommand, ValueEnum};
use jiff::civil::Date;
use serde::Serialize;

use crate::renderer::TerminalRenderer;

// ============================================================================
// Plant arguments
// ============================================================================

/// How a plant gets started
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum SowingMethodArg {
    /// Start indoors, harden off, then transplant
    IndoorStart,
    /// Sow directly in the bed
    DirectSow,
    /// Start outdoors in pots, then transplant
    OutdoorStart,
    /// Cold-stratify in the fridge, then transplant
    FridgeStratify,
}

impl std::fmt::Display for SowingMethodArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SowingMethodArg::IndoorStart => write!(f, "indoor_start"),
            SowingMethodArg::DirectSow => write!(f, "direct_sow"),
            SowingMethodArg::OutdoorStart => write!(f, "outdoor_start"),
            SowingMethodArg::FridgeStratify => write!(f, "fridge_stratify"),
        }
    }
}

/// Record a plant and schedule its tasks
///
/// Offsets are relative to the last frost date and accept phrases such as
/// "6 weeks before", "10 days after frost", "0" or a signed day count like
/// "-42".
#[derive(Args)]
pub struct AddPlantArgs {
    /// Common name of the plant
    pub name: String,
    #[arg(short, long, help = "Cultivar or variety")]
    pub variety: Option<String>,
    #[arg(short, long, value_enum, help = "How the plant gets started")]
    pub method: SowingMethodArg,
    #[arg(
        short,
        long,
        value_name = "OFFSET",
        help = "When to plant seeds, e.g. '6 weeks before'"
    )]
    pub seed_start: Option<OffsetInput>,
    #[arg(
        long,
        value_name = "OFFSET",
        help = "When to begin hardening off (indoor starts only)"
    )]
    pub hardening: Option<OffsetInput>,
    #[arg(
        short,
        long,
        value_name = "OFFSET",
        help = "When to transplant seedlings, e.g. '1 week after'"
    )]
    pub transplant: Option<OffsetInput>,
    #[arg(long, help = "Days until sprouts appear, e.g. '7-14'")]
    pub days_to_sprout: Option<String>,
    #[arg(long, help = "Sowing depth: '1/4', '0' or 'surface sow'")]
    pub seed_depth: Option<String>,
    #[arg(long, help = "Spacing between plants, e.g. '12 inches'")]
    pub spacing: Option<String>,
    #[arg(short, long, help = "Free-form notes")]
    pub notes: Option<String>,
}

impl From<AddPlantArgs> for CreatePlant {
    fn from(val: AddPlantArgs) -> Self {
        CreatePlant {
            name: val.name,
            variety: val.variety,
            sowing_method: val.method.to_string(),
            seed_start: val.seed_start,
            hardening: val.hardening,
            transplant: val.transplant,
            days_to_sprout: val.days_to_sprout,
            seed_depth: val.seed_depth,
            plant_spacing: val.spacing,
            notes: val.notes,
        }
    }
}

/// Change a plant and reschedule its tasks
///
/// Only the given options change. An empty string clears an optional field,
/// e.g. `--hardening ""`. Manual edits to the plant's tasks are replaced by
/// the new schedule.
#[derive(Args)]
pub struct UpdatePlantArgs {
    #[arg(help = "Unique identifier of the plant to update")]
    pub id: u64,
    #[arg(long, help = "New common name")]
    pub name: Option<String>,
    #[arg(short, long, help = "New variety")]
    pub variety: Option<String>,
    #[arg(short, long, value_enum, help = "New sowing method")]
    pub method: Option<SowingMethodArg>,
    #[arg(short, long, value_name = "OFFSET", help = "New seed start offset")]
    pub seed_start: Option<OffsetInput>,
    #[arg(long, value_name = "OFFSET", help = "New hardening offset")]
    pub hardening: Option<OffsetInput>,
    #[arg(short, long, value_name = "OFFSET", help = "New transplant offset")]
    pub transplant: Option<OffsetInput>,
    #[arg(long, help = "New days to sprout")]
    pub days_to_sprout: Option<String>,
    #[arg(long, help = "New seed depth")]
    pub seed_depth: Option<String>,
    #[arg(long, help = "New plant spacing")]
    pub spacing: Option<String>,
    #[arg(short, long, help = "New notes")]
    pub notes: Option<String>,
}

impl From<UpdatePlantArgs> for UpdatePlant {
    fn from(val: UpdatePlantArgs) -> Self {
        UpdatePlant {
            id: val.id,
            name: val.name,
            variety: val.variety,
            sowing_method: val.method.map(|m| m.to_string()),
            seed_start: val.seed_start,
            hardening: val.hardening,
            transplant: val.transplant,
            days_to_sprout: val.days_to_sprout,
            seed_depth: val.seed_depth,
            plant_spacing: val.spacing,
            notes: val.notes,
        }
    }
}

/// List plants
#[derive(Args)]
pub struct ListPlantsArgs {
    #[arg(short, long, help = "Include muted plants")]
    pub all: bool,
}

impl From<ListPlantsArgs> for ListPlants {
    fn from(val: ListPlantsArgs) -> Self {
        ListPlants {
            include_muted: val.all,
        }
    }
}

/// Select a record by ID
#[derive(Args)]
pub struct IdArgs {
    #[arg(help = "Unique identifier")]
    pub id: u64,
}

impl From<IdArgs> for Id {
    fn from(val: IdArgs) -> Self {
        Id { id: val.id }
    }
}

/// Delete a plant and all of its tasks
#[derive(Args)]
pub struct DeletePlantArgs {
    #[arg(help = "Unique identifier of the plant to delete")]
    pub id: u64,
    /// Confirm the deletion (required to prevent accidental deletion)
    #[arg(long)]
    pub confirm: bool,
}

impl From<DeletePlantArgs> for DeletePlant {
    fn from(val: DeletePlantArgs) -> Self {
        DeletePlant {
            id: val.id,
            confirmed: val.confirm,
        }
    }
}

#[derive(Subcommand)]
pub enum PlantCommands {
    /// Record a plant and schedule its tasks
    #[command(aliases = ["a", "create"])]
    Add(AddPlantArgs),
    /// List plants
    #[command(aliases = ["l", "ls"])]
    List(ListPlantsArgs),
    /// Show a plant with its tasks
    #[command(alias = "s")]
    Show(IdArgs),
    /// Change a plant and reschedule its tasks
    #[command(alias = "u")]
    Update(UpdatePlantArgs),
    /// Rebuild a plant's tasks from its configuration
    #[command(alias = "r")]
    Regenerate(IdArgs),
    /// Hide a plant's tasks from the calendar
    Mute(IdArgs),
    /// Show a muted plant's tasks again
    Unmute(IdArgs),
    /// Delete a plant and all of its tasks
    #[command(aliases = ["d", "rm"])]
    Delete(DeletePlantArgs),
}

// ============================================================================
// Task arguments
// ============================================================================

/// Task status filter values
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum TaskStatusArg {
    Pending,
    Done,
    Skipped,
}

impl From<TaskStatusArg> for TaskStatus {
    fn from(val: TaskStatusArg) -> Self {
        match val {
            TaskStatusArg::Pending => TaskStatus::Pending,
            TaskStatusArg::Done => TaskStatus::Done,
            TaskStatusArg::Skipped => TaskStatus::Skipped,
        }
    }
}

/// Show the task calendar
///
/// Without a range, tasks due more than a week ago are hidden; use --all to
/// see the whole history.
#[derive(Args, Default)]
pub struct ListTasksArgs {
    #[arg(long, help = "Earliest due date to show (YYYY-MM-DD)")]
    pub from: Option<String>,
    #[arg(long, help = "Latest due date to show (YYYY-MM-DD)")]
    pub to: Option<String>,
    #[arg(short, long, help = "Hide tasks due more than this many days ago")]
    pub days: Option<u32>,
    #[arg(short, long, help = "Show every task regardless of age")]
    pub all: bool,
    #[arg(short, long, help = "Only tasks of this plant")]
    pub plant: Option<u64>,
    #[arg(short, long, value_enum, help = "Only tasks with this status")]
    pub status: Option<TaskStatusArg>,
    #[arg(long, help = "Include tasks of muted plants")]
    pub include_muted: bool,
    #[arg(long, help = "Print the calendar as JSON")]
    pub json: bool,
}

impl From<&ListTasksArgs> for ListTasks {
    fn from(val: &ListTasksArgs) -> Self {
        ListTasks {
            from: val.from.clone(),
            to: val.to.clone(),
            history_days: val.days,
            all: val.all,
            plant_id: val.plant,
            status: val.status.map(|s| TaskStatus::from(s).as_str().to_string()),
            include_muted: val.include_muted,
        }
    }
}

/// Add a garden task that belongs to no plant
#[derive(Args)]
pub struct AddTaskArgs {
    #[arg(help = "Due date (YYYY-MM-DD)")]
    pub due_date: String,
    #[arg(help = "What needs doing")]
    pub notes: Option<String>,
    #[arg(short, long, help = "Last day of the task window (YYYY-MM-DD)")]
    pub end: Option<String>,
}

impl From<AddTaskArgs> for CreateTask {
    fn from(val: AddTaskArgs) -> Self {
        CreateTask {
            due_date: val.due_date,
            end_date: val.end,
            notes: val.notes,
        }
    }
}

/// Override a task's dates, notes or type
///
/// Changes to a plant's generated tasks last until the plant is next
/// rescheduled. An empty string clears the end date or the notes.
#[derive(Args)]
pub struct UpdateTaskArgs {
    #[arg(help = "Unique identifier of the task to update")]
    pub id: u64,
    #[arg(long, help = "New due date (YYYY-MM-DD)")]
    pub due: Option<String>,
    #[arg(short, long, help = "New end date (YYYY-MM-DD)")]
    pub end: Option<String>,
    #[arg(short, long, help = "New notes")]
    pub notes: Option<String>,
    #[arg(long = "type", help = "New task type, e.g. 'plant_seeds'")]
    pub task_type: Option<String>,
}

impl From<UpdateTaskArgs> for UpdateTask {
    fn from(val: UpdateTaskArgs) -> Self {
        UpdateTask {
            id: val.id,
            due_date: val.due,
            end_date: val.end,
            notes: val.notes,
            task_type: val.task_type,
        }
    }
}

#[derive(Subcommand)]
pub enum TaskCommands {
    /// Show the task calendar
    #[command(aliases = ["l", "ls"])]
    List(ListTasksArgs),
    /// Show a single task
    #[command(alias = "s")]
    Show(IdArgs),
    /// Mark a task as done
    #[command(aliases = ["d", "complete"])]
    Done(IdArgs),
    /// Mark a task as skipped
    Skip(IdArgs),
    /// Put a task back to pending
    Reset(IdArgs),
    /// Add a garden task that belongs to no plant
    #[command(alias = "a")]
    Add(AddTaskArgs),
    /// Override a task's dates, notes or type
    #[command(alias = "u")]
    Update(UpdateTaskArgs),
    /// Delete a task
    #[command(alias = "rm")]
    Delete(IdArgs),
}

// ============================================================================
// Frost date and journal arguments
// ============================================================================

/// Set the last frost date and reschedule every plant
#[derive(Args)]
pub struct SetFrostArgs {
    #[arg(help = "Last spring frost date (YYYY-MM-DD)")]
    pub date: String,
}

impl From<SetFrostArgs> for SetFrostDate {
    fn from(val: SetFrostArgs) -> Self {
        SetFrostDate { date: val.date }
    }
}

#[derive(Subcommand)]
pub enum FrostCommands {
    /// Show the last frost date
    Show,
    /// Set the last frost date and reschedule every plant
    Set(SetFrostArgs),
}

/// Write a journal entry
#[derive(Args)]
pub struct AddEntryArgs {
    #[arg(help = "Entry text")]
    pub body: String,
    #[arg(short, long, help = "Entry date (YYYY-MM-DD), defaults to today")]
    pub date: Option<String>,
}

impl From<AddEntryArgs> for CreateEntry {
    fn from(val: AddEntryArgs) -> Self {
        CreateEntry {
            entry_date: val.date,
            body: val.body,
        }
    }
}

/// List journal entries, newest first
#[derive(Args)]
pub struct ListEntriesArgs {
    #[arg(short, long, help = "Show at most this many entries")]
    pub limit: Option<u32>,
}

impl From<ListEntriesArgs> for ListEntries {
    fn from(val: ListEntriesArgs) -> Self {
        ListEntries { limit: val.limit }
    }
}

/// Edit a journal entry
#[derive(Args)]
pub struct UpdateEntryArgs {
    #[arg(help = "Unique identifier of the entry to edit")]
    pub id: u64,
    #[arg(short, long, help = "New entry date (YYYY-MM-DD)")]
    pub date: Option<String>,
    #[arg(short, long, help = "New entry text")]
    pub body: Option<String>,
}

impl From<UpdateEntryArgs> for UpdateEntry {
    fn from(val: UpdateEntryArgs) -> Self {
        UpdateEntry {
            id: val.id,
            entry_date: val.date,
            body: val.body,
        }
    }
}

#[derive(Subcommand)]
pub enum JournalCommands {
    /// Write a journal entry
    #[command(alias = "a")]
    Add(AddEntryArgs),
    /// List journal entries, newest first
    #[command(aliases = ["l", "ls"])]
    List(ListEntriesArgs),
    /// Edit a journal entry
    #[command(alias = "u")]
    Update(UpdateEntryArgs),
    /// Delete a journal entry
    #[command(alias = "rm")]
    Delete(IdArgs),
}

// ============================================================================
// Handlers
// ============================================================================

/// Calendar row as printed by `task list --json`.
#[derive(Serialize)]
struct TaskRow<'a> {
    id: u64,
    due_date: Date,
    end_date: Option<Date>,
    task_type: TaskType,
    status: TaskStatus,
    notes: Option<&'a str>,
    plant_id: Option<u64>,
    plant_name: Option<&'a str>,
    plant_variety: Option<&'a str>,
}

impl<'a> From<&'a ScheduledTask> for TaskRow<'a> {
    fn from(row: &'a ScheduledTask) -> Self {
        let task = &row.task;
        TaskRow {
            id: task.id,
            due_date: task.due_date,
            end_date: task.end_date,
            task_type: task.task_type,
            status: task.status,
            notes: task.notes.as_deref(),
            plant_id: task.plant_id,
            plant_name: row.plant_name.as_deref(),
            plant_variety: row.plant_variety.as_deref(),
        }
    }
}

/// Runs subcommands against one owner's scheduler.
pub struct Cli {
    scheduler: Scheduler,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(scheduler: Scheduler, renderer: TerminalRenderer) -> Self {
        Self {
            scheduler,
            renderer,
        }
    }

    pub async fn handle_plant_command(&self, command: PlantCommands) -> Result<()> {
        match command {
            PlantCommands::Add(args) => {
                let schedule = self
                    .scheduler
                    .create_plant(&args.into())
                    .await
                    .context("Failed to add plant")?;
                self.renderer
                    .render(&CreateResult::new(schedule).to_string())
            }
            PlantCommands::List(args) => {
                let plants = self
                    .scheduler
                    .list_plants(&args.into())
                    .await
                    .context("Failed to list plants")?;
                self.renderer
                    .render(&format!("# Plants\n\n{}", Plants(plants)))
            }
            PlantCommands::Show(args) => {
                let id = args.id;
                let schedule = self
                    .scheduler
                    .get_plant(&args.into())
                    .await
                    .context("Failed to get plant")?;
                match schedule {
                    Some(schedule) => self.renderer.render(&schedule.to_string()),
                    None => bail!("Plant with ID {id} not found"),
                }
            }
            PlantCommands::Update(args) => {
                let schedule = self
                    .scheduler
                    .update_plant(&args.into())
                    .await
                    .context("Failed to update plant")?;
                self.renderer
                    .render(&UpdateResult::new(schedule).to_string())
            }
            PlantCommands::Regenerate(args) => {
                let schedule = self
                    .scheduler
                    .regenerate_tasks(&args.into())
                    .await
                    .context("Failed to reschedule plant")?;
                let changes = vec![format!("Rescheduled {} tasks", schedule.tasks.len())];
                self.renderer
                    .render(&UpdateResult::with_changes(schedule, changes).to_string())
            }
            PlantCommands::Mute(args) => {
                let plant = self
                    .scheduler
                    .mute_plant(&args.into())
                    .await
                    .context("Failed to mute plant")?;
                let status = OperationStatus::success(format!(
                    "Muted plant '{}' (ID: {}). Its tasks are hidden from the calendar.",
                    plant.config.label(),
                    plant.id
                ));
                self.renderer.render(&status.to_string())
            }
            PlantCommands::Unmute(args) => {
                let plant = self
                    .scheduler
                    .unmute_plant(&args.into())
                    .await
                    .context("Failed to unmute plant")?;
                let status = OperationStatus::success(format!(
                    "Unmuted plant '{}' (ID: {})",
                    plant.config.label(),
                    plant.id
                ));
                self.renderer.render(&status.to_string())
            }
            PlantCommands::Delete(args) => {
                let plant = self
                    .scheduler
                    .delete_plant(&args.into())
                    .await
                    .context("Failed to delete plant")?;
                self.renderer.render(&DeleteResult::new(plant).to_string())
            }
        }
    }

    pub async fn handle_task_command(&self, command: TaskCommands) -> Result<()> {
        match command {
            TaskCommands::List(args) => self.list_tasks(&args, "Tasks").await,
            TaskCommands::Show(args) => {
                let id = args.id;
                let task = self
                    .scheduler
                    .get_task(&args.into())
                    .await
                    .context("Failed to get task")?;
                match task {
                    Some(task) => self.renderer.render(&task.to_string()),
                    None => bail!("Task with ID {id} not found"),
                }
            }
            TaskCommands::Done(args) => {
                let task = self
                    .scheduler
                    .mark_task_done(&args.into())
                    .await
                    .context("Failed to complete task")?;
                self.render_status(&format!("Marked task {} as done", task.id))
            }
            TaskCommands::Skip(args) => {
                let task = self
                    .scheduler
                    .mark_task_skipped(&args.into())
                    .await
                    .context("Failed to skip task")?;
                self.render_status(&format!("Marked task {} as skipped", task.id))
            }
            TaskCommands::Reset(args) => {
                let task = self
                    .scheduler
                    .reset_task(&args.into())
                    .await
                    .context("Failed to reset task")?;
                self.render_status(&format!("Task {} is pending again", task.id))
            }
            TaskCommands::Add(args) => {
                let task = self
                    .scheduler
                    .add_task(&args.into())
                    .await
                    .context("Failed to add task")?;
                self.renderer.render(&CreateResult::new(task).to_string())
            }
            TaskCommands::Update(args) => {
                let task = self
                    .scheduler
                    .update_task(&args.into())
                    .await
                    .context("Failed to update task")?;
                self.renderer.render(&UpdateResult::new(task).to_string())
            }
            TaskCommands::Delete(args) => {
                let task = self
                    .scheduler
                    .delete_task(&args.into())
                    .await
                    .context("Failed to delete task")?;
                self.renderer.render(&DeleteResult::new(task).to_string())
            }
        }
    }

    pub async fn handle_frost_command(&self, command: FrostCommands) -> Result<()> {
        match command {
            FrostCommands::Show => {
                let frost = self
                    .scheduler
                    .frost_date()
                    .await
                    .context("Failed to read frost date")?;
                self.renderer.render(&frost.to_string())
            }
            FrostCommands::Set(args) => {
                let update = self
                    .scheduler
                    .set_frost_date(&args.into())
                    .await
                    .context("Failed to set frost date")?;
                self.renderer.render(&update.to_string())
            }
        }
    }

    pub async fn handle_journal_command(&self, command: JournalCommands) -> Result<()> {
        match command {
            JournalCommands::Add(args) => {
                let entry = self
                    .scheduler
                    .add_entry(&args.into())
                    .await
                    .context("Failed to add journal entry")?;
                self.renderer.render(&CreateResult::new(entry).to_string())
            }
            JournalCommands::List(args) => {
                let entries = self
                    .scheduler
                    .list_entries(&args.into())
                    .await
                    .context("Failed to list journal entries")?;
                self.renderer
                    .render(&format!("# Journal\n\n{}", JournalEntries(entries)))
            }
            JournalCommands::Update(args) => {
                let entry = self
                    .scheduler
                    .update_entry(&args.into())
                    .await
                    .context("Failed to update journal entry")?;
                self.renderer.render(&UpdateResult::new(entry).to_string())
            }
            JournalCommands::Delete(args) => {
                let entry = self
                    .scheduler
                    .delete_entry(&args.into())
                    .await
                    .context("Failed to delete journal entry")?;
                self.renderer.render(&DeleteResult::new(entry).to_string())
            }
        }
    }

    /// Prints the calendar as markdown, or as JSON with `--json`.
    pub async fn list_tasks(&self, args: &ListTasksArgs, title: &str) -> Result<()> {
        let rows = self
            .scheduler
            .list_tasks(&args.into())
            .await
            .context("Failed to list tasks")?;

        if args.json {
            let projection: Vec<TaskRow<'_>> = rows.iter().map(TaskRow::from).collect();
            let json = serde_json::to_string_pretty(&projection)
                .context("Failed to serialize tasks")?;
            println!("{json}");
            return Ok(());
        }

        let calendar = ScheduledTasks::new(rows, Scheduler::today());
        let mut output = format!("# {title}\n\n{calendar}");
        match calendar.overdue_count() {
            0 => {}
            1 => output.push_str("\n1 task is overdue.\n"),
            n => output.push_str(&format!("\n{n} tasks are overdue.\n")),
        }
        self.renderer.render(&output)
    }

    fn render_status(&self, message: &str) -> Result<()> {
        self.renderer
            .render(&OperationStatus::success(message).to_string())
    }
}
