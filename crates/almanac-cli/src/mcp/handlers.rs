//! MCP tool handlers implementation

use std::sync::Arc;

use almanac_core::{
    Scheduler,
    display::{
        CreateResult, DeleteResult, JournalEntries, OperationStatus, Plants, ScheduledTasks,
        UpdateResult,
    },
    params as core,
};
use log::debug;
use rmcp::{
    ErrorData,
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content},
};
use schemars::JsonSchema;
use serde::Deserialize;
use tokio::sync::Mutex;

use super::errors::{not_found, to_mcp_error};

/// Generic MCP wrapper for core parameter types
///
/// Passes deserialization and the JSON schema straight through to the
/// wrapped core type, so the tool schema matches `almanac_core::params`.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct McpParams<T>(T)
where
    T: JsonSchema;

impl<T> JsonSchema for McpParams<T>
where
    T: JsonSchema,
{
    fn schema_name() -> std::borrow::Cow<'static, str> {
        T::schema_name()
    }

    fn json_schema(g: &mut schemars::SchemaGenerator) -> schemars::Schema {
        T::json_schema(g)
    }
}

impl<T> AsRef<T> for McpParams<T>
where
    T: JsonSchema,
{
    fn as_ref(&self) -> &T {
        &self.0
    }
}

// Type aliases for cleaner usage in function signatures
pub type Id = McpParams<core::Id>;
pub type CreatePlant = McpParams<core::CreatePlant>;
pub type UpdatePlant = McpParams<core::UpdatePlant>;
pub type DeletePlant = McpParams<core::DeletePlant>;
pub type ListPlants = McpParams<core::ListPlants>;
pub type SetFrostDate = McpParams<core::SetFrostDate>;
pub type ListTasks = McpParams<core::ListTasks>;
pub type CreateTask = McpParams<core::CreateTask>;
pub type UpdateTask = McpParams<core::UpdateTask>;
pub type CreateEntry = McpParams<core::CreateEntry>;
pub type ListEntries = McpParams<core::ListEntries>;
pub type UpdateEntry = McpParams<core::UpdateEntry>;

pub type McpResult = Result<CallToolResult, ErrorData>;

fn text(body: impl ToString) -> McpResult {
    Ok(CallToolResult::success(vec![Content::text(
        body.to_string(),
    )]))
}

/// Handler implementations for the MCP server
pub struct McpHandlers {
    scheduler: Arc<Mutex<Scheduler>>,
}

impl McpHandlers {
    pub fn new(scheduler: Arc<Mutex<Scheduler>>) -> Self {
        Self { scheduler }
    }

    // ------------------------------------------------------------------
    // Plants
    // ------------------------------------------------------------------

    pub async fn add_plant(&self, Parameters(params): Parameters<CreatePlant>) -> McpResult {
        debug!("add_plant: {params:?}");

        let schedule = self
            .scheduler
            .lock()
            .await
            .create_plant(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to add plant", &e))?;

        text(CreateResult::new(schedule))
    }

    pub async fn list_plants(&self, Parameters(params): Parameters<ListPlants>) -> McpResult {
        debug!("list_plants: {params:?}");

        let scheduler = self.scheduler.lock().await;
        let plants = scheduler
            .list_plants(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to list plants", &e))?;

        let title = if params.as_ref().include_muted {
            "All Plants"
        } else {
            "Active Plants"
        };
        text(format!("# {title}\n\n{}", Plants(plants)))
    }

    pub async fn show_plant(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("show_plant: {params:?}");

        let id = params.as_ref().id;
        let schedule = self
            .scheduler
            .lock()
            .await
            .get_plant(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to get plant", &e))?
            .ok_or_else(|| not_found("Plant", id))?;

        text(schedule)
    }

    pub async fn update_plant(&self, Parameters(params): Parameters<UpdatePlant>) -> McpResult {
        debug!("update_plant: {params:?}");

        let schedule = self
            .scheduler
            .lock()
            .await
            .update_plant(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to update plant", &e))?;

        text(UpdateResult::with_changes(
            schedule,
            vec!["Tasks rescheduled; manual task edits were replaced".to_string()],
        ))
    }

    pub async fn regenerate_tasks(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("regenerate_tasks: {params:?}");

        let schedule = self
            .scheduler
            .lock()
            .await
            .regenerate_tasks(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to reschedule plant", &e))?;

        let changes = vec![format!("Rescheduled {} tasks", schedule.tasks.len())];
        text(UpdateResult::with_changes(schedule, changes))
    }

    pub async fn mute_plant(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("mute_plant: {params:?}");

        let plant = self
            .scheduler
            .lock()
            .await
            .mute_plant(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to mute plant", &e))?;

        text(OperationStatus::success(format!(
            "Muted plant '{}' (ID: {}). Use 'unmute_plant' to show its tasks again.",
            plant.config.label(),
            plant.id
        )))
    }

    pub async fn unmute_plant(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("unmute_plant: {params:?}");

        let plant = self
            .scheduler
            .lock()
            .await
            .unmute_plant(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to unmute plant", &e))?;

        text(OperationStatus::success(format!(
            "Unmuted plant '{}' (ID: {})",
            plant.config.label(),
            plant.id
        )))
    }

    pub async fn delete_plant(&self, Parameters(params): Parameters<DeletePlant>) -> McpResult {
        debug!("delete_plant: {params:?}");

        let plant = self
            .scheduler
            .lock()
            .await
            .delete_plant(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to delete plant", &e))?;

        text(DeleteResult::new(plant))
    }

    // ------------------------------------------------------------------
    // Frost date
    // ------------------------------------------------------------------

    pub async fn get_frost_date(&self) -> McpResult {
        debug!("get_frost_date");

        let frost = self
            .scheduler
            .lock()
            .await
            .frost_date()
            .await
            .map_err(|e| to_mcp_error("Failed to read frost date", &e))?;

        text(frost)
    }

    pub async fn set_frost_date(&self, Parameters(params): Parameters<SetFrostDate>) -> McpResult {
        debug!("set_frost_date: {params:?}");

        let update = self
            .scheduler
            .lock()
            .await
            .set_frost_date(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to set frost date", &e))?;

        text(update)
    }

    // ------------------------------------------------------------------
    // Tasks
    // ------------------------------------------------------------------

    pub async fn list_tasks(&self, Parameters(params): Parameters<ListTasks>) -> McpResult {
        debug!("list_tasks: {params:?}");

        let rows = self
            .scheduler
            .lock()
            .await
            .list_tasks(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to list tasks", &e))?;

        let calendar = ScheduledTasks::new(rows, Scheduler::today());
        text(format!("# Tasks\n\n{calendar}"))
    }

    pub async fn show_task(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("show_task: {params:?}");

        let id = params.as_ref().id;
        let task = self
            .scheduler
            .lock()
            .await
            .get_task(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to get task", &e))?
            .ok_or_else(|| not_found("Task", id))?;

        text(task)
    }

    pub async fn complete_task(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("complete_task: {params:?}");

        let task = self
            .scheduler
            .lock()
            .await
            .mark_task_done(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to complete task", &e))?;

        text(OperationStatus::success(format!(
            "Marked task {} ({}) as done",
            task.id, task.task_type
        )))
    }

    pub async fn skip_task(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("skip_task: {params:?}");

        let task = self
            .scheduler
            .lock()
            .await
            .mark_task_skipped(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to skip task", &e))?;

        text(OperationStatus::success(format!(
            "Marked task {} ({}) as skipped",
            task.id, task.task_type
        )))
    }

    pub async fn reset_task(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("reset_task: {params:?}");

        let task = self
            .scheduler
            .lock()
            .await
            .reset_task(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to reset task", &e))?;

        text(OperationStatus::success(format!(
            "Task {} ({}) is pending again",
            task.id, task.task_type
        )))
    }

    pub async fn add_task(&self, Parameters(params): Parameters<CreateTask>) -> McpResult {
        debug!("add_task: {params:?}");

        let task = self
            .scheduler
            .lock()
            .await
            .add_task(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to add task", &e))?;

        text(CreateResult::new(task))
    }

    pub async fn update_task(&self, Parameters(params): Parameters<UpdateTask>) -> McpResult {
        debug!("update_task: {params:?}");

        let task = self
            .scheduler
            .lock()
            .await
            .update_task(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to update task", &e))?;

        text(UpdateResult::new(task))
    }

    pub async fn delete_task(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("delete_task: {params:?}");

        let task = self
            .scheduler
            .lock()
            .await
            .delete_task(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to delete task", &e))?;

        text(DeleteResult::new(task))
    }

    // ------------------------------------------------------------------
    // Journal
    // ------------------------------------------------------------------

    pub async fn add_journal_entry(&self, Parameters(params): Parameters<CreateEntry>) -> McpResult {
        debug!("add_journal_entry: {params:?}");

        let entry = self
            .scheduler
            .lock()
            .await
            .add_entry(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to add journal entry", &e))?;

        text(CreateResult::new(entry))
    }

    pub async fn list_journal_entries(
        &self,
        Parameters(params): Parameters<ListEntries>,
    ) -> McpResult {
        debug!("list_journal_entries: {params:?}");

        let entries = self
            .scheduler
            .lock()
            .await
            .list_entries(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to list journal entries", &e))?;

        text(format!("# Journal\n\n{}", JournalEntries(entries)))
    }

    pub async fn update_journal_entry(
        &self,
        Parameters(params): Parameters<UpdateEntry>,
    ) -> McpResult {
        debug!("update_journal_entry: {params:?}");

        let entry = self
            .scheduler
            .lock()
            .await
            .update_entry(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to update journal entry", &e))?;

        text(UpdateResult::new(entry))
    }

    pub async fn delete_journal_entry(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("delete_journal_entry: {params:?}");

        let entry = self
            .scheduler
            .lock()
            .await
            .delete_entry(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to delete journal entry", &e))?;

        text(DeleteResult::new(entry))
    }
}
