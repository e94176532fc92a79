//! MCP server implementation for Almanac
//!
//! Exposes the garden scheduler to AI assistants over the Model Context
//! Protocol. Every tool delegates to [`handlers::McpHandlers`], which renders
//! results with the same markdown the CLI prints.

use std::sync::Arc;

use almanac_core::Scheduler;
use anyhow::Result;
use log::{debug, error, info};
use rmcp::{
    ServerHandler,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
};
use tokio::{
    signal::unix::{SignalKind, signal},
    sync::Mutex,
};

pub mod errors;
pub mod handlers;

// Re-export parameter types and result type from handlers for external use
pub use handlers::{
    CreateEntry, CreatePlant, CreateTask, DeletePlant, Id, ListEntries, ListPlants, ListTasks,
    McpResult, SetFrostDate, UpdateEntry, UpdatePlant, UpdateTask,
};

/// MCP server for Almanac
#[derive(Clone)]
pub struct AlmanacMcpServer {
    scheduler: Arc<Mutex<Scheduler>>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl AlmanacMcpServer {
    /// Create a new Almanac MCP server
    pub fn new(scheduler: Scheduler) -> Self {
        Self {
            scheduler: Arc::new(Mutex::new(scheduler)),
            tool_router: Self::tool_router(),
        }
    }

    fn handlers(&self) -> handlers::McpHandlers {
        handlers::McpHandlers::new(self.scheduler.clone())
    }

    #[tool(
        name = "add_plant",
        description = "Record a plant and generate its task schedule. Requires name and sowing_method ('indoor_start', 'direct_sow', 'outdoor_start' or 'fridge_stratify'). Offsets are objects like {\"magnitude\": \"6\", \"unit\": \"weeks\", \"direction\": \"before\"} relative to the last frost date. seed_start is always required, transplant is required unless direct sowing, hardening applies to indoor starts only. Returns the plant ID and the number of tasks scheduled."
    )]
    async fn add_plant(&self, params: Parameters<CreatePlant>) -> McpResult {
        self.handlers().add_plant(params).await
    }

    #[tool(
        name = "list_plants",
        description = "List recorded plants with their sowing method and offsets. Muted plants are hidden unless include_muted=true."
    )]
    async fn list_plants(&self, params: Parameters<ListPlants>) -> McpResult {
        self.handlers().list_plants(params).await
    }

    #[tool(
        name = "show_plant",
        description = "Show one plant with its full configuration and every scheduled task, including status and due dates."
    )]
    async fn show_plant(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().show_plant(params).await
    }

    #[tool(
        name = "update_plant",
        description = "Change a plant's configuration. Only the fields provided are changed; a blank string clears optional text. The plant's tasks are regenerated from the new offsets, which discards manual edits and completion status of its tasks."
    )]
    async fn update_plant(&self, params: Parameters<UpdatePlant>) -> McpResult {
        self.handlers().update_plant(params).await
    }

    #[tool(
        name = "regenerate_tasks",
        description = "Rebuild a plant's tasks from its offsets and the current frost date. Discards manual edits and completion status of that plant's tasks."
    )]
    async fn regenerate_tasks(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().regenerate_tasks(params).await
    }

    #[tool(
        name = "mute_plant",
        description = "Hide a plant's tasks from the calendar without deleting anything. Use unmute_plant to show them again."
    )]
    async fn mute_plant(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().mute_plant(params).await
    }

    #[tool(
        name = "unmute_plant",
        description = "Show a muted plant's tasks on the calendar again."
    )]
    async fn unmute_plant(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().unmute_plant(params).await
    }

    #[tool(
        name = "delete_plant",
        description = "Permanently delete a plant and all of its tasks. Requires confirmed=true. Consider mute_plant if the plant may come back next season."
    )]
    async fn delete_plant(&self, params: Parameters<DeletePlant>) -> McpResult {
        self.handlers().delete_plant(params).await
    }

    #[tool(
        name = "get_frost_date",
        description = "Show the last spring frost date every plant schedule is computed from."
    )]
    async fn get_frost_date(&self) -> McpResult {
        self.handlers().get_frost_date().await
    }

    #[tool(
        name = "set_frost_date",
        description = "Move the last frost date (YYYY-MM-DD). Every plant's tasks are regenerated relative to the new date; general garden tasks are left alone. Reports how many plants were rescheduled and any that failed."
    )]
    async fn set_frost_date(&self, params: Parameters<SetFrostDate>) -> McpResult {
        self.handlers().set_frost_date(params).await
    }

    #[tool(
        name = "list_tasks",
        description = "Show the task calendar grouped by due date, with overdue tasks flagged. Filter with from/to (YYYY-MM-DD), plant_id, status ('pending', 'done', 'skipped') and include_muted. Without a range, tasks due more than history_days (default 7) ago are hidden unless all=true."
    )]
    async fn list_tasks(&self, params: Parameters<ListTasks>) -> McpResult {
        self.handlers().list_tasks(params).await
    }

    #[tool(
        name = "show_task",
        description = "Show one task with its type, dates, status and notes."
    )]
    async fn show_task(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().show_task(params).await
    }

    #[tool(name = "complete_task", description = "Mark a task as done.")]
    async fn complete_task(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().complete_task(params).await
    }

    #[tool(name = "skip_task", description = "Mark a task as skipped.")]
    async fn skip_task(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().skip_task(params).await
    }

    #[tool(
        name = "reset_task",
        description = "Return a done or skipped task to pending."
    )]
    async fn reset_task(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().reset_task(params).await
    }

    #[tool(
        name = "add_task",
        description = "Add a general garden task that belongs to no plant, such as turning compost. Requires due_date (YYYY-MM-DD); end_date and notes are optional. General tasks are never touched by frost date changes."
    )]
    async fn add_task(&self, params: Parameters<CreateTask>) -> McpResult {
        self.handlers().add_task(params).await
    }

    #[tool(
        name = "update_task",
        description = "Edit a task's due_date, end_date, notes or task_type. A blank end_date or notes clears it. Edits to plant tasks are lost when that plant is regenerated."
    )]
    async fn update_task(&self, params: Parameters<UpdateTask>) -> McpResult {
        self.handlers().update_task(params).await
    }

    #[tool(name = "delete_task", description = "Delete a single task.")]
    async fn delete_task(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().delete_task(params).await
    }

    #[tool(
        name = "add_journal_entry",
        description = "Write a dated note in the garden journal. date defaults to today."
    )]
    async fn add_journal_entry(&self, params: Parameters<CreateEntry>) -> McpResult {
        self.handlers().add_journal_entry(params).await
    }

    #[tool(
        name = "list_journal_entries",
        description = "List journal entries, newest first. Use limit to cap the count."
    )]
    async fn list_journal_entries(&self, params: Parameters<ListEntries>) -> McpResult {
        self.handlers().list_journal_entries(params).await
    }

    #[tool(
        name = "update_journal_entry",
        description = "Change the date or body of a journal entry."
    )]
    async fn update_journal_entry(&self, params: Parameters<UpdateEntry>) -> McpResult {
        self.handlers().update_journal_entry(params).await
    }

    #[tool(name = "delete_journal_entry", description = "Delete a journal entry.")]
    async fn delete_journal_entry(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().delete_journal_entry(params).await
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for AlmanacMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "almanac".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Implementation::from_build_env()
            },
            instructions: Some(r#"Almanac schedules garden work relative to the last spring frost date.

## Core Concepts
- **Plants**: a crop with a sowing method and offsets such as "6 weeks before" the last frost
- **Tasks**: dated work generated from those offsets (plant seeds, check for sprouts, begin hardening off, plant seedlings) plus general garden tasks you add by hand
- **Frost date**: the anchor for every plant schedule; moving it reschedules all plants
- **Journal**: dated free-form garden notes

## Workflow Examples

### Planning a Season
1. Check the anchor with `get_frost_date` and adjust it with `set_frost_date`
2. Record each crop with `add_plant`
3. Review the calendar with `list_tasks`

### Working Through the Calendar
1. Use `list_tasks` to see what is due; overdue pending tasks are flagged
2. Use `complete_task` or `skip_task` as work happens, `reset_task` to undo
3. Use `mute_plant` to hide a crop you are not growing this year

## Tool Categories
- **Plants**: add_plant, list_plants, show_plant, update_plant, regenerate_tasks, mute_plant, unmute_plant, delete_plant
- **Frost date**: get_frost_date, set_frost_date
- **Tasks**: list_tasks, show_task, complete_task, skip_task, reset_task, add_task, update_task, delete_task
- **Journal**: add_journal_entry, list_journal_entries, update_journal_entry, delete_journal_entry

Regenerating a plant (directly, through update_plant, or through set_frost_date) replaces its tasks, so manual edits and completion status of that plant's tasks are lost."#.to_string()),
        }
    }
}

/// Run the MCP server with stdio transport
pub async fn run_stdio_server(server: AlmanacMcpServer) -> Result<()> {
    use rmcp::{ServiceExt, transport::stdio};

    info!("Starting Almanac MCP server on stdio");
    debug!(
        "Server created with {} tools",
        server.tool_router.list_all().len()
    );

    let service = server.serve(stdio()).await.inspect_err(|e| {
        error!("serving error: {e:?}");
    })?;

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;

    tokio::select! {
        result = service.waiting() => {
            match result {
                Ok(_) => info!("MCP server stopped normally"),
                Err(e) => error!("MCP server error: {e:?}"),
            }
        }
        _ = sigint.recv() => {
            info!("Received SIGINT, shutting down gracefully...");
        }
        _ = sigterm.recv() => {
            info!("Received SIGTERM, shutting down gracefully...");
        }
    }

    info!("MCP server shutdown complete");
    Ok(())
}
