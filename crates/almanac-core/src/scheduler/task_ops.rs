//! Task calendar and lifecycle operations for the Scheduler.

use super::Scheduler;
use crate::{
    error::{AlmanacError, Result},
    models::{ScheduledTask, Task, TaskFilter, TaskStatus},
    params::{CreateTask, Id, ListTasks, UpdateTask},
};

impl Scheduler {
    /// Queries the calendar, ordered by due date then ID.
    ///
    /// Without a range and without `all`, tasks due more than seven days
    /// before today are left out. Tasks of muted plants are hidden unless
    /// `include_muted` is set.
    pub async fn list_tasks(&self, params: &ListTasks) -> Result<Vec<ScheduledTask>> {
        let filter = TaskFilter::from_params(params, Self::today())?;
        self.list_tasks_filtered(filter).await
    }

    /// Queries the calendar with a prepared filter.
    pub async fn list_tasks_filtered(&self, filter: TaskFilter) -> Result<Vec<ScheduledTask>> {
        self.run(move |db, ctx| db.list_tasks(&ctx.owner, &filter))
            .await
    }

    /// Retrieves a single task.
    pub async fn get_task(&self, params: &Id) -> Result<Option<Task>> {
        let task_id = params.id;
        self.run(move |db, ctx| db.get_task(task_id, &ctx.owner))
            .await
    }

    pub async fn mark_task_done(&self, params: &Id) -> Result<Task> {
        self.set_task_status(params.id, TaskStatus::Done).await
    }

    pub async fn mark_task_skipped(&self, params: &Id) -> Result<Task> {
        self.set_task_status(params.id, TaskStatus::Skipped).await
    }

    /// Puts a task back to pending.
    pub async fn reset_task(&self, params: &Id) -> Result<Task> {
        self.set_task_status(params.id, TaskStatus::Pending).await
    }

    /// Writes the status directly; any status may follow any other.
    async fn set_task_status(&self, task_id: u64, status: TaskStatus) -> Result<Task> {
        self.run(move |db, ctx| {
            let task = db.set_task_status(task_id, &ctx.owner, status)?;
            log::debug!("Task {task_id} is now {}", status.as_str());
            Ok(task)
        })
        .await
    }

    /// Adds a general garden task that belongs to no plant.
    ///
    /// General tasks are never touched by regeneration.
    pub async fn add_task(&self, params: &CreateTask) -> Result<Task> {
        let new_task = params.validate()?;
        self.run(move |db, ctx| db.add_general_task(&ctx.owner, &new_task))
            .await
    }

    /// Manually overrides a task's dates, notes or type.
    ///
    /// Changes to generated tasks last until the plant is regenerated.
    pub async fn update_task(&self, params: &UpdateTask) -> Result<Task> {
        let update = params.validate()?;
        let task_id = params.id;
        self.run(move |db, ctx| db.update_task(task_id, &ctx.owner, &update))
            .await
    }

    /// Deletes a task and returns what was removed.
    pub async fn delete_task(&self, params: &Id) -> Result<Task> {
        let task_id = params.id;
        self.run(move |db, ctx| {
            let task = db
                .get_task(task_id, &ctx.owner)?
                .ok_or(AlmanacError::TaskNotFound { id: task_id })?;
            db.delete_task(task_id, &ctx.owner)?;
            Ok(task)
        })
        .await
    }
}
