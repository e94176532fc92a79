//! Task CRUD operations, regeneration and calendar queries.

use jiff::Timestamp;
use rusqlite::{Connection, OptionalExtension, Row, params};

use super::rows::{id_column, parse_column, parse_optional_column};
use crate::{
    error::{AlmanacError, DatabaseResultExt, Result},
    models::{NewTask, ScheduledTask, Task, TaskFilter, TaskStatus, TaskUpdate},
    params::check_window,
};

const TASK_COLUMNS: &str =
    "t.id, t.owner, t.plant_id, t.task_type, t.due_date, t.end_date, t.status, t.notes, t.created_at, t.updated_at";
const INSERT_TASK_SQL: &str = "INSERT INTO tasks (owner, plant_id, task_type, due_date, end_date, status, notes, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)";
const CHECK_PLANT_EXISTS_SQL: &str =
    "SELECT EXISTS(SELECT 1 FROM plants WHERE id = ?1 AND owner = ?2)";
const DELETE_PLANT_TASKS_SQL: &str = "DELETE FROM tasks WHERE plant_id = ?1";
const UPDATE_TASK_STATUS_SQL: &str =
    "UPDATE tasks SET status = ?1, updated_at = ?2 WHERE id = ?3 AND owner = ?4";
const UPDATE_TASK_SQL: &str = "UPDATE tasks SET task_type = ?1, due_date = ?2, end_date = ?3, notes = ?4, updated_at = ?5 WHERE id = ?6 AND owner = ?7";
const DELETE_TASK_SQL: &str = "DELETE FROM tasks WHERE id = ?1 AND owner = ?2";

impl super::Database {
    /// Helper function to construct a Task from a database row
    fn build_task_from_row(row: &Row) -> rusqlite::Result<Task> {
        Ok(Task {
            id: id_column(row, 0)?,
            owner: row.get(1)?,
            plant_id: row.get::<_, Option<i64>>(2)?.map(|id| id as u64),
            task_type: parse_column(row, 3)?,
            due_date: parse_column(row, 4)?,
            end_date: parse_optional_column(row, 5)?,
            status: parse_column(row, 6)?,
            notes: row.get(7)?,
            created_at: parse_column(row, 8)?,
            updated_at: parse_column(row, 9)?,
        })
    }

    fn build_scheduled_task_from_row(row: &Row) -> rusqlite::Result<ScheduledTask> {
        Ok(ScheduledTask {
            task: Self::build_task_from_row(row)?,
            plant_name: row.get(10)?,
            plant_variety: row.get(11)?,
        })
    }

    /// Inserts tasks as pending. Runs inside the caller's transaction.
    pub(super) fn insert_tasks(
        conn: &Connection,
        owner: &str,
        plant_id: Option<u64>,
        tasks: &[NewTask],
        now: &str,
    ) -> Result<()> {
        let mut stmt = conn
            .prepare_cached(INSERT_TASK_SQL)
            .db_context("Failed to prepare task insert")?;

        for task in tasks {
            stmt.execute(params![
                owner,
                plant_id.map(|id| id as i64),
                task.task_type.as_str(),
                task.due_date.to_string(),
                task.end_date.map(|d| d.to_string()),
                TaskStatus::Pending.as_str(),
                task.notes.as_deref(),
                now,
                now
            ])
            .db_context("Failed to insert task")?;
        }
        Ok(())
    }

    pub(super) fn delete_plant_tasks(conn: &Connection, plant_id: u64) -> Result<usize> {
        conn.execute(DELETE_PLANT_TASKS_SQL, params![plant_id as i64])
            .db_context("Failed to delete plant tasks")
    }

    /// Replaces every task of a plant with `tasks`.
    ///
    /// Delete and insert share one immediate transaction, so a failed insert
    /// leaves the previous task set untouched. Tasks that belong to no plant
    /// are never affected.
    pub fn replace_generated_tasks(
        &mut self,
        plant_id: u64,
        owner: &str,
        tasks: &[NewTask],
    ) -> Result<Vec<Task>> {
        self.immediate(|tx| {
            Self::replace_plant_tasks(tx, plant_id, owner, tasks)?;
            Self::select_plant_tasks(tx, plant_id)
        })
    }

    /// Deletes a plant's tasks and inserts `tasks` in their place. Runs
    /// inside the caller's transaction.
    pub(crate) fn replace_plant_tasks(
        conn: &Connection,
        plant_id: u64,
        owner: &str,
        tasks: &[NewTask],
    ) -> Result<()> {
        let plant_exists: bool = conn
            .query_row(
                CHECK_PLANT_EXISTS_SQL,
                params![plant_id as i64, owner],
                |row| row.get(0),
            )
            .db_context("Failed to check plant existence")?;

        if !plant_exists {
            return Err(AlmanacError::PlantNotFound { id: plant_id });
        }

        let removed = Self::delete_plant_tasks(conn, plant_id)?;
        Self::insert_tasks(conn, owner, Some(plant_id), tasks, &Timestamp::now().to_string())?;

        log::debug!(
            "Replaced {removed} tasks of plant {plant_id} with {}",
            tasks.len()
        );
        Ok(())
    }

    /// All tasks of a plant, by due date.
    pub fn tasks_for_plant(&self, plant_id: u64) -> Result<Vec<Task>> {
        Self::select_plant_tasks(&self.connection, plant_id)
    }

    pub(crate) fn select_plant_tasks(conn: &Connection, plant_id: u64) -> Result<Vec<Task>> {
        let mut stmt = conn
            .prepare(&format!(
                "SELECT {TASK_COLUMNS} FROM tasks t WHERE t.plant_id = ?1 ORDER BY t.due_date, t.id"
            ))
            .db_context("Failed to prepare query")?;

        let tasks = stmt
            .query_map(params![plant_id as i64], Self::build_task_from_row)
            .db_context("Failed to query tasks")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read task row")?;

        Ok(tasks)
    }

    /// Retrieves a task by its ID.
    pub fn get_task(&self, id: u64, owner: &str) -> Result<Option<Task>> {
        Self::select_task(&self.connection, id, owner)
    }

    fn select_task(conn: &Connection, id: u64, owner: &str) -> Result<Option<Task>> {
        conn.query_row(
            &format!("SELECT {TASK_COLUMNS} FROM tasks t WHERE t.id = ?1 AND t.owner = ?2"),
            params![id as i64, owner],
            Self::build_task_from_row,
        )
        .optional()
        .db_context("Failed to query task")
    }

    /// Calendar query joined with plant names.
    pub fn list_tasks(&self, owner: &str, filter: &TaskFilter) -> Result<Vec<ScheduledTask>> {
        let mut query = format!(
            "SELECT {TASK_COLUMNS}, p.name, p.variety FROM tasks t LEFT JOIN plants p ON p.id = t.plant_id"
        );

        let mut conditions = vec!["t.owner = ?"];
        let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = vec![Box::new(owner.to_string())];

        if let Some(from) = filter.from {
            conditions.push("t.due_date >= ?");
            params_vec.push(Box::new(from.to_string()));
        }

        if let Some(to) = filter.to {
            conditions.push("t.due_date <= ?");
            params_vec.push(Box::new(to.to_string()));
        }

        if let Some(since) = filter.since {
            conditions.push("t.due_date >= ?");
            params_vec.push(Box::new(since.to_string()));
        }

        if let Some(plant_id) = filter.plant_id {
            conditions.push("t.plant_id = ?");
            params_vec.push(Box::new(plant_id as i64));
        }

        if let Some(status) = filter.status {
            conditions.push("t.status = ?");
            params_vec.push(Box::new(status.as_str()));
        }

        if !filter.include_muted {
            conditions.push("p.muted_at IS NULL");
        }

        query.push_str(" WHERE ");
        query.push_str(&conditions.join(" AND "));
        query.push_str(" ORDER BY t.due_date, t.id");

        let mut stmt = self
            .connection
            .prepare(&query)
            .db_context("Failed to prepare query")?;

        let params_refs: Vec<&dyn rusqlite::ToSql> = params_vec.iter().map(|b| &**b).collect();

        let tasks = stmt
            .query_map(&params_refs[..], Self::build_scheduled_task_from_row)
            .db_context("Failed to query tasks")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read task row")?;

        Ok(tasks)
    }

    /// Writes a task's status.
    pub fn set_task_status(&mut self, id: u64, owner: &str, status: TaskStatus) -> Result<Task> {
        let updated = self
            .connection
            .execute(
                UPDATE_TASK_STATUS_SQL,
                params![status.as_str(), Timestamp::now().to_string(), id as i64, owner],
            )
            .db_context("Failed to update task status")?;

        if updated == 0 {
            return Err(AlmanacError::TaskNotFound { id });
        }

        self.get_task(id, owner)?
            .ok_or(AlmanacError::TaskNotFound { id })
    }

    /// Adds a task that belongs to no plant.
    pub fn add_general_task(&mut self, owner: &str, task: &NewTask) -> Result<Task> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let now = Timestamp::now();
        Self::insert_tasks(&tx, owner, None, std::slice::from_ref(task), &now.to_string())?;
        let id = tx.last_insert_rowid() as u64;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(Task {
            id,
            owner: owner.to_string(),
            plant_id: None,
            task_type: task.task_type,
            due_date: task.due_date,
            end_date: task.end_date,
            status: TaskStatus::Pending,
            notes: task.notes.clone(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Applies a manual override to a task.
    pub fn update_task(&mut self, id: u64, owner: &str, update: &TaskUpdate) -> Result<Task> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let mut task =
            Self::select_task(&tx, id, owner)?.ok_or(AlmanacError::TaskNotFound { id })?;

        if let Some(task_type) = update.task_type {
            task.task_type = task_type;
        }
        if let Some(due_date) = update.due_date {
            task.due_date = due_date;
        }
        if let Some(end_date) = update.end_date {
            task.end_date = end_date;
        }
        if let Some(notes) = &update.notes {
            task.notes.clone_from(notes);
        }
        check_window(task.due_date, task.end_date)?;

        task.updated_at = Timestamp::now();

        tx.execute(
            UPDATE_TASK_SQL,
            params![
                task.task_type.as_str(),
                task.due_date.to_string(),
                task.end_date.map(|d| d.to_string()),
                task.notes.as_deref(),
                task.updated_at.to_string(),
                id as i64,
                owner
            ],
        )
        .db_context("Failed to update task")?;

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(task)
    }

    /// Deletes a single task.
    pub fn delete_task(&mut self, id: u64, owner: &str) -> Result<()> {
        let deleted = self
            .connection
            .execute(DELETE_TASK_SQL, params![id as i64, owner])
            .db_context("Failed to delete task")?;

        if deleted == 0 {
            return Err(AlmanacError::TaskNotFound { id });
        }
        Ok(())
    }
}
