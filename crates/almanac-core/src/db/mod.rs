//! Database operations and SQLite management for plants, tasks and settings.
//!
//! This module provides the low-level storage layer of the Almanac
//! scheduler. It owns the SQLite connection and the schema, and exposes one
//! query module per table. Every query is scoped to an owner.

use std::{path::Path, time::Duration};

use rusqlite::{Connection, Transaction, TransactionBehavior};

use crate::error::{DatabaseResultExt, Result};

pub mod journal_queries;
pub mod migrations;
pub mod plant_queries;
mod rows;
pub mod settings_queries;
pub mod task_queries;

const BUSY_TIMEOUT: Duration = Duration::from_millis(5000);

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Creates a new database connection and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;
        connection
            .busy_timeout(BUSY_TIMEOUT)
            .db_context("Failed to set busy timeout")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }

    pub(crate) fn connection(&self) -> &Connection {
        &self.connection
    }

    /// Runs `op` inside one `IMMEDIATE` transaction.
    ///
    /// The write lock is taken before `op` reads anything, so reads and
    /// writes inside it see no interleaved writer. Commits when `op`
    /// succeeds and rolls back otherwise.
    pub(crate) fn immediate<T>(
        &mut self,
        op: impl FnOnce(&mut Transaction<'_>) -> Result<T>,
    ) -> Result<T> {
        let mut tx = self
            .connection
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .db_context("Failed to begin transaction")?;

        let value = op(&mut tx)?;
        tx.commit().db_context("Failed to commit transaction")?;
        Ok(value)
    }
}
