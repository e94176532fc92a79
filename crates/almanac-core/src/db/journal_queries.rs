//! Journal entry CRUD operations.

use jiff::{Timestamp, civil::Date};
use rusqlite::{OptionalExtension, Row, params};

use super::rows::{id_column, parse_column};
use crate::{
    error::{AlmanacError, DatabaseResultExt, Result},
    models::JournalEntry,
};

const ENTRY_COLUMNS: &str = "id, owner, entry_date, body, created_at, updated_at";
const INSERT_ENTRY_SQL: &str = "INSERT INTO journal_entries (owner, entry_date, body, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5)";
const UPDATE_ENTRY_SQL: &str = "UPDATE journal_entries SET entry_date = ?1, body = ?2, updated_at = ?3 WHERE id = ?4 AND owner = ?5";
const DELETE_ENTRY_SQL: &str = "DELETE FROM journal_entries WHERE id = ?1 AND owner = ?2";

impl super::Database {
    fn build_entry_from_row(row: &Row) -> rusqlite::Result<JournalEntry> {
        Ok(JournalEntry {
            id: id_column(row, 0)?,
            owner: row.get(1)?,
            entry_date: parse_column(row, 2)?,
            body: row.get(3)?,
            created_at: parse_column(row, 4)?,
            updated_at: parse_column(row, 5)?,
        })
    }

    pub fn add_entry(&mut self, owner: &str, entry_date: Date, body: &str) -> Result<JournalEntry> {
        let now = Timestamp::now();
        let now_str = now.to_string();

        self.connection
            .execute(
                INSERT_ENTRY_SQL,
                params![owner, entry_date.to_string(), body, &now_str, &now_str],
            )
            .db_context("Failed to insert journal entry")?;

        Ok(JournalEntry {
            id: self.connection.last_insert_rowid() as u64,
            owner: owner.to_string(),
            entry_date,
            body: body.to_string(),
            created_at: now,
            updated_at: now,
        })
    }

    pub fn get_entry(&self, id: u64, owner: &str) -> Result<Option<JournalEntry>> {
        self.connection
            .query_row(
                &format!(
                    "SELECT {ENTRY_COLUMNS} FROM journal_entries WHERE id = ?1 AND owner = ?2"
                ),
                params![id as i64, owner],
                Self::build_entry_from_row,
            )
            .optional()
            .db_context("Failed to query journal entry")
    }

    /// Newest entry date first, then newest written.
    pub fn list_entries(&self, owner: &str, limit: Option<u32>) -> Result<Vec<JournalEntry>> {
        let mut query = format!(
            "SELECT {ENTRY_COLUMNS} FROM journal_entries WHERE owner = ?1 ORDER BY entry_date DESC, created_at DESC, id DESC"
        );
        if let Some(limit) = limit {
            query.push_str(&format!(" LIMIT {limit}"));
        }

        let mut stmt = self
            .connection
            .prepare(&query)
            .db_context("Failed to prepare query")?;

        let entries = stmt
            .query_map(params![owner], Self::build_entry_from_row)
            .db_context("Failed to query journal entries")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read journal entry row")?;

        Ok(entries)
    }

    pub fn update_entry(
        &mut self,
        id: u64,
        owner: &str,
        entry_date: Option<Date>,
        body: Option<&str>,
    ) -> Result<JournalEntry> {
        let mut entry = self
            .get_entry(id, owner)?
            .ok_or(AlmanacError::EntryNotFound { id })?;

        if let Some(entry_date) = entry_date {
            entry.entry_date = entry_date;
        }
        if let Some(body) = body {
            entry.body = body.to_string();
        }
        entry.updated_at = Timestamp::now();

        self.connection
            .execute(
                UPDATE_ENTRY_SQL,
                params![
                    entry.entry_date.to_string(),
                    &entry.body,
                    entry.updated_at.to_string(),
                    id as i64,
                    owner
                ],
            )
            .db_context("Failed to update journal entry")?;

        Ok(entry)
    }

    pub fn delete_entry(&mut self, id: u64, owner: &str) -> Result<()> {
        let deleted = self
            .connection
            .execute(DELETE_ENTRY_SQL, params![id as i64, owner])
            .db_context("Failed to delete journal entry")?;

        if deleted == 0 {
            return Err(AlmanacError::EntryNotFound { id });
        }
        Ok(())
    }
}
