//! Per-owner key/value settings.

use jiff::{Timestamp, civil::Date};
use rusqlite::{Connection, OptionalExtension, params};

use crate::{
    error::{DatabaseResultExt, Result},
    models::frost::FROST_DATE_KEY,
    params::parse_date,
};

const SELECT_SETTING_SQL: &str = "SELECT value FROM settings WHERE owner = ?1 AND key = ?2";
const UPSERT_SETTING_SQL: &str = "INSERT INTO settings (owner, key, value, updated_at) VALUES (?1, ?2, ?3, ?4) ON CONFLICT(owner, key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at";

impl super::Database {
    pub fn get_setting(&self, owner: &str, key: &str) -> Result<Option<String>> {
        Self::select_setting(&self.connection, owner, key)
    }

    /// Inserts or overwrites a setting.
    pub fn set_setting(&mut self, owner: &str, key: &str, value: &str) -> Result<()> {
        Self::upsert_setting(&self.connection, owner, key, value)
    }

    fn select_setting(conn: &Connection, owner: &str, key: &str) -> Result<Option<String>> {
        conn.query_row(SELECT_SETTING_SQL, params![owner, key], |row| row.get(0))
            .optional()
            .db_context("Failed to query setting")
    }

    fn upsert_setting(conn: &Connection, owner: &str, key: &str, value: &str) -> Result<()> {
        conn.execute(
            UPSERT_SETTING_SQL,
            params![owner, key, value, Timestamp::now().to_string()],
        )
        .db_context("Failed to store setting")?;
        Ok(())
    }

    /// The owner's stored frost date, if one was ever set.
    pub fn get_frost_date(&self, owner: &str) -> Result<Option<Date>> {
        Self::select_frost_date(&self.connection, owner)
    }

    pub fn set_frost_date(&mut self, owner: &str, date: Date) -> Result<()> {
        Self::upsert_frost_date(&self.connection, owner, date)
    }

    pub(crate) fn select_frost_date(conn: &Connection, owner: &str) -> Result<Option<Date>> {
        Self::select_setting(conn, owner, FROST_DATE_KEY)?
            .as_deref()
            .map(parse_date)
            .transpose()
    }

    pub(crate) fn upsert_frost_date(conn: &Connection, owner: &str, date: Date) -> Result<()> {
        Self::upsert_setting(conn, owner, FROST_DATE_KEY, &date.to_string())
    }
}
