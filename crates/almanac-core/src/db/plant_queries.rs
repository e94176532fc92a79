//! Plant CRUD operations and queries.

use jiff::Timestamp;
use rusqlite::{Connection, OptionalExtension, Row, params};

use super::rows::{id_column, parse_column, parse_optional_column};
use crate::{
    error::{AlmanacError, DatabaseResultExt, Result},
    models::{NewTask, OffsetDays, Plant, PlantConfig},
};

const PLANT_COLUMNS: &str = "id, owner, name, variety, sowing_method, seed_start_offset_days, hardening_offset_days, transplant_offset_days, days_to_sprout, seed_depth, plant_spacing, notes, muted_at, created_at, updated_at";
const INSERT_PLANT_SQL: &str = "INSERT INTO plants (owner, name, variety, sowing_method, seed_start_offset_days, hardening_offset_days, transplant_offset_days, days_to_sprout, seed_depth, plant_spacing, notes, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)";
const UPDATE_PLANT_SQL: &str = "UPDATE plants SET name = ?1, variety = ?2, sowing_method = ?3, seed_start_offset_days = ?4, hardening_offset_days = ?5, transplant_offset_days = ?6, days_to_sprout = ?7, seed_depth = ?8, plant_spacing = ?9, notes = ?10, updated_at = ?11 WHERE id = ?12 AND owner = ?13";
const UPDATE_PLANT_MUTED_SQL: &str =
    "UPDATE plants SET muted_at = ?1, updated_at = ?2 WHERE id = ?3 AND owner = ?4";
const DELETE_PLANT_SQL: &str = "DELETE FROM plants WHERE id = ?1 AND owner = ?2";

impl super::Database {
    /// Helper function to construct a Plant from a database row
    fn build_plant_from_row(row: &Row) -> rusqlite::Result<Plant> {
        let offset = |idx: usize| -> rusqlite::Result<Option<OffsetDays>> {
            Ok(row.get::<_, Option<i32>>(idx)?.map(OffsetDays))
        };

        Ok(Plant {
            id: id_column(row, 0)?,
            owner: row.get(1)?,
            config: PlantConfig {
                name: row.get(2)?,
                variety: row.get(3)?,
                sowing_method: parse_column(row, 4)?,
                seed_start_offset_days: offset(5)?,
                hardening_offset_days: offset(6)?,
                transplant_offset_days: offset(7)?,
                days_to_sprout: row.get(8)?,
                seed_depth: row.get(9)?,
                plant_spacing: row.get(10)?,
                notes: row.get(11)?,
            },
            muted_at: parse_optional_column(row, 12)?,
            created_at: parse_column(row, 13)?,
            updated_at: parse_column(row, 14)?,
        })
    }

    /// Inserts a plant and its generated tasks in one transaction.
    pub fn insert_plant_with_tasks(
        &mut self,
        owner: &str,
        config: &PlantConfig,
        tasks: &[NewTask],
    ) -> Result<Plant> {
        self.immediate(|tx| Self::insert_plant(tx, owner, config, tasks))
    }

    /// Inserts a plant and its tasks. Runs inside the caller's transaction.
    pub(crate) fn insert_plant(
        conn: &Connection,
        owner: &str,
        config: &PlantConfig,
        tasks: &[NewTask],
    ) -> Result<Plant> {
        let now = Timestamp::now();
        let now_str = now.to_string();

        conn.execute(
            INSERT_PLANT_SQL,
            params![
                owner,
                &config.name,
                config.variety.as_deref(),
                config.sowing_method.as_str(),
                config.seed_start_offset_days.map(OffsetDays::days),
                config.hardening_offset_days.map(OffsetDays::days),
                config.transplant_offset_days.map(OffsetDays::days),
                config.days_to_sprout.as_deref(),
                config.seed_depth.as_deref(),
                config.plant_spacing.as_deref(),
                config.notes.as_deref(),
                &now_str,
                &now_str
            ],
        )
        .db_context("Failed to insert plant")?;

        let id = conn.last_insert_rowid() as u64;

        Self::insert_tasks(conn, owner, Some(id), tasks, &now_str)?;

        Ok(Plant {
            id,
            owner: owner.to_string(),
            config: config.clone(),
            muted_at: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Stores a new configuration and replaces the plant's generated tasks,
    /// all in one transaction.
    pub fn update_plant_with_tasks(
        &mut self,
        id: u64,
        owner: &str,
        config: &PlantConfig,
        tasks: &[NewTask],
    ) -> Result<()> {
        self.immediate(|tx| Self::update_plant(tx, id, owner, config, tasks))
    }

    /// Stores a new configuration and replaces the plant's tasks. Runs
    /// inside the caller's transaction.
    pub(crate) fn update_plant(
        conn: &Connection,
        id: u64,
        owner: &str,
        config: &PlantConfig,
        tasks: &[NewTask],
    ) -> Result<()> {
        let now_str = Timestamp::now().to_string();

        let updated = conn
            .execute(
                UPDATE_PLANT_SQL,
                params![
                    &config.name,
                    config.variety.as_deref(),
                    config.sowing_method.as_str(),
                    config.seed_start_offset_days.map(OffsetDays::days),
                    config.hardening_offset_days.map(OffsetDays::days),
                    config.transplant_offset_days.map(OffsetDays::days),
                    config.days_to_sprout.as_deref(),
                    config.seed_depth.as_deref(),
                    config.plant_spacing.as_deref(),
                    config.notes.as_deref(),
                    &now_str,
                    id as i64,
                    owner
                ],
            )
            .db_context("Failed to update plant")?;

        if updated == 0 {
            return Err(AlmanacError::PlantNotFound { id });
        }

        Self::delete_plant_tasks(conn, id)?;
        Self::insert_tasks(conn, owner, Some(id), tasks, &now_str)?;
        Ok(())
    }

    /// Retrieves a plant by its ID.
    pub fn get_plant(&self, id: u64, owner: &str) -> Result<Option<Plant>> {
        Self::select_plant(&self.connection, id, owner)
    }

    pub(crate) fn select_plant(conn: &Connection, id: u64, owner: &str) -> Result<Option<Plant>> {
        conn.query_row(
            &format!("SELECT {PLANT_COLUMNS} FROM plants WHERE id = ?1 AND owner = ?2"),
            params![id as i64, owner],
            Self::build_plant_from_row,
        )
        .optional()
        .db_context("Failed to query plant")
    }

    /// Lists an owner's plants by name.
    pub fn list_plants(&self, owner: &str, include_muted: bool) -> Result<Vec<Plant>> {
        Self::select_plants(&self.connection, owner, include_muted)
    }

    pub(crate) fn select_plants(
        conn: &Connection,
        owner: &str,
        include_muted: bool,
    ) -> Result<Vec<Plant>> {
        let mut query = format!("SELECT {PLANT_COLUMNS} FROM plants WHERE owner = ?1");
        if !include_muted {
            query.push_str(" AND muted_at IS NULL");
        }
        query.push_str(" ORDER BY name COLLATE NOCASE, id");

        let mut stmt = conn
            .prepare(&query)
            .db_context("Failed to prepare query")?;

        let plants = stmt
            .query_map(params![owner], Self::build_plant_from_row)
            .db_context("Failed to query plants")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read plant row")?;

        Ok(plants)
    }

    /// Sets or clears a plant's muted timestamp.
    pub fn set_plant_muted(
        &mut self,
        id: u64,
        owner: &str,
        muted_at: Option<Timestamp>,
    ) -> Result<()> {
        let updated = self
            .connection
            .execute(
                UPDATE_PLANT_MUTED_SQL,
                params![
                    muted_at.map(|t| t.to_string()),
                    Timestamp::now().to_string(),
                    id as i64,
                    owner
                ],
            )
            .db_context("Failed to update plant")?;

        if updated == 0 {
            return Err(AlmanacError::PlantNotFound { id });
        }
        Ok(())
    }

    /// Deletes a plant. Its tasks go with it through the foreign key cascade.
    pub fn delete_plant(&mut self, id: u64, owner: &str) -> Result<()> {
        let deleted = self
            .connection
            .execute(DELETE_PLANT_SQL, params![id as i64, owner])
            .db_context("Failed to delete plant")?;

        if deleted == 0 {
            return Err(AlmanacError::PlantNotFound { id });
        }
        Ok(())
    }
}
