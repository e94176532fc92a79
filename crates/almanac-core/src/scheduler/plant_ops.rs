//! Plant operations for the Scheduler.

use jiff::{Timestamp, civil::Date};
use rusqlite::Connection;

use super::Scheduler;
use crate::{
    db::Database,
    engine,
    error::{AlmanacError, Result},
    models::{Plant, PlantSchedule},
    params::{CreatePlant, DeletePlant, Id, ListPlants, UpdatePlant},
    validation::validate_plant,
};

/// Rebuilds one plant's tasks against `frost_date`. Runs inside the
/// caller's transaction.
///
/// Persistence failures are wrapped in [`AlmanacError::Generation`]; the
/// caller rolls back and the plant keeps its previous tasks.
pub(crate) fn regenerate_plant(
    conn: &Connection,
    owner: &str,
    plant_id: u64,
    frost_date: Date,
) -> Result<PlantSchedule> {
    let plant = Database::select_plant(conn, plant_id, owner)?
        .ok_or(AlmanacError::PlantNotFound { id: plant_id })?;

    let new_tasks = engine::generate(&plant.config, frost_date)
        .map_err(|e| AlmanacError::generation(plant_id, e))?;

    Database::replace_plant_tasks(conn, plant_id, owner, &new_tasks).map_err(|e| match e {
        AlmanacError::PlantNotFound { .. } => e,
        other => AlmanacError::generation(plant_id, other),
    })?;

    let tasks = Database::select_plant_tasks(conn, plant_id)?;
    Ok(PlantSchedule { plant, tasks })
}

impl Scheduler {
    /// Validates a new plant, stores it and schedules its tasks against the
    /// owner's current frost date.
    ///
    /// Nothing is written when validation fails. The frost date is read in
    /// the same transaction that stores the tasks.
    pub async fn create_plant(&self, params: &CreatePlant) -> Result<PlantSchedule> {
        let config = validate_plant(params)?;

        self.run(move |db, ctx| {
            let (plant, tasks) = db.immediate(|tx| {
                let frost_date = ctx.frost_date(tx)?;
                let new_tasks = engine::generate(&config, frost_date.date)?;
                let plant = Database::insert_plant(tx, &ctx.owner, &config, &new_tasks)?;
                let tasks = Database::select_plant_tasks(tx, plant.id)?;
                Ok((plant, tasks))
            })?;

            log::info!(
                "Created plant {} '{}' with {} tasks",
                plant.id,
                plant.config.name,
                tasks.len()
            );
            Ok(PlantSchedule { plant, tasks })
        })
        .await
    }

    /// Applies a partial update, revalidates the merged configuration and
    /// rebuilds the plant's tasks in the same transaction.
    pub async fn update_plant(&self, params: &UpdatePlant) -> Result<PlantSchedule> {
        if params.is_empty() {
            return Err(AlmanacError::invalid_input("id")
                .with_reason("Nothing to update; provide at least one field"));
        }
        let params = params.clone();

        self.run(move |db, ctx| {
            db.immediate(|tx| {
                let current = Database::select_plant(tx, params.id, &ctx.owner)?
                    .ok_or(AlmanacError::PlantNotFound { id: params.id })?;

                let config = validate_plant(&params.merge_into(&current.config))?;
                let frost_date = ctx.frost_date(tx)?;
                let new_tasks = engine::generate(&config, frost_date.date)?;
                Database::update_plant(tx, params.id, &ctx.owner, &config, &new_tasks)?;

                let plant = Database::select_plant(tx, params.id, &ctx.owner)?
                    .ok_or(AlmanacError::PlantNotFound { id: params.id })?;
                let tasks = Database::select_plant_tasks(tx, plant.id)?;
                Ok(PlantSchedule { plant, tasks })
            })
        })
        .await
    }

    /// Discards a plant's tasks and generates them again from its stored
    /// configuration. Manual overrides and status changes are lost.
    pub async fn regenerate_tasks(&self, params: &Id) -> Result<PlantSchedule> {
        let plant_id = params.id;

        self.run(move |db, ctx| {
            db.immediate(|tx| {
                let frost_date = ctx.frost_date(tx)?;
                regenerate_plant(tx, &ctx.owner, plant_id, frost_date.date)
            })
        })
        .await
    }

    /// Retrieves a plant with its tasks.
    pub async fn get_plant(&self, params: &Id) -> Result<Option<PlantSchedule>> {
        let plant_id = params.id;

        self.run(move |db, ctx| {
            let Some(plant) = db.get_plant(plant_id, &ctx.owner)? else {
                return Ok(None);
            };
            let tasks = db.tasks_for_plant(plant.id)?;
            Ok(Some(PlantSchedule { plant, tasks }))
        })
        .await
    }

    /// Lists the owner's plants, muted ones only on request.
    pub async fn list_plants(&self, params: &ListPlants) -> Result<Vec<Plant>> {
        let include_muted = params.include_muted;

        self.run(move |db, ctx| db.list_plants(&ctx.owner, include_muted))
            .await
    }

    /// Permanently deletes a plant and all of its tasks.
    pub async fn delete_plant(&self, params: &DeletePlant) -> Result<Plant> {
        if !params.confirmed {
            return Err(AlmanacError::invalid_input("confirmed").with_reason(
                "Deleting a plant also removes all of its tasks; confirm to proceed",
            ));
        }
        let plant_id = params.id;

        self.run(move |db, ctx| {
            let plant = db
                .get_plant(plant_id, &ctx.owner)?
                .ok_or(AlmanacError::PlantNotFound { id: plant_id })?;
            db.delete_plant(plant_id, &ctx.owner)?;
            log::info!("Deleted plant {plant_id}");
            Ok(plant)
        })
        .await
    }

    /// Hides a plant's tasks from the calendar without deleting anything.
    pub async fn mute_plant(&self, params: &Id) -> Result<Plant> {
        self.set_muted(params.id, Some(Timestamp::now())).await
    }

    pub async fn unmute_plant(&self, params: &Id) -> Result<Plant> {
        self.set_muted(params.id, None).await
    }

    async fn set_muted(&self, plant_id: u64, muted_at: Option<Timestamp>) -> Result<Plant> {
        self.run(move |db, ctx| {
            db.set_plant_muted(plant_id, &ctx.owner, muted_at)?;
            db.get_plant(plant_id, &ctx.owner)?
                .ok_or(AlmanacError::PlantNotFound { id: plant_id })
        })
        .await
    }
}
