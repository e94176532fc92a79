//! Frost date operations for the Scheduler.

use super::{Scheduler, plant_ops::regenerate_plant};
use crate::{
    db::Database,
    error::{DatabaseResultExt, Result},
    models::{FrostDate, FrostDateUpdate, PlantFailure},
    params::{SetFrostDate, parse_date},
};

impl Scheduler {
    /// The owner's effective frost date.
    pub async fn frost_date(&self) -> Result<FrostDate> {
        self.run(|db, ctx| ctx.frost_date(db.connection())).await
    }

    /// Stores a new frost date and regenerates every plant of the owner,
    /// muted plants included.
    ///
    /// An unparsable date fails before anything is written. The new date and
    /// every regeneration share one immediate transaction, so a plant created
    /// or edited concurrently is scheduled either before the change (and
    /// regenerated here) or after it. Each plant is regenerated under its own
    /// savepoint; a plant that fails keeps its old tasks, is reported in
    /// [`FrostDateUpdate::failed`], and does not stop the others.
    pub async fn set_frost_date(&self, params: &SetFrostDate) -> Result<FrostDateUpdate> {
        let frost_date = parse_date(&params.date)?;

        self.run(move |db, ctx| {
            let update = db.immediate(|tx| {
                Database::upsert_frost_date(tx, &ctx.owner, frost_date)?;

                let mut update = FrostDateUpdate {
                    frost_date,
                    regenerated: Vec::new(),
                    failed: Vec::new(),
                };

                for plant in Database::select_plants(tx, &ctx.owner, true)? {
                    let savepoint = tx.savepoint().db_context("Failed to create savepoint")?;
                    match regenerate_plant(&savepoint, &ctx.owner, plant.id, frost_date) {
                        Ok(_) => {
                            savepoint
                                .commit()
                                .db_context("Failed to release savepoint")?;
                            update.regenerated.push(plant.id);
                        }
                        // Dropping the savepoint rolls this plant back.
                        Err(e) => {
                            log::warn!("Failed to regenerate tasks for plant {}: {e}", plant.id);
                            update.failed.push(PlantFailure {
                                plant_id: plant.id,
                                error: e.to_string(),
                            });
                        }
                    }
                }
                Ok(update)
            })?;

            log::info!(
                "Frost date set to {frost_date}; regenerated {} plants, {} failed",
                update.regenerated.len(),
                update.failed.len()
            );
            Ok(update)
        })
        .await
    }
}
