//! Garden journal operations for the Scheduler.

use super::Scheduler;
use crate::{
    error::{AlmanacError, Result},
    models::JournalEntry,
    params::{CreateEntry, Id, ListEntries, UpdateEntry},
};

impl Scheduler {
    /// Writes a journal entry, dated today unless a date is given.
    pub async fn add_entry(&self, params: &CreateEntry) -> Result<JournalEntry> {
        let (entry_date, body) = params.validate(Self::today())?;
        self.run(move |db, ctx| db.add_entry(&ctx.owner, entry_date, &body))
            .await
    }

    /// Lists entries, newest first.
    pub async fn list_entries(&self, params: &ListEntries) -> Result<Vec<JournalEntry>> {
        let limit = params.limit;
        self.run(move |db, ctx| db.list_entries(&ctx.owner, limit))
            .await
    }

    pub async fn update_entry(&self, params: &UpdateEntry) -> Result<JournalEntry> {
        let (entry_date, body) = params.validate()?;
        let entry_id = params.id;
        self.run(move |db, ctx| db.update_entry(entry_id, &ctx.owner, entry_date, body.as_deref()))
            .await
    }

    pub async fn delete_entry(&self, params: &Id) -> Result<JournalEntry> {
        let entry_id = params.id;
        self.run(move |db, ctx| {
            let entry = db
                .get_entry(entry_id, &ctx.owner)?
                .ok_or(AlmanacError::EntryNotFound { id: entry_id })?;
            db.delete_entry(entry_id, &ctx.owner)?;
            Ok(entry)
        })
        .await
    }
}
