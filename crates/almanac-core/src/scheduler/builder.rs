//! Builder for creating and configuring Scheduler instances.

use std::path::{Path, PathBuf};

use jiff::civil::Date;
use tokio::task;

use super::Scheduler;
use crate::{
    db::Database,
    error::{AlmanacError, Result},
    models::DEFAULT_FROST_DATE,
};

/// Owner used when none is configured.
pub const DEFAULT_OWNER: &str = "default";

/// Builder for creating and configuring Scheduler instances.
#[derive(Debug, Clone)]
pub struct SchedulerBuilder {
    database_path: Option<PathBuf>,
    owner: String,
    default_frost_date: Date,
}

impl SchedulerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            database_path: None,
            owner: DEFAULT_OWNER.to_string(),
            default_frost_date: DEFAULT_FROST_DATE,
        }
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/almanac/almanac.db` or `~/.local/share/almanac/almanac.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Sets the owner scope all operations run under.
    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = owner.into();
        self
    }

    /// Sets the frost date used until the owner stores one.
    pub fn with_default_frost_date(mut self, date: Date) -> Self {
        self.default_frost_date = date;
        self
    }

    /// Builds the configured scheduler instance.
    ///
    /// # Errors
    ///
    /// Returns `AlmanacError::InvalidInput` if the owner is blank
    /// Returns `AlmanacError::FileSystem` if the database path is invalid
    /// Returns `AlmanacError::Database` if database initialization fails
    pub async fn build(self) -> Result<Scheduler> {
        let owner = self.owner.trim().to_string();
        if owner.is_empty() {
            return Err(AlmanacError::invalid_input("owner").with_reason("Owner cannot be blank"));
        }

        let db_path = if let Some(path) = self.database_path {
            path
        } else {
            Self::default_database_path()?
        };

        if let Some(parent) = db_path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| AlmanacError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let db_path_clone = db_path.clone();
        task::spawn_blocking(move || {
            let _db = Database::new(&db_path_clone)?;
            Ok::<(), AlmanacError>(())
        })
        .await
        .map_err(|e| AlmanacError::Configuration {
            message: format!("Task join error: {e}"),
        })??;

        log::debug!("Opened scheduler for owner '{owner}' at {}", db_path.display());

        Ok(Scheduler::new(db_path, owner, self.default_frost_date))
    }

    /// Returns the default database path following XDG Base Directory
    /// specification.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("almanac")
            .place_data_file("almanac.db")
            .map_err(|e| AlmanacError::XdgDirectory(e.to_string()))
    }
}

impl Default for SchedulerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
