//! Configuration management for the project store

use crate::error::{PoiseError, Result};
use poise_common::{get_default_database_path, ENV_CREATE_SCHEMA, ENV_DATABASE_PATH};
use std::path::{Path, PathBuf};

/// Configuration for project store access
#[derive(Debug, Clone)]
pub struct PoiseConfig {
    /// Path to the SQLite database file
    pub database_path: PathBuf,
    /// Whether to create the database and its tables when they are missing
    pub create_schema: bool,
}

impl PoiseConfig {
    /// Create a new configuration with a custom database path
    ///
    /// # Arguments
    /// * `database_path` - Path to the SQLite database file
    /// * `create_schema` - Whether to bootstrap missing tables on open
    #[must_use]
    pub fn new<P: AsRef<Path>>(database_path: P, create_schema: bool) -> Self {
        Self {
            database_path: database_path.as_ref().to_path_buf(),
            create_schema,
        }
    }

    /// Create a configuration with the default database path
    #[must_use]
    pub fn with_default_path() -> Self {
        Self {
            database_path: get_default_database_path(),
            create_schema: true,
        }
    }

    /// Get the database path to open
    ///
    /// A missing file is only acceptable when the schema may be created.
    ///
    /// # Errors
    /// Returns `PoiseError::Configuration` if the file is missing and schema creation is off
    pub fn get_effective_database_path(&self) -> Result<PathBuf> {
        if self.database_path.exists() || self.create_schema {
            return Ok(self.database_path.clone());
        }

        Err(PoiseError::configuration(format!(
            "Database not found at {} and schema creation is disabled",
            self.database_path.display()
        )))
    }

    /// Create configuration from environment variables
    ///
    /// Reads `POISE_DATABASE_PATH` and `POISE_CREATE_SCHEMA`
    #[must_use]
    pub fn from_env() -> Self {
        let database_path = std::env::var(ENV_DATABASE_PATH)
            .map_or_else(|_| get_default_database_path(), PathBuf::from);

        let create_schema = std::env::var(ENV_CREATE_SCHEMA)
            .map(|v| parse_flag(&v).unwrap_or(true))
            .unwrap_or(true);

        Self::new(database_path, create_schema)
    }
}

impl Default for PoiseConfig {
    fn default() -> Self {
        Self::with_default_path()
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
