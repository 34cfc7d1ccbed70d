//! Process configuration for the client store.
//!
//! # Responsibility
//! - Resolve table name, database path and logging options from environment.
//!
//! # Invariants
//! - `DYNAMO_TABLE_NAME` is required and validated as a `TableName`.
//! - Optional values fall back to build-mode defaults; blank values count as unset.

use crate::db::{DbError, TableName};
use crate::logging::default_log_level;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const TABLE_NAME_VAR: &str = "DYNAMO_TABLE_NAME";
pub const DB_PATH_VAR: &str = "CLIENT_STORE_DB_PATH";
pub const LOG_LEVEL_VAR: &str = "CLIENT_STORE_LOG_LEVEL";
pub const LOG_DIR_VAR: &str = "CLIENT_STORE_LOG_DIR";
const DEFAULT_DB_FILE_NAME: &str = "client_store.sqlite3";

#[derive(Debug)]
pub enum ConfigError {
    MissingVar(&'static str),
    InvalidTableName(DbError),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingVar(name) => write!(f, "required environment variable `{name}` is not set"),
            Self::InvalidTableName(err) => write!(f, "{TABLE_NAME_VAR}: {err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::MissingVar(_) => None,
            Self::InvalidTableName(err) => Some(err),
        }
    }
}

/// Resolved runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub table_name: TableName,
    pub db_path: PathBuf,
    pub log_level: String,
    /// `None` logs to stderr.
    pub log_dir: Option<String>,
}

impl StoreConfig {
    /// Reads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let non_blank = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let raw_table = non_blank(TABLE_NAME_VAR).ok_or(ConfigError::MissingVar(TABLE_NAME_VAR))?;
        let table_name = TableName::parse(&raw_table).map_err(ConfigError::InvalidTableName)?;

        let db_path = non_blank(DB_PATH_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_DB_FILE_NAME));

        Ok(Self {
            table_name,
            db_path,
            log_level: non_blank(LOG_LEVEL_VAR).unwrap_or_else(|| default_log_level().to_string()),
            log_dir: non_blank(LOG_DIR_VAR),
        })
    }
}
