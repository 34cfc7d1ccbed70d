//! Wiring from process configuration to one handler invocation.
//!
//! # Responsibility
//! - Open the configured store, provision its table, and build the service.
//! - Decode invocation-layer envelopes.
//!
//! # Invariants
//! - Each invocation opens its own connection; nothing is cached process-wide.
//! - Wiring failures are returned as `RuntimeError`, never as handler responses.

use crate::envelope::{RequestEnvelope, ResponseEnvelope};
use crate::handlers::HandlerKind;
use client_store_core::db::{ensure_table, open_db};
use client_store_core::{
    ClientService, ConfigError, DbError, SqliteClientRepository, StoreConfig,
};
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub enum RuntimeError {
    /// Process configuration is missing or invalid.
    Config(ConfigError),
    /// Store could not be opened or provisioned.
    Db(DbError),
    /// Invocation envelope itself is not valid JSON.
    Envelope(serde_json::Error),
}

impl Display for RuntimeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(err) => write!(f, "invalid configuration: {err}"),
            Self::Db(err) => write!(f, "client store unavailable: {err}"),
            Self::Envelope(err) => write!(f, "invalid request envelope: {err}"),
        }
    }
}

impl Error for RuntimeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::Envelope(err) => Some(err),
        }
    }
}

impl From<ConfigError> for RuntimeError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<DbError> for RuntimeError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

/// Loads store configuration from the process environment.
pub fn load_config() -> Result<StoreConfig, RuntimeError> {
    Ok(StoreConfig::from_env()?)
}

/// Decodes a request envelope from its JSON text.
pub fn parse_envelope(raw: &str) -> Result<RequestEnvelope, RuntimeError> {
    serde_json::from_str(raw).map_err(RuntimeError::Envelope)
}

/// Runs `kind` against the store described by `config`.
pub fn invoke(
    kind: HandlerKind,
    config: &StoreConfig,
    request: &RequestEnvelope,
) -> Result<ResponseEnvelope, RuntimeError> {
    let conn = open_db(&config.db_path)?;
    ensure_table(&conn, &config.table_name)?;

    let service = ClientService::new(SqliteClientRepository::new(
        &conn,
        config.table_name.clone(),
    ));
    Ok(kind.handle(&service, request))
}
