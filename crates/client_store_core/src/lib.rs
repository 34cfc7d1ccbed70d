//! Core domain logic for the client record store.
//! This crate owns the record model, the storage contract and its SQLite
//! implementation; request handling lives in `client_store_handlers`.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{ConfigError, StoreConfig};
pub use db::{DbError, TableName};
pub use logging::{default_log_level, init_logging, logging_status, LogTarget};
pub use model::client::{Client, ClientFields, ClientId, IdGenerator, UuidV4Generator};
pub use repo::client_repo::{ClientRepository, RepoError, RepoResult, SqliteClientRepository};
pub use service::client_service::ClientService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
