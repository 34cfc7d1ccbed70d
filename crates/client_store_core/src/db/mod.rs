//! SQLite storage bootstrap for the client record store.
//!
//! # Responsibility
//! - Open and configure SQLite connections.
//! - Provision the configured client table before any record I/O.
//!
//! # Invariants
//! - Table names are validated before they are spliced into SQL.
//! - Repositories assume `ensure_table` has succeeded for their table.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod open;
mod table;

pub use open::{open_db, open_db_in_memory};
pub use table::{ensure_table, table_exists, TableName};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    InvalidTableName(String),
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::InvalidTableName(name) => write!(
                f,
                "invalid table name `{name}`; expected 3-255 characters of [A-Za-z0-9_.-]"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::InvalidTableName(_) => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
