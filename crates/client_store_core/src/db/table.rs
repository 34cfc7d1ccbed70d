//! Client table naming and provisioning.
//!
//! The table name comes from process configuration, so it is validated
//! against a conservative character set and always double-quoted in SQL.

use super::{DbError, DbResult};
use log::{error, info};
use once_cell::sync::Lazy;
use regex::Regex;
use rusqlite::Connection;
use std::fmt::{Display, Formatter};

static TABLE_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_.\-]{3,255}$").expect("valid table name regex"));

/// Validated storage table name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableName(String);

impl TableName {
    /// Validates and wraps a raw table name.
    ///
    /// Surrounding whitespace is trimmed before validation.
    pub fn parse(raw: &str) -> DbResult<Self> {
        let trimmed = raw.trim();
        if !TABLE_NAME_RE.is_match(trimmed) {
            return Err(DbError::InvalidTableName(trimmed.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Double-quoted identifier form for SQL statements.
    pub(crate) fn quoted(&self) -> String {
        format!("\"{}\"", self.0)
    }
}

impl Display for TableName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Creates the client table when it does not exist yet.
///
/// Only the key column is constrained; attribute columns accept `NULL`.
pub fn ensure_table(conn: &Connection, table: &TableName) -> DbResult<()> {
    let sql = format!(
        "CREATE TABLE IF NOT EXISTS {} (
            ClientID TEXT PRIMARY KEY NOT NULL,
            Name TEXT,
            Email TEXT,
            Phone TEXT
        );",
        table.quoted()
    );

    match conn.execute_batch(&sql) {
        Ok(()) => {
            info!("event=table_ensure module=db status=ok table={table}");
            Ok(())
        }
        Err(err) => {
            error!("event=table_ensure module=db status=error table={table} error={err}");
            Err(err.into())
        }
    }
}

/// Returns whether `table` is present in the connected database.
pub fn table_exists(conn: &Connection, table: &TableName) -> DbResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1
        );",
        [table.as_str()],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}
