//! Client repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide keyed get / put / update over the configured client table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - `put_client` is an unconditional insert that overwrites on key collision.
//! - `update_client` overwrites all three attributes and upserts a missing key.
//! - No call retries; the first backend error is returned as-is.

use crate::db::{DbError, TableName};
use crate::model::client::{Client, ClientFields, ClientId};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for client persistence operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted client data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Storage collaborator contract for client records.
pub trait ClientRepository {
    /// Writes `client` unconditionally.
    fn put_client(&self, client: &Client) -> RepoResult<()>;
    /// Exact-key fetch; `Ok(None)` when no record exists.
    fn get_client(&self, id: &ClientId) -> RepoResult<Option<Client>>;
    /// Overwrites all attributes of `id` and returns the post-write values.
    fn update_client(&self, id: &ClientId, fields: &ClientFields) -> RepoResult<ClientFields>;
}

impl<R: ClientRepository + ?Sized> ClientRepository for &R {
    fn put_client(&self, client: &Client) -> RepoResult<()> {
        (**self).put_client(client)
    }

    fn get_client(&self, id: &ClientId) -> RepoResult<Option<Client>> {
        (**self).get_client(id)
    }

    fn update_client(&self, id: &ClientId, fields: &ClientFields) -> RepoResult<ClientFields> {
        (**self).update_client(id, fields)
    }
}

/// SQLite-backed client repository bound to one table.
pub struct SqliteClientRepository<'conn> {
    conn: &'conn Connection,
    table: TableName,
}

impl<'conn> SqliteClientRepository<'conn> {
    /// Binds a repository to `table` without touching the database.
    ///
    /// Callers provision the table with `db::ensure_table` first; calls
    /// against a missing table surface as `RepoError::Db`.
    pub fn new(conn: &'conn Connection, table: TableName) -> Self {
        Self { conn, table }
    }
}

impl ClientRepository for SqliteClientRepository<'_> {
    fn put_client(&self, client: &Client) -> RepoResult<()> {
        self.conn.execute(
            &format!(
                "INSERT OR REPLACE INTO {} (ClientID, Name, Email, Phone)
                 VALUES (?1, ?2, ?3, ?4);",
                self.table.quoted()
            ),
            params![
                client.client_id.as_str(),
                client.fields.name.as_deref(),
                client.fields.email.as_deref(),
                client.fields.phone.as_deref(),
            ],
        )?;
        Ok(())
    }

    fn get_client(&self, id: &ClientId) -> RepoResult<Option<Client>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT ClientID, Name, Email, Phone FROM {} WHERE ClientID = ?1;",
            self.table.quoted()
        ))?;

        let mut rows = stmt.query([id.as_str()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_client_row(row)?));
        }

        Ok(None)
    }

    fn update_client(&self, id: &ClientId, fields: &ClientFields) -> RepoResult<ClientFields> {
        let updated = self
            .conn
            .query_row(
                &format!(
                    "INSERT INTO {} (ClientID, Name, Email, Phone)
                     VALUES (?1, ?2, ?3, ?4)
                     ON CONFLICT(ClientID) DO UPDATE SET
                        Name = excluded.Name,
                        Email = excluded.Email,
                        Phone = excluded.Phone
                     RETURNING Name, Email, Phone;",
                    self.table.quoted()
                ),
                params![
                    id.as_str(),
                    fields.name.as_deref(),
                    fields.email.as_deref(),
                    fields.phone.as_deref(),
                ],
                parse_fields_row,
            )
            .optional()?;

        updated.ok_or_else(|| {
            RepoError::InvalidData(format!("update of `{id}` returned no attributes"))
        })
    }
}

fn parse_client_row(row: &Row<'_>) -> RepoResult<Client> {
    let client_id: String = row.get("ClientID")?;
    if client_id.is_empty() {
        return Err(RepoError::InvalidData(
            "empty ClientID in stored row".to_string(),
        ));
    }

    Ok(Client::with_id(
        ClientId::new(client_id),
        parse_fields_row(row)?,
    ))
}

fn parse_fields_row(row: &Row<'_>) -> rusqlite::Result<ClientFields> {
    Ok(ClientFields {
        name: row.get("Name")?,
        email: row.get("Email")?,
        phone: row.get("Phone")?,
    })
}
