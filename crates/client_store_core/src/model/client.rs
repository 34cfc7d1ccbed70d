//! Client domain model.
//!
//! # Responsibility
//! - Define the persisted client record (`ClientID`, `Name`, `Email`, `Phone`).
//! - Provide identifier generation behind a replaceable trait.
//!
//! # Invariants
//! - `client_id` is opaque to the core and never derived from field values.
//! - Absent fields stay `None` and are omitted from serialized output.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Opaque lookup key for a client record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientId(String);

impl ClientId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for ClientId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ClientId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for ClientId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Mutable attribute set of a client record.
///
/// Serialized with the stored attribute names so update responses can echo
/// the post-write values directly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientFields {
    #[serde(rename = "Name", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "Email", default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "Phone", default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl ClientFields {
    /// Builds a field set where every attribute is present.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            email: Some(email.into()),
            phone: Some(phone.into()),
        }
    }
}

/// Canonical persisted client record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    #[serde(rename = "ClientID")]
    pub client_id: ClientId,
    #[serde(flatten)]
    pub fields: ClientFields,
}

impl Client {
    /// Creates a record with a freshly generated identifier.
    pub fn new(generator: &impl IdGenerator, fields: ClientFields) -> Self {
        Self::with_id(generator.next_id(), fields)
    }

    /// Creates a record with a caller-provided identifier.
    pub fn with_id(client_id: ClientId, fields: ClientFields) -> Self {
        Self { client_id, fields }
    }
}

/// Source of identifiers for newly created records.
///
/// Implementations must produce values unique with overwhelming probability.
pub trait IdGenerator {
    fn next_id(&self) -> ClientId;
}

/// Random UUID v4 identifiers (122 random bits).
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidV4Generator;

impl IdGenerator for UuidV4Generator {
    fn next_id(&self) -> ClientId {
        ClientId(Uuid::new_v4().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::{Client, ClientFields, ClientId, IdGenerator, UuidV4Generator};

    #[test]
    fn uuid_generator_yields_distinct_ids() {
        let generator = UuidV4Generator;
        let first = generator.next_id();
        let second = generator.next_id();
        assert_ne!(first, second);
        assert_eq!(first.as_str().len(), 36);
    }

    #[test]
    fn client_new_uses_generated_id() {
        let client = Client::new(&UuidV4Generator, ClientFields::new("Alice", "a@x.com", "555"));
        assert!(!client.client_id.as_str().is_empty());
        assert_eq!(client.fields.name.as_deref(), Some("Alice"));
    }

    #[test]
    fn client_id_displays_raw_value() {
        assert_eq!(ClientId::from("abc-123").to_string(), "abc-123");
    }
}
