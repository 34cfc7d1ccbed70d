//! Client use-case service.
//!
//! # Responsibility
//! - Provide create/get/update entry points for request handlers.
//! - Own the injected storage and identifier-generation collaborators.
//!
//! # Invariants
//! - Each service call issues exactly one repository call.
//! - Service layer remains storage-agnostic.

use crate::model::client::{Client, ClientFields, ClientId, IdGenerator, UuidV4Generator};
use crate::repo::client_repo::{ClientRepository, RepoResult};

/// Use-case service wrapper for client record operations.
pub struct ClientService<R: ClientRepository, G: IdGenerator = UuidV4Generator> {
    repo: R,
    ids: G,
}

impl<R: ClientRepository> ClientService<R> {
    /// Creates a service generating random UUID v4 identifiers.
    pub fn new(repo: R) -> Self {
        Self::with_id_generator(repo, UuidV4Generator)
    }
}

impl<R: ClientRepository, G: IdGenerator> ClientService<R, G> {
    /// Creates a service with a caller-provided identifier source.
    pub fn with_id_generator(repo: R, ids: G) -> Self {
        Self { repo, ids }
    }

    /// Persists a new client under a freshly generated identifier.
    ///
    /// # Contract
    /// - Unconditional put; a colliding identifier would be overwritten.
    /// - Returns the generated identifier.
    pub fn create_client(&self, fields: ClientFields) -> RepoResult<ClientId> {
        let client = Client::new(&self.ids, fields);
        self.repo.put_client(&client)?;
        Ok(client.client_id)
    }

    /// Gets one client by identifier.
    pub fn get_client(&self, id: &ClientId) -> RepoResult<Option<Client>> {
        self.repo.get_client(id)
    }

    /// Overwrites name/email/phone of `id` and returns the stored values.
    ///
    /// No existence check: a missing identifier is created (upsert).
    pub fn update_client(&self, id: &ClientId, fields: &ClientFields) -> RepoResult<ClientFields> {
        self.repo.update_client(id, fields)
    }
}
