//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the storage collaborator contract used by the client service.
//! - Isolate SQLite query details from service/handler code.
//!
//! # Invariants
//! - Each repository call performs exactly one storage operation.
//! - Repository errors carry the backend message verbatim in `Display`.

pub mod client_repo;
