//! Domain model for client profile records.
//!
//! # Responsibility
//! - Define the canonical client record and its mutable field set.
//! - Define the identifier-generation seam used at creation time.
//!
//! # Invariants
//! - Every record is identified by a stable `ClientId`.
//! - A record's identifier is assigned once and never rewritten.

pub mod client;
