//! Request handlers for the client record store.
//!
//! # Responsibility
//! - Expose `createClient`, `getClient` and `updateClient` as functions from
//!   request envelope to response envelope.
//! - Provide the wiring used by invocation layers to run them from config.

pub mod envelope;
pub mod handlers;
pub mod runtime;

pub use envelope::{ClientInput, RequestEnvelope, RequestError, ResponseEnvelope};
pub use handlers::{create_client, get_client, update_client, HandlerKind};
pub use runtime::{invoke, load_config, parse_envelope, RuntimeError};
