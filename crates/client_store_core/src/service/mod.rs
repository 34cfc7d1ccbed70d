//! Core use-case services.
//!
//! # Responsibility
//! - Turn repository calls into client use-case APIs.
//! - Keep handler layers decoupled from storage details.

pub mod client_service;
