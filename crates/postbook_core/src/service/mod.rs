//! Core use-case services.
//!
//! # Responsibility
//! - Own the storage handle and expose the store's public operations.
//! - Keep callers decoupled from SQL and connection details.

pub mod record_store;
