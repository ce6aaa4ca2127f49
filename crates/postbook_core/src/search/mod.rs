//! Title search rules.
//!
//! # Responsibility
//! - Define the case-insensitive substring predicate used by title search.
//! - Expose the same predicate to SQLite so filtering happens in the query.
//!
//! # Invariants
//! - The pure function and the SQL function give identical answers.

pub mod matcher;
