//! Repository layer over the `posts` table.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Keep SQL text and row decoding out of the store/service layer.
//!
//! # Invariants
//! - Write paths validate input before touching SQL.
//! - Read paths reject malformed rows instead of masking them.

pub mod post_repo;
