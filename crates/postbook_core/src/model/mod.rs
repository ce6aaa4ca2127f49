//! Domain model for the posts store.
//!
//! # Responsibility
//! - Define the typed records that cross the core boundary.
//! - Keep raw storage rows from leaking to callers.
//!
//! # Invariants
//! - Every stored post is identified by a store-assigned `PostId`.
//! - Deletion is permanent; there is no tombstone state.

pub mod post;
