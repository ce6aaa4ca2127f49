//! Core of the posts store.
//! Owns the durable `posts` collection and the title search rules; front ends
//! only talk to [`RecordStore`].

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;

pub use config::{StoreLocation, DEFAULT_DB_FILE_NAME};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::post::{NewPost, Post, PostId, PostValidationError};
pub use repo::post_repo::{PostRepository, RepoError, RepoResult, SqlitePostRepository};
pub use search::matcher::{fold_case, matches};
pub use service::record_store::{RecordStore, StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
