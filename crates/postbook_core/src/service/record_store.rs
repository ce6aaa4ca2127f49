//! Record store: the single owner of the posts database handle.
//!
//! # Responsibility
//! - Hold the storage handle between `initialize` and drop/close.
//! - Expose insert/delete/list/search as the only way to reach the data.
//! - Translate repository failures into the caller-facing error taxonomy.
//!
//! # Invariants
//! - Two states only: Uninitialized and Ready. Every data operation on an
//!   Uninitialized store fails with `StoreError::NotInitialized`.
//! - A failed operation never changes state; the store stays usable.
//! - Storage failures are returned as-is, never retried or swallowed.
//! - The type is `Send` but not `Sync`; hosts that share it across threads
//!   must wrap it in a mutex.

use crate::config::StoreLocation;
use crate::db::{open_db, open_db_in_memory, DbError};
use crate::model::post::{NewPost, Post, PostId, PostValidationError};
use crate::repo::post_repo::{PostRepository, RepoError, RepoResult, SqlitePostRepository};
use log::{error, info, warn};
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

pub type StoreResult<T> = Result<T, StoreError>;

/// Caller-facing error for record store operations.
#[derive(Debug)]
pub enum StoreError {
    /// The backing store could not be opened, read or written.
    StorageUnavailable(RepoError),
    /// A data operation was attempted before a successful `initialize`.
    NotInitialized,
    /// Insert input failed validation; nothing was written.
    InvalidArgument(PostValidationError),
}

impl StoreError {
    /// Stable machine-readable code used in log lines.
    pub fn code(&self) -> &'static str {
        match self {
            Self::StorageUnavailable(_) => "storage_unavailable",
            Self::NotInitialized => "not_initialized",
            Self::InvalidArgument(_) => "invalid_argument",
        }
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StorageUnavailable(err) => write!(f, "post storage unavailable: {err}"),
            Self::NotInitialized => write!(f, "record store is not initialized"),
            Self::InvalidArgument(err) => write!(f, "invalid argument: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::StorageUnavailable(err) => Some(err),
            Self::NotInitialized => None,
            Self::InvalidArgument(err) => Some(err),
        }
    }
}

impl From<RepoError> for StoreError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(err) => Self::InvalidArgument(err),
            other => Self::StorageUnavailable(other),
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::StorageUnavailable(RepoError::Db(value))
    }
}

enum StoreState {
    Uninitialized,
    Ready {
        conn: Connection,
        location: StoreLocation,
    },
}

/// Durable collection of posts backed by one SQLite handle.
pub struct RecordStore {
    state: StoreState,
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordStore {
    /// Creates an Uninitialized store.
    pub fn new() -> Self {
        Self {
            state: StoreState::Uninitialized,
        }
    }

    /// Creates a store and initializes it at `location` in one step.
    pub fn open(location: impl Into<StoreLocation>) -> StoreResult<Self> {
        let mut store = Self::new();
        store.initialize(location)?;
        Ok(store)
    }

    /// Opens (creating if absent) the storage target and ensures the schema.
    ///
    /// Idempotent for an already-initialized target. On a Ready store the
    /// current handle is released first; if the new open fails the store is
    /// left Uninitialized.
    ///
    /// # Errors
    /// - `StoreError::StorageUnavailable` when the location cannot be opened
    ///   for read/write or its schema cannot be prepared.
    pub fn initialize(&mut self, location: impl Into<StoreLocation>) -> StoreResult<()> {
        let location = location.into();
        if let StoreState::Ready { location: current, .. } = &self.state {
            info!(
                "event=store_reinit module=store status=start from_mode={} to_mode={}",
                current.mode(),
                location.mode()
            );
        }
        self.state = StoreState::Uninitialized;

        let conn = match &location {
            StoreLocation::File(path) => open_db(path),
            StoreLocation::Memory => open_db_in_memory(),
        }?;

        info!(
            "event=store_init module=store status=ok mode={}",
            location.mode()
        );
        self.state = StoreState::Ready { conn, location };
        Ok(())
    }

    /// Returns whether `initialize` has succeeded and the handle is live.
    pub fn is_ready(&self) -> bool {
        matches!(self.state, StoreState::Ready { .. })
    }

    /// Location of the live handle, if any.
    pub fn location(&self) -> Option<&StoreLocation> {
        match &self.state {
            StoreState::Ready { location, .. } => Some(location),
            StoreState::Uninitialized => None,
        }
    }

    /// Releases the handle and returns to Uninitialized.
    ///
    /// Closing an Uninitialized store is a no-op. If SQLite refuses to close,
    /// the handle is dropped anyway and the error is reported.
    pub fn close(&mut self) -> StoreResult<()> {
        let state = std::mem::replace(&mut self.state, StoreState::Uninitialized);
        let StoreState::Ready { conn, location } = state else {
            return Ok(());
        };

        match conn.close() {
            Ok(()) => {
                info!(
                    "event=store_close module=store status=ok mode={}",
                    location.mode()
                );
                Ok(())
            }
            Err((_conn, err)) => {
                error!(
                    "event=store_close module=store status=error mode={} error={}",
                    location.mode(),
                    err
                );
                Err(StoreError::from(RepoError::from(err)))
            }
        }
    }

    /// Persists a new post and returns its assigned id.
    ///
    /// # Errors
    /// - `StoreError::InvalidArgument` when `title` or `body` is blank.
    pub fn insert(&self, user_id: i64, title: &str, body: &str) -> StoreResult<PostId> {
        self.insert_post(&NewPost::new(user_id, title, body))
            .map(|post| post.id)
    }

    /// Persists a new post and returns the stored record.
    pub fn insert_post(&self, post: &NewPost) -> StoreResult<Post> {
        self.run("post_insert", |repo| repo.insert_post(post))
    }

    /// Removes the post with `id`. `Ok(false)` means it was not present.
    pub fn delete(&self, id: PostId) -> StoreResult<bool> {
        self.run("post_delete", |repo| repo.delete_post(id))
    }

    /// Snapshot of every post, ordered by ascending id.
    pub fn list_all(&self) -> StoreResult<Vec<Post>> {
        self.run("post_list", |repo| repo.list_posts())
    }

    /// Posts whose title contains `fragment` ignoring case, by ascending id.
    ///
    /// An empty fragment returns the same result as [`RecordStore::list_all`].
    pub fn search_by_title(&self, fragment: &str) -> StoreResult<Vec<Post>> {
        self.run("post_search", |repo| repo.search_posts_by_title(fragment))
    }

    fn run<T>(
        &self,
        event: &'static str,
        op: impl FnOnce(&SqlitePostRepository<'_>) -> RepoResult<T>,
    ) -> StoreResult<T> {
        let StoreState::Ready { conn, .. } = &self.state else {
            warn!("event={event} module=store status=error error_code=not_initialized");
            return Err(StoreError::NotInitialized);
        };

        let started_at = Instant::now();
        let repo = SqlitePostRepository::new(conn);
        match op(&repo) {
            Ok(value) => {
                info!(
                    "event={event} module=store status=ok duration_ms={}",
                    started_at.elapsed().as_millis()
                );
                Ok(value)
            }
            Err(err) => {
                let err = StoreError::from(err);
                error!(
                    "event={event} module=store status=error duration_ms={} error_code={} error={}",
                    started_at.elapsed().as_millis(),
                    err.code(),
                    err
                );
                Err(err)
            }
        }
    }
}
