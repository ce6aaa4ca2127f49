//! Post domain model.
//!
//! # Responsibility
//! - Define the stored `Post` record and the `NewPost` insert request.
//! - Own the non-empty field rule applied before persistence.
//!
//! # Invariants
//! - `Post::id` is assigned by the store, strictly increasing, never reused.
//! - `user_id` is an opaque author reference; it is not checked against anything.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Store-assigned post identifier (SQLite rowid).
pub type PostId = i64;

/// A fully persisted post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub user_id: i64,
    pub title: String,
    pub body: String,
}

/// Insert request; the id is unknown until the store assigns one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPost {
    pub user_id: i64,
    pub title: String,
    pub body: String,
}

impl NewPost {
    pub fn new(user_id: i64, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            user_id,
            title: title.into(),
            body: body.into(),
        }
    }

    /// Checks the non-empty rule for `title` and `body`.
    ///
    /// Whitespace-only values count as empty.
    pub fn validate(&self) -> Result<(), PostValidationError> {
        if self.title.trim().is_empty() {
            return Err(PostValidationError::EmptyTitle);
        }
        if self.body.trim().is_empty() {
            return Err(PostValidationError::EmptyBody);
        }
        Ok(())
    }

    /// Attaches the assigned id, producing the stored shape.
    pub fn into_post(self, id: PostId) -> Post {
        Post {
            id,
            user_id: self.user_id,
            title: self.title,
            body: self.body,
        }
    }
}

/// Rejected insert input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostValidationError {
    EmptyTitle,
    EmptyBody,
}

impl Display for PostValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "post title must not be empty"),
            Self::EmptyBody => write!(f, "post body must not be empty"),
        }
    }
}

impl Error for PostValidationError {}
