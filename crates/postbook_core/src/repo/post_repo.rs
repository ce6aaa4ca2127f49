//! Post repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide insert/delete/list/search over the `posts` table.
//! - Decode rows into typed `Post` values.
//!
//! # Invariants
//! - Every statement runs in SQLite autocommit mode, so each call is atomic
//!   and durable once it returns `Ok`.
//! - All reads are ordered by `id ASC`.
//! - Title filtering uses the registered matcher function, never `LIKE`.

use crate::db::DbError;
use crate::model::post::{NewPost, Post, PostId, PostValidationError};
use crate::search::matcher::SQL_FUNCTION_NAME;
use rusqlite::types::FromSql;
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const POST_SELECT_SQL: &str = "SELECT id, user_id, title, body FROM posts";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for post persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(PostValidationError),
    Db(DbError),
    /// A stored row does not fit the `Post` shape (NULL or wrongly typed
    /// columns left by an external writer).
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted post data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<PostValidationError> for RepoError {
    fn from(value: PostValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for post operations.
pub trait PostRepository {
    /// Validates and persists `post`, returning it with the assigned id.
    fn insert_post(&self, post: &NewPost) -> RepoResult<Post>;
    /// Removes one post. `Ok(false)` means no row had that id.
    fn delete_post(&self, id: PostId) -> RepoResult<bool>;
    /// Lists every post by ascending id.
    fn list_posts(&self) -> RepoResult<Vec<Post>>;
    /// Lists posts whose title contains `fragment` (case-insensitive).
    fn search_posts_by_title(&self, fragment: &str) -> RepoResult<Vec<Post>>;
}

/// SQLite-backed post repository.
///
/// Borrows a connection prepared by [`crate::db::open_db`]; the matcher SQL
/// function must be registered on it.
pub struct SqlitePostRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqlitePostRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn query_posts(&self, sql: &str, params: impl rusqlite::Params) -> RepoResult<Vec<Post>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params)?;
        let mut posts = Vec::new();

        while let Some(row) = rows.next()? {
            posts.push(parse_post_row(row)?);
        }

        Ok(posts)
    }
}

impl PostRepository for SqlitePostRepository<'_> {
    fn insert_post(&self, post: &NewPost) -> RepoResult<Post> {
        post.validate()?;

        self.conn.execute(
            "INSERT INTO posts (user_id, title, body) VALUES (?1, ?2, ?3);",
            params![post.user_id, post.title.as_str(), post.body.as_str()],
        )?;

        Ok(post.clone().into_post(self.conn.last_insert_rowid()))
    }

    fn delete_post(&self, id: PostId) -> RepoResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM posts WHERE id = ?1;", [id])?;
        Ok(changed > 0)
    }

    fn list_posts(&self) -> RepoResult<Vec<Post>> {
        self.query_posts(&format!("{POST_SELECT_SQL} ORDER BY id ASC;"), params![])
    }

    fn search_posts_by_title(&self, fragment: &str) -> RepoResult<Vec<Post>> {
        if fragment.is_empty() {
            return self.list_posts();
        }

        self.query_posts(
            &format!("{POST_SELECT_SQL} WHERE {SQL_FUNCTION_NAME}(title, ?1) ORDER BY id ASC;"),
            [fragment],
        )
    }
}

fn parse_post_row(row: &Row<'_>) -> RepoResult<Post> {
    let id: PostId = row.get("id")?;

    Ok(Post {
        id,
        user_id: required_column(row, id, "user_id")?,
        title: required_column(row, id, "title")?,
        body: required_column(row, id, "body")?,
    })
}

fn required_column<T: FromSql>(row: &Row<'_>, id: PostId, column: &str) -> RepoResult<T> {
    let value = row.get::<_, Option<T>>(column).map_err(|err| match err {
        rusqlite::Error::InvalidColumnType(_, _, actual) => RepoError::InvalidData(format!(
            "post {id} has {actual} value in posts.{column}"
        )),
        rusqlite::Error::FromSqlConversionFailure(_, _, source) => RepoError::InvalidData(
            format!("post {id} has unreadable value in posts.{column}: {source}"),
        ),
        other => RepoError::from(other),
    })?;

    value.ok_or_else(|| RepoError::InvalidData(format!("post {id} has NULL in posts.{column}")))
}
