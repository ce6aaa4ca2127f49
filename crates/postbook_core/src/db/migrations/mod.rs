//! Schema migration registry and executor.
//!
//! # Responsibility
//! - Register schema migrations in strictly increasing order.
//! - Apply pending migrations atomically.
//!
//! # Invariants
//! - `version` values must remain monotonic.
//! - Applied migration version is mirrored to `PRAGMA user_version`.
//! - Re-applying on an up-to-date database is a no-op.
//! - After migration 1 the `posts` table always uses AUTOINCREMENT, including
//!   tables adopted from files written by older tools.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::{Connection, OptionalExtension};

const POSTS_REBUILD_SQL: &str = include_str!("0001_posts_rebuild.sql");

#[derive(Clone, Copy)]
struct Migration {
    version: u32,
    sql: &'static str,
    /// Runs after `sql` inside the same transaction.
    fixup: Option<fn(&Connection) -> DbResult<()>>,
}

const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    sql: include_str!("0001_posts.sql"),
    fixup: Some(rebuild_legacy_posts),
}];

/// Returns the latest migration version known by this binary.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |migration| migration.version)
}

/// Applies all pending migrations on the provided connection.
///
/// # Errors
/// - `DbError::UnsupportedSchemaVersion` when the database is newer than this build.
/// - `DbError::Sqlite` when any statement fails; the transaction is rolled back.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let current_version = current_user_version(conn)?;
    let latest = latest_version();

    if current_version > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: current_version,
            latest_supported: latest,
        });
    }

    if current_version == latest {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for migration in MIGRATIONS {
        if migration.version <= current_version {
            continue;
        }

        tx.execute_batch(migration.sql)?;
        if let Some(fixup) = migration.fixup {
            fixup(&tx)?;
        }
        tx.execute_batch(&format!("PRAGMA user_version = {};", migration.version))?;
    }
    tx.commit()?;

    info!(
        "event=db_migrate module=db status=ok from_version={} to_version={}",
        current_version, latest
    );
    Ok(())
}

/// Rebuilds a pre-existing `posts` table whose definition lacks AUTOINCREMENT,
/// so ids freed by deletes are never handed out again.
///
/// Legacy rows with NULL fields fail the NOT NULL copy and abort the migration.
fn rebuild_legacy_posts(conn: &Connection) -> DbResult<()> {
    let definition: Option<String> = conn
        .query_row(
            "SELECT sql FROM sqlite_master WHERE type = 'table' AND name = 'posts';",
            [],
            |row| row.get(0),
        )
        .optional()?;

    let Some(definition) = definition else {
        return Ok(());
    };
    if definition.to_ascii_uppercase().contains("AUTOINCREMENT") {
        return Ok(());
    }

    conn.execute_batch(POSTS_REBUILD_SQL)?;
    info!("event=db_migrate module=db status=ok step=rebuild_legacy_posts");
    Ok(())
}

fn current_user_version(conn: &Connection) -> DbResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    Ok(version)
}
