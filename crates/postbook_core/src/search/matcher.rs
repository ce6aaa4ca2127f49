//! Case-insensitive, unanchored substring matcher for post titles.
//!
//! # Responsibility
//! - Fold both operands the same way and test for a contiguous substring.
//! - Register the predicate as a deterministic SQLite scalar function.
//!
//! # Invariants
//! - Folding is per-character Unicode lowercase; no locale or context rules.
//! - An empty fragment matches every title.
//! - `LIKE` is never used: its wildcards (`%`, `_`) and ASCII-only case folding
//!   would disagree with `matches`.

use rusqlite::functions::FunctionFlags;
use rusqlite::Connection;

/// Name under which [`matches`] is callable from SQL as `fn(title, fragment)`.
pub const SQL_FUNCTION_NAME: &str = "post_title_matches";

/// Lowercases every character independently.
///
/// Unlike `str::to_lowercase`, this does not apply the final-sigma rule, so
/// the result never depends on the neighbouring characters.
pub fn fold_case(text: &str) -> String {
    text.chars().flat_map(char::to_lowercase).collect()
}

/// Returns whether `fragment` occurs anywhere in `title`, ignoring case.
pub fn matches(title: &str, fragment: &str) -> bool {
    if fragment.is_empty() {
        return true;
    }
    fold_case(title).contains(fold_case(fragment).as_str())
}

/// Installs [`SQL_FUNCTION_NAME`] on the connection.
///
/// NULL operands never match.
pub fn register_sql_function(conn: &Connection) -> rusqlite::Result<()> {
    conn.create_scalar_function(
        SQL_FUNCTION_NAME,
        2,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let title = ctx.get::<Option<String>>(0)?;
            let fragment = ctx.get::<Option<String>>(1)?;
            Ok(match (title, fragment) {
                (Some(title), Some(fragment)) => matches(&title, &fragment),
                _ => false,
            })
        },
    )
}
