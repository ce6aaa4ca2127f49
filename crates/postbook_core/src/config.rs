//! Store location configuration.
//!
//! The location of the backing database is the only setting the core takes.

use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// File name used when the caller does not pick a location.
pub const DEFAULT_DB_FILE_NAME: &str = "posts.db";

/// Marker accepted by [`StoreLocation::parse`] for a private in-memory store.
pub const MEMORY_LOCATION: &str = ":memory:";

/// Where a record store keeps its data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreLocation {
    /// SQLite file, created on first open.
    File(PathBuf),
    /// Connection-private database discarded on drop.
    Memory,
}

impl StoreLocation {
    /// Parses a user-supplied location string.
    ///
    /// `":memory:"` selects [`StoreLocation::Memory`]; anything else is a path.
    pub fn parse(value: &str) -> Self {
        if value == MEMORY_LOCATION {
            Self::Memory
        } else {
            Self::File(PathBuf::from(value))
        }
    }

    pub fn file(path: impl AsRef<Path>) -> Self {
        Self::File(path.as_ref().to_path_buf())
    }

    /// Short mode label used in log lines.
    pub fn mode(&self) -> &'static str {
        match self {
            Self::File(_) => "file",
            Self::Memory => "memory",
        }
    }
}

impl Default for StoreLocation {
    fn default() -> Self {
        Self::File(PathBuf::from(DEFAULT_DB_FILE_NAME))
    }
}

impl Display for StoreLocation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Memory => write!(f, "{MEMORY_LOCATION}"),
        }
    }
}

impl From<PathBuf> for StoreLocation {
    fn from(value: PathBuf) -> Self {
        Self::File(value)
    }
}

impl From<&Path> for StoreLocation {
    fn from(value: &Path) -> Self {
        Self::File(value.to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::{StoreLocation, DEFAULT_DB_FILE_NAME};
    use std::path::PathBuf;

    #[test]
    fn parse_recognizes_memory_marker() {
        assert_eq!(StoreLocation::parse(":memory:"), StoreLocation::Memory);
    }

    #[test]
    fn parse_treats_other_values_as_paths() {
        assert_eq!(
            StoreLocation::parse("data/posts.db"),
            StoreLocation::File(PathBuf::from("data/posts.db"))
        );
    }

    #[test]
    fn default_points_at_posts_db() {
        assert_eq!(
            StoreLocation::default(),
            StoreLocation::File(PathBuf::from(DEFAULT_DB_FILE_NAME))
        );
        assert_eq!(StoreLocation::default().to_string(), "posts.db");
    }
}
