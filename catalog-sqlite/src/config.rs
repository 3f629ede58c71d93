//! Where the catalog keeps its products and tags.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Location of the catalog database.
///
/// Without a path the catalog lives in a private in-memory database that
/// disappears with the process, which is what the test suites use. With a
/// path, products and tags persist across restarts.
///
/// In a `catalogd` config file this is the `[database]` section:
///
/// ```toml
/// [database]
/// database_path = "/var/lib/catalog/catalog.db"
/// create_if_missing = false
/// ```
///
/// ```
/// use catalog_sqlite::config::SqliteConfig;
/// use std::path::PathBuf;
///
/// let scratch = SqliteConfig::default();
/// assert!(scratch.database_path.is_none());
///
/// let persistent = SqliteConfig {
///     database_path: Some(PathBuf::from("catalog.db")),
///     ..Default::default()
/// };
/// assert!(persistent.create_if_missing);
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SqliteConfig {
    /// The catalog file; `None` keeps the catalog in memory
    #[serde(default)]
    pub database_path: Option<PathBuf>,

    /// Start an empty catalog when the file is missing, rather than failing
    #[serde(default = "create_if_missing")]
    pub create_if_missing: bool,
}

fn create_if_missing() -> bool {
    true
}

impl Default for SqliteConfig {
    fn default() -> Self {
        Self {
            database_path: None,
            create_if_missing: create_if_missing(),
        }
    }
}
