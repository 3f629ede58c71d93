#![warn(missing_docs)]
// Note: this overwrites the link in the README to point to the rust docs of the catalog-core crate.
//! [catalog_core]: https://docs.rs/catalog_core/latest/catalog_core/index.html
#![doc = include_str!("../README.md")]

use sqlx::sqlite;
use std::{str::FromStr, time::Duration};
use tokio::try_join;

pub mod config;
mod r#impl;
pub mod types;

use config::SqliteConfig;

/// SQLite database implementation of the catalog repositories.
///
/// This struct provides separate reader and writer connection pools to a SQLite database,
/// implementing the repository traits defined in `catalog-core`. All writes are serialized
/// through the writer pool, which never holds more than one connection.
///
/// # Connection Management
///
/// - `reader`: A connection pool for read operations, allowing concurrent reads
/// - `writer`: A single-connection pool for write operations, ensuring serialized writes
///
/// # Example
///
/// ```no_run
/// # use catalog_sqlite::{Db, config::SqliteConfig};
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = SqliteConfig::default();
/// let db = Db::open(&config).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Db {
    /// Connection pool for read operations
    pub reader: sqlx::Pool<sqlx::Sqlite>,
    /// Connection pool for write operations (limited to 1 connection)
    pub writer: sqlx::Pool<sqlx::Sqlite>,
}

impl Db {
    /// Open a connection to the specified SQLite database.
    ///
    /// Creates a new database if one doesn't exist (when `create_if_missing` is true)
    /// and applies all pending migrations.
    ///
    /// # Database Configuration
    ///
    /// - WAL mode for concurrent readers alongside the writer
    /// - Foreign keys enabled, so deleting a product removes its tag associations
    ///
    /// # Errors
    ///
    /// Returns `sqlx::Error` if the connection fails or a migration fails to apply.
    pub async fn open(config: &SqliteConfig) -> Result<Self, sqlx::Error> {
        let db_path = config
            .database_path
            .as_ref()
            .map(|p| p.to_string_lossy().into_owned());

        let options =
            sqlite::SqliteConnectOptions::from_str(db_path.as_deref().unwrap_or(":memory:"))?
                .busy_timeout(Duration::from_secs(5))
                .foreign_keys(true)
                .journal_mode(sqlite::SqliteJournalMode::Wal)
                .synchronous(sqlite::SqliteSynchronous::Normal)
                .pragma("temp_store", "memory")
                .create_if_missing(config.create_if_missing);

        let reader = sqlite::SqlitePoolOptions::new().connect_with(options.clone());
        let writer = sqlite::SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options);

        let (reader, writer) = try_join!(reader, writer)?;

        sqlx::migrate!("./schema").run(&writer).await?;
        tracing::debug!(path = db_path.as_deref().unwrap_or(":memory:"), "opened catalog database");

        Ok(Self { reader, writer })
    }
}
