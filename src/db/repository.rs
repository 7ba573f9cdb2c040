//! Database repository for named blobs.

use diesel::prelude::*;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info, instrument};

use crate::db::{Blob, DbError, DbErrorKind, NewBlob, schema};

/// Schema migrations compiled into the binary.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Blob storage backed by a SQLite file.
///
/// Every call opens its own connection, so the repository is cheap to clone
/// and holds no open handles between calls. An in-memory path (`":memory:"`)
/// would lose its data between calls; use
/// [`MemoryBlobs`](crate::MemoryBlobs) for that.
#[derive(Debug, Clone)]
pub struct BlobRepository {
    db_path: String,
}

impl BlobRepository {
    /// Opens the database at `db_path`, creating it and applying pending
    /// migrations as needed.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the file cannot be opened or migrated.
    #[instrument(skip(db_path), fields(db_path = %db_path))]
    pub fn open(db_path: String) -> Result<Self, DbError> {
        info!(path = %db_path, "Opening BlobRepository");
        let repo = Self { db_path };
        let mut conn = repo.connection()?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| DbError::new(DbErrorKind::Migration, e.to_string()))?;
        debug!(applied = applied.len(), "Migrations applied");
        Ok(repo)
    }

    /// Path of the underlying database file.
    pub fn db_path(&self) -> &str {
        &self.db_path
    }

    /// Establishes a database connection.
    #[instrument(skip(self))]
    fn connection(&self) -> Result<SqliteConnection, DbError> {
        debug!(path = %self.db_path, "Establishing connection");
        SqliteConnection::establish(&self.db_path)
            .map_err(|e| {
                DbError::new(
                    DbErrorKind::Connection,
                    format!("Failed to connect to '{}': {}", self.db_path, e),
                )
            })
    }

    /// Loads the blob stored under `name`. Returns `None` if absent.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn get_blob(&self, name: &str) -> Result<Option<Blob>, DbError> {
        debug!(name = %name, "Loading blob");
        let mut conn = self.connection()?;

        let blob = schema::blobs::table
            .filter(schema::blobs::name.eq(name))
            .select(Blob::as_select())
            .first(&mut conn)
            .optional()?;

        match &blob {
            Some(b) => debug!(bytes = b.payload().len(), "Blob found"),
            None => debug!("Blob not found"),
        }
        Ok(blob)
    }

    /// Replaces the blob stored under `name` with `payload`.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self, payload), fields(bytes = payload.len()))]
    pub fn put_blob(&self, name: &str, payload: String) -> Result<(), DbError> {
        debug!(name = %name, "Storing blob");
        let mut conn = self.connection()?;

        let row = NewBlob::new(name.to_string(), payload, chrono::Utc::now().naive_utc());
        diesel::replace_into(schema::blobs::table)
            .values(&row)
            .execute(&mut conn)?;

        info!(name = %name, "Blob stored");
        Ok(())
    }
}
