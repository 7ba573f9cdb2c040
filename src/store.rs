//! Append-only log of game results, persisted as one named blob.
//!
//! Appending loads the whole log, pushes one record and writes the whole log
//! back. Two writers sharing a blob can therefore lose an update (last write
//! wins). Serialize appends externally if more than one session writes.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use derive_more::{Display, Error};
use strictly_guess_core::GameResult;
use tracing::{debug, info, instrument, warn};

use crate::{BlobRepository, DbError, DbErrorKind};

/// Blob key used when none is configured.
pub const DEFAULT_RESULTS_KEY: &str = "numberGuessGame";

/// Storage for named text blobs.
pub trait BlobBackend {
    /// Returns the blob stored under `name`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the backend cannot be read.
    fn load(&self, name: &str) -> Result<Option<String>, DbError>;

    /// Replaces the blob stored under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the backend cannot be written.
    fn store(&self, name: &str, payload: String) -> Result<(), DbError>;
}

impl BlobBackend for BlobRepository {
    fn load(&self, name: &str) -> Result<Option<String>, DbError> {
        Ok(self.get_blob(name)?.map(|blob| blob.payload().clone()))
    }

    fn store(&self, name: &str, payload: String) -> Result<(), DbError> {
        self.put_blob(name, payload)
    }
}

/// Process-local blob storage.
///
/// Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryBlobs {
    blobs: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryBlobs {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl BlobBackend for MemoryBlobs {
    fn load(&self, name: &str) -> Result<Option<String>, DbError> {
        let blobs = self
            .blobs
            .lock()
            .map_err(|_| DbError::new(DbErrorKind::Backend, "Memory blob lock poisoned"))?;
        Ok(blobs.get(name).cloned())
    }

    fn store(&self, name: &str, payload: String) -> Result<(), DbError> {
        let mut blobs = self
            .blobs
            .lock()
            .map_err(|_| DbError::new(DbErrorKind::Backend, "Memory blob lock poisoned"))?;
        blobs.insert(name.to_string(), payload);
        Ok(())
    }
}

impl<B: BlobBackend + ?Sized> BlobBackend for &B {
    fn load(&self, name: &str) -> Result<Option<String>, DbError> {
        (**self).load(name)
    }

    fn store(&self, name: &str, payload: String) -> Result<(), DbError> {
        (**self).store(name, payload)
    }
}

/// Why a persisted log could not be used.
#[derive(Debug, Clone, Display, Error)]
pub enum StoreError {
    /// The blob exists but could not be read or decoded.
    #[display("Corrupt persisted data under '{}': {}", key, message)]
    CorruptPersistedData {
        /// Blob key.
        key: String,
        /// What went wrong.
        message: String,
    },
}

/// Ordered log of [`GameResult`]s.
#[derive(Debug, Clone)]
pub struct ResultStore<B> {
    backend: B,
    key: String,
}

impl<B: BlobBackend> ResultStore<B> {
    /// Creates a store over `backend` using [`DEFAULT_RESULTS_KEY`].
    #[instrument(skip(backend))]
    pub fn new(backend: B) -> Self {
        Self::with_key(backend, DEFAULT_RESULTS_KEY)
    }

    /// Creates a store over `backend` using the blob named `key`.
    #[instrument(skip(backend, key))]
    pub fn with_key(backend: B, key: impl Into<String>) -> Self {
        let key = key.into();
        info!(key = %key, "Creating ResultStore");
        Self { backend, key }
    }

    /// Name of the blob holding the log.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The backing blob storage.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Loads the log, reporting unreadable or malformed data.
    ///
    /// An absent blob is an empty log, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::CorruptPersistedData`] if the blob cannot be
    /// read or decoded.
    #[instrument(skip(self), fields(key = %self.key))]
    pub fn try_load_all(&self) -> Result<Vec<GameResult>, StoreError> {
        let payload = self
            .backend
            .load(&self.key)
            .map_err(|e| self.corrupt(e.to_string()))?;
        self.decode(payload)
    }

    fn corrupt(&self, message: String) -> StoreError {
        StoreError::CorruptPersistedData {
            key: self.key.clone(),
            message,
        }
    }

    /// Decodes a payload read from the backend. An absent blob is an empty log.
    fn decode(&self, payload: Option<String>) -> Result<Vec<GameResult>, StoreError> {
        let Some(payload) = payload else {
            debug!("No persisted results yet");
            return Ok(Vec::new());
        };

        let results: Vec<GameResult> =
            serde_json::from_str(&payload).map_err(|e| self.corrupt(e.to_string()))?;
        debug!(count = results.len(), "Results loaded");
        Ok(results)
    }

    /// Loads the log in insertion order.
    ///
    /// Unreadable or malformed data degrades to an empty log.
    #[instrument(skip(self), fields(key = %self.key))]
    pub fn load_all(&self) -> Vec<GameResult> {
        self.try_load_all().unwrap_or_else(|e| {
            warn!(error = %e, "Treating persisted results as empty");
            Vec::new()
        })
    }

    /// Appends `result` to the end of the log.
    ///
    /// A malformed log is replaced by a log holding only `result`. A backend
    /// that cannot be read is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the log cannot be read from or written to the
    /// backend.
    #[instrument(skip(self, result), fields(key = %self.key, player = %result.player_name(), score = result.score()))]
    pub fn append(&self, result: GameResult) -> Result<(), DbError> {
        let payload = self.backend.load(&self.key)?;
        let mut results = self.decode(payload).unwrap_or_else(|e| {
            warn!(error = %e, "Replacing malformed results");
            Vec::new()
        });
        results.push(result);

        let payload = serde_json::to_string(&results)?;
        self.backend.store(&self.key, payload)?;

        info!(count = results.len(), "Result appended");
        Ok(())
    }
}
