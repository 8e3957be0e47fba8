//! Storage layer for roadwatch.
//!
//! The obstacle collection is one JSON array document kept under a single
//! key of a [`KeyValueStore`]. Every mutation is a full read-modify-write:
//! read the document, compute the new collection, write the whole document
//! back. No finer-grained update exists.

pub mod memory;
pub mod migrations;
pub mod schema;
pub mod sqlite;

use serde::Serialize;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::obstacle::{Obstacle, ObstacleId};

pub use memory::MemoryKeyValue;
pub use sqlite::SqliteKeyValue;

/// Storage key of the obstacle document.
pub const OBSTACLES_KEY: &str = "obstacles";

/// Minimal persistence capability the obstacle store needs.
pub trait KeyValueStore {
    /// Read the value under `key`, `None` if it was never written.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Counters shown above the obstacle list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ObstacleStats {
    /// Number of stored obstacles.
    pub total: usize,
    /// Number of stored obstacles with GPS coordinates.
    pub with_location: usize,
}

/// Persistent obstacle collection.
///
/// The store caches nothing: each operation starts from the persisted
/// document, so a failed write never leaves a stale in-memory copy behind.
///
/// Mutations take `&mut self`, which rules out overlapping writes within a
/// process. Two processes mutating the same backend concurrently can still
/// lose an update, since nothing versions the document.
#[derive(Debug)]
pub struct ObstacleStore<S> {
    backend: S,
    key: String,
}

impl<S: KeyValueStore> ObstacleStore<S> {
    /// Create a store over `backend` using the default key.
    #[must_use]
    pub fn new(backend: S) -> Self {
        Self::with_key(backend, OBSTACLES_KEY)
    }

    /// Create a store over `backend` using a custom key.
    #[must_use]
    pub fn with_key(backend: S, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    /// The storage key of the document.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Borrow the backend.
    #[must_use]
    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Give the backend back.
    #[must_use]
    pub fn into_inner(self) -> S {
        self.backend
    }

    /// Load all obstacles, newest first.
    ///
    /// A missing document yields an empty list. Obstacles sharing a
    /// timestamp keep their stored relative order.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read, or
    /// [`Error::DocumentCorrupt`] if the document does not parse.
    pub fn load(&self) -> Result<Vec<Obstacle>> {
        let mut obstacles = self.read_document()?;
        obstacles.sort_by(|a, b| b.timestamp().cmp(&a.timestamp()));
        Ok(obstacles)
    }

    /// Find one obstacle by id.
    ///
    /// # Errors
    ///
    /// Same as [`ObstacleStore::load`].
    pub fn get(&self, id: &ObstacleId) -> Result<Option<Obstacle>> {
        Ok(self
            .read_document()?
            .into_iter()
            .find(|obstacle| obstacle.id() == id))
    }

    /// Add an obstacle to the persisted collection.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateObstacle`] if the id is already stored, or
    /// any read, parse or write error. On error nothing new is persisted by
    /// this store.
    pub fn append(&mut self, obstacle: Obstacle) -> Result<()> {
        let mut obstacles = self.read_document()?;
        if obstacles.iter().any(|existing| existing.id() == obstacle.id()) {
            return Err(Error::DuplicateObstacle(obstacle.id().clone()));
        }

        let id = obstacle.id().clone();
        obstacles.push(obstacle);
        self.write_document(&obstacles)?;

        info!("Added obstacle {} ({} stored)", id, obstacles.len());
        Ok(())
    }

    /// Remove every obstacle with the given id.
    ///
    /// Returns the number of obstacles removed. An unknown id is a no-op
    /// success and performs no write.
    ///
    /// # Errors
    ///
    /// Returns any read, parse or write error.
    pub fn remove(&mut self, id: &ObstacleId) -> Result<usize> {
        let mut obstacles = self.read_document()?;
        let before = obstacles.len();
        obstacles.retain(|obstacle| obstacle.id() != id);
        let removed = before - obstacles.len();

        if removed == 0 {
            debug!("No obstacle with id {} to remove", id);
            return Ok(0);
        }

        self.write_document(&obstacles)?;
        info!("Removed obstacle {} ({} stored)", id, obstacles.len());
        Ok(removed)
    }

    /// Count stored obstacles, with and without coordinates.
    ///
    /// # Errors
    ///
    /// Same as [`ObstacleStore::load`].
    pub fn stats(&self) -> Result<ObstacleStats> {
        let obstacles = self.read_document()?;
        Ok(ObstacleStats {
            total: obstacles.len(),
            with_location: obstacles.iter().filter(|o| o.has_location()).count(),
        })
    }

    fn read_document(&self) -> Result<Vec<Obstacle>> {
        let Some(raw) = self.backend.get(&self.key)? else {
            debug!("No document under '{}'", self.key);
            return Ok(Vec::new());
        };

        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&raw).map_err(|source| Error::DocumentCorrupt {
            key: self.key.clone(),
            source,
        })
    }

    fn write_document(&mut self, obstacles: &[Obstacle]) -> Result<()> {
        let raw = serde_json::to_string(obstacles)?;
        self.backend.set(&self.key, &raw)
    }
}
