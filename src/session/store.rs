//! Expiring storage for game records.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use super::{Clock, SessionRecord, SystemClock};
use crate::error::AkinatorError;
use crate::Result;

/// How long a record stays readable after its last write, in seconds.
pub const DEFAULT_TTL_SECS: i64 = 10 * 60;

/// Storage for per-game records keyed by game id.
///
/// Records expire a fixed time after their most recent `set`. An expired
/// record reads as absent even if it is still physically stored.
///
/// Implementations do not serialize a read-modify-write done by the caller:
/// two operations on the same game issued concurrently can lose an update.
pub trait SessionStore: Send + Sync {
    /// Read a live record.
    fn get(&self, key: &str) -> Result<Option<SessionRecord>>;

    /// Insert or replace a record, restarting its expiry window.
    fn set(&self, key: &str, record: SessionRecord) -> Result<()>;

    /// Remove a record. Missing keys are a no-op.
    fn delete(&self, key: &str) -> Result<()>;

    /// Remove every record.
    fn clear(&self) -> Result<()>;
}

/// A record together with its absolute expiry time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredEntry {
    /// The stored record.
    pub data: SessionRecord,
    /// First instant at which the record is no longer readable.
    pub expires_at: DateTime<Utc>,
}

impl StoredEntry {
    /// Whether the entry may still be read at `now`.
    pub fn is_live(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

/// In-memory session store.
pub struct MemoryStore {
    entries: RwLock<HashMap<String, StoredEntry>>,
    clock: Arc<dyn Clock>,
    ttl: TimeDelta,
}

impl MemoryStore {
    /// Create an empty store on the system clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Create an empty store reading time from `clock`.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            clock,
            ttl: TimeDelta::seconds(DEFAULT_TTL_SECS),
        }
    }

    /// Override the expiry window.
    pub fn with_ttl(mut self, ttl: TimeDelta) -> Self {
        self.ttl = ttl;
        self
    }

    /// Number of stored entries, expired ones included.
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .map(|e| e.len())
            .unwrap_or_else(|e| e.into_inner().len())
    }

    /// Whether nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<SessionRecord>> {
        let entries = self
            .entries
            .read()
            .map_err(|_| AkinatorError::LockPoisoned)?;
        let now = self.clock.now();
        Ok(entries
            .get(key)
            .filter(|entry| entry.is_live(now))
            .map(|entry| entry.data.clone()))
    }

    fn set(&self, key: &str, record: SessionRecord) -> Result<()> {
        let entry = StoredEntry {
            data: record,
            expires_at: self.clock.now() + self.ttl,
        };
        let mut entries = self
            .entries
            .write()
            .map_err(|_| AkinatorError::LockPoisoned)?;
        entries.insert(key.to_string(), entry);
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| AkinatorError::LockPoisoned)?;
        entries.remove(key);
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| AkinatorError::LockPoisoned)?;
        entries.clear();
        Ok(())
    }
}
