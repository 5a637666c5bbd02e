//! JSON-file session store.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::TimeDelta;
use tracing::{debug, warn};

use super::store::{StoredEntry, DEFAULT_TTL_SECS};
use super::{Clock, SessionRecord, SessionStore, SystemClock};
use crate::Result;

/// Default location of the store file, relative to the working directory.
pub const DEFAULT_STORE_PATH: &str = "cache/akinator.json";

type Entries = HashMap<String, StoredEntry>;

/// Session store backed by a single JSON file.
///
/// The whole file is read before every operation and rewritten after every
/// mutation. There is no locking: several processes (or several stores in one
/// process) writing the same file concurrently lose updates, last writer wins.
pub struct FileStore {
    path: PathBuf,
    clock: Arc<dyn Clock>,
    ttl: TimeDelta,
}

impl FileStore {
    /// Open a store at `path`, creating its parent directory if needed.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        Ok(Self {
            path,
            clock: Arc::new(SystemClock),
            ttl: TimeDelta::seconds(DEFAULT_TTL_SECS),
        })
    }

    /// Open the store at [`DEFAULT_STORE_PATH`].
    pub fn open_default() -> Result<Self> {
        Self::open(DEFAULT_STORE_PATH)
    }

    /// Read time from `clock` instead of the system clock.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Override the expiry window.
    pub fn with_ttl(mut self, ttl: TimeDelta) -> Self {
        self.ttl = ttl;
        self
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Entries> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Entries::new()),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str(&content) {
            Ok(entries) => Ok(entries),
            Err(e) => {
                warn!(path = %self.path.display(), "discarding unreadable session store: {}", e);
                Ok(Entries::new())
            }
        }
    }

    fn save(&self, entries: &Entries) -> Result<()> {
        let content = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, content)?;
        debug!(path = %self.path.display(), entries = entries.len(), "session store written");
        Ok(())
    }
}

impl SessionStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<SessionRecord>> {
        let now = self.clock.now();
        Ok(self
            .load()?
            .remove(key)
            .filter(|entry| entry.is_live(now))
            .map(|entry| entry.data))
    }

    fn set(&self, key: &str, record: SessionRecord) -> Result<()> {
        let mut entries = self.load()?;
        entries.insert(
            key.to_string(),
            StoredEntry {
                data: record,
                expires_at: self.clock.now() + self.ttl,
            },
        );
        self.save(&entries)
    }

    fn delete(&self, key: &str) -> Result<()> {
        let mut entries = self.load()?;
        if entries.remove(key).is_some() {
            self.save(&entries)?;
        }
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
