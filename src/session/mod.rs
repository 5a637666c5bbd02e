//! Session state module.
//!
//! This module holds the per-game token state the service hands out, the
//! identifiers it is keyed by, and the expiring stores that persist it.

mod clock;
mod file_store;
mod id;
mod record;
mod store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use file_store::{FileStore, DEFAULT_STORE_PATH};
pub use id::GameId;
pub use record::{SessionRecord, INITIAL_PROGRESS};
pub use store::{MemoryStore, SessionStore, StoredEntry, DEFAULT_TTL_SECS};
