//! List Store
//!
//! Persistent storage of named lists per (site, user), the per-identity list
//! index ("list of lists"), and the last user seen on each site.
//!
//! Values live in a flat key/value namespace (see [`keys`]); the index can
//! drift from the bodies it names and is regenerated from a key scan
//! whenever it is missing, malformed or stale.

pub mod keys;
pub mod lists;
pub mod memory;
pub mod persistence;

pub use keys::StorageKeys;
pub use lists::KvListStore;
pub use memory::MemoryBackend;
pub use persistence::SledBackend;

use crate::context::UserInfo;
use crate::error::StorageError;
use std::collections::BTreeMap;

/// One list: entry id -> display name. Last write wins on duplicate ids.
pub type List = BTreeMap<String, String>;

/// All lists of one (site, user), keyed by list name
pub type Lists = BTreeMap<String, List>;

/// Flat string key/value backend.
///
/// Values are serialized JSON documents. Implementations only move strings;
/// parsing and index maintenance belong to [`KvListStore`].
pub trait KeyValueBackend: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove a key; removing an absent key is not an error
    fn delete(&self, key: &str) -> Result<(), StorageError>;

    /// All stored keys starting with `prefix`, in ascending order
    fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, StorageError>;
}

/// List persistence contract consumed by the engine.
///
/// Reads never fail: read or parse errors are logged and treated as absence.
/// Writes return their outcome so callers can observe completion.
pub trait ListStore: Send + Sync {
    /// All lists stored for the identity, healing the list index if needed
    fn load(&self, site: &str, user: &str) -> Lists;

    /// Write one list body, adding its name to the index when new
    fn save(&self, site: &str, user: &str, list_name: &str, list: &List) -> Result<(), StorageError>;

    /// Remove one list body and its index entry; no-op when absent
    fn delete_one(&self, site: &str, user: &str, list_name: &str) -> Result<(), StorageError>;

    /// Remove the index and every list body it referenced
    fn delete_all(&self, site: &str, user: &str) -> Result<(), StorageError>;

    /// Names in the list index, regenerating it when missing or malformed
    fn list_names(&self, site: &str, user: &str) -> Vec<String>;

    /// Persist the last user seen on `site`
    fn remember_user(&self, site: &str, user: &UserInfo) -> Result<(), StorageError>;

    /// The last user remembered for `site`, if any
    fn recall_user(&self, site: &str) -> Option<UserInfo>;
}
