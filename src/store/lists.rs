//! [`ListStore`] over any [`KeyValueBackend`], with list index self-heal.

use super::keys::{self, StorageKeys};
use super::{KeyValueBackend, List, ListStore, Lists};
use crate::context::UserInfo;
use crate::error::StorageError;
use serde::de::DeserializeOwned;
use tracing::{debug, error, warn};

/// List store persisting JSON documents into a key/value backend
pub struct KvListStore<B> {
    backend: B,
}

impl<B: KeyValueBackend> KvListStore<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Read and parse a JSON value; every failure reads as absence
    fn read_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.backend.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                error!(key, error = %e, "Error reading stored value");
                return None;
            }
        };
        if raw.is_empty() {
            return None;
        }
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                error!(key, error = %e, "Error loading saved value");
                None
            }
        }
    }

    fn write_json<T: serde::Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let json = serde_json::to_string(value).map_err(|e| StorageError::Malformed {
            key: key.to_string(),
            reason: e.to_string(),
        })?;
        self.backend.set(key, &json)
    }

    /// Names of the list bodies actually present
    fn stored_names(&self, keys: &StorageKeys<'_>) -> Result<Vec<String>, StorageError> {
        let found = self.backend.keys_with_prefix(&keys.list_prefix())?;
        Ok(found
            .iter()
            .filter_map(|key| keys.list_name_from_key(key))
            .map(str::to_string)
            .collect())
    }

    /// Rebuild the list index from the bodies actually present, and save it.
    /// A failed scan leaves the stored index untouched.
    fn regenerate_index(&self, keys: &StorageKeys<'_>) -> Result<Vec<String>, StorageError> {
        let names = self.stored_names(keys).map_err(|e| {
            error!(prefix = %keys.list_prefix(), error = %e, "Cannot scan stored lists");
            e
        })?;

        if let Err(e) = self.write_json(&keys.list_index(), &names) {
            error!(key = %keys.list_index(), error = %e, "Cannot save regenerated list index");
        }
        debug!(key = %keys.list_index(), lists = names.len(), "List index regenerated");
        Ok(names)
    }

    /// The list index, regenerated when missing or not an array of names
    fn load_index(&self, keys: &StorageKeys<'_>) -> Result<Vec<String>, StorageError> {
        match self.read_json::<Vec<String>>(&keys.list_index()) {
            Some(names) => Ok(names),
            None => {
                warn!(key = %keys.list_index(), "List index missing or malformed, regenerating");
                self.regenerate_index(keys)
            }
        }
    }
}

impl<B: KeyValueBackend> ListStore for KvListStore<B> {
    fn load(&self, site: &str, user: &str) -> Lists {
        let keys = StorageKeys::new(site, user);
        let Ok(mut names) = self.load_index(&keys) else {
            return Lists::new();
        };

        let mut stale_index = false;
        match self.stored_names(&keys) {
            Ok(stored) => {
                for name in stored {
                    if !names.contains(&name) {
                        warn!(site, user, list = %name, "Stored list missing from index");
                        names.push(name);
                        stale_index = true;
                    }
                }
            }
            Err(e) => error!(prefix = %keys.list_prefix(), error = %e, "Cannot scan stored lists"),
        }

        let mut lists = Lists::new();
        for name in names {
            match self.read_json::<List>(&keys.list(&name)) {
                Some(list) => {
                    lists.insert(name, list);
                }
                None => {
                    warn!(site, user, list = %name, "Indexed list cannot be loaded, dropping it");
                    stale_index = true;
                }
            }
        }
        if stale_index {
            let _ = self.regenerate_index(&keys);
        }
        lists
    }

    fn save(&self, site: &str, user: &str, list_name: &str, list: &List) -> Result<(), StorageError> {
        let keys = StorageKeys::new(site, user);
        let mut names = self.load_index(&keys)?;

        if !names.iter().any(|n| n == list_name) {
            names.push(list_name.to_string());
            self.write_json(&keys.list_index(), &names)?;
        }

        self.write_json(&keys.list(list_name), list)
    }

    fn delete_one(&self, site: &str, user: &str, list_name: &str) -> Result<(), StorageError> {
        let keys = StorageKeys::new(site, user);
        let mut names = self.load_index(&keys)?;

        if let Some(pos) = names.iter().position(|n| n == list_name) {
            names.remove(pos);
            self.write_json(&keys.list_index(), &names)?;
        }

        self.backend.delete(&keys.list(list_name))
    }

    fn delete_all(&self, site: &str, user: &str) -> Result<(), StorageError> {
        let keys = StorageKeys::new(site, user);
        let names = self.load_index(&keys)?;

        self.backend.delete(&keys.list_index())?;
        for name in names {
            self.backend.delete(&keys.list(&name))?;
        }
        Ok(())
    }

    fn list_names(&self, site: &str, user: &str) -> Vec<String> {
        self.load_index(&StorageKeys::new(site, user)).unwrap_or_default()
    }

    fn remember_user(&self, site: &str, user: &UserInfo) -> Result<(), StorageError> {
        self.write_json(&keys::last_user(site), &user.name)?;
        match &user.payload {
            Some(payload) => self.write_json(&keys::last_user_payload(site), payload),
            None => self.backend.delete(&keys::last_user_payload(site)),
        }
    }

    fn recall_user(&self, site: &str) -> Option<UserInfo> {
        let name: String = self.read_json(&keys::last_user(site))?;
        if name.is_empty() {
            return None;
        }
        let payload = self.read_json(&keys::last_user_payload(site));
        Some(UserInfo { name, payload })
    }
}
