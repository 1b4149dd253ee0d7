//! Sled-backed key/value persistence for the list store

use crate::error::StorageError;
use crate::store::KeyValueBackend;
use std::path::Path;

const TREE_VALUES: &str = "entrylist_values";

/// Sled-based implementation of [`KeyValueBackend`]
#[derive(Clone)]
pub struct SledBackend {
    db: sled::Db,
    values: sled::Tree,
}

impl SledBackend {
    /// Open (or create) a sled database at the given directory
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let db = sled::open(path)
            .map_err(|e| to_storage_io("Failed to open sled database", e))?;
        Self::from_db(db)
    }

    /// Use an already opened database
    pub fn from_db(db: sled::Db) -> Result<Self, StorageError> {
        let values = db
            .open_tree(TREE_VALUES)
            .map_err(|e| to_storage_io("Failed to open value tree", e))?;
        Ok(Self { db, values })
    }

    /// Get the underlying sled database (for advanced operations)
    pub fn db(&self) -> &sled::Db {
        &self.db
    }

    /// Flush all pending writes to disk
    pub fn flush(&self) -> Result<(), StorageError> {
        self.db
            .flush()
            .map_err(|e| to_storage_io("Failed to flush database", e))?;
        Ok(())
    }
}

impl KeyValueBackend for SledBackend {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let Some(raw) = self
            .values
            .get(key.as_bytes())
            .map_err(|e| to_storage_io("Failed to get value", e))?
        else {
            return Ok(None);
        };
        let value = String::from_utf8(raw.to_vec()).map_err(|e| StorageError::Malformed {
            key: key.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Some(value))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values
            .insert(key.as_bytes(), value.as_bytes())
            .map_err(|e| to_storage_io("Failed to put value", e))?;
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.values
            .remove(key.as_bytes())
            .map_err(|e| to_storage_io("Failed to delete value", e))?;
        Ok(())
    }

    fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, StorageError> {
        let mut keys = Vec::new();
        for item in self.values.scan_prefix(prefix.as_bytes()) {
            let (key, _) = item.map_err(|e| to_storage_io("Failed to iterate store", e))?;
            match String::from_utf8(key.to_vec()) {
                Ok(key) => keys.push(key),
                // non-UTF8 keys are never written by this crate
                Err(_) => continue,
            }
        }
        Ok(keys)
    }
}

fn to_storage_io(context: &str, err: sled::Error) -> StorageError {
    StorageError::IoError(std::io::Error::new(
        std::io::ErrorKind::Other,
        format!("{}: {}", context, err),
    ))
}
