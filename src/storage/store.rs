//! The persistent key-value store boundary.
//!
//! Everything the tracker persists goes through [`Store`]: a handful of
//! fixed keys mapping to JSON strings. Corruption behind this boundary is
//! never surfaced as a failure; a record that cannot be parsed is logged
//! and treated as absent.

use std::{collections::BTreeMap, fs, io, path::PathBuf};

use serde::{Serialize, de::DeserializeOwned};

/// The fixed keys the tracker persists under.
///
/// The names match the records the app has always written, so existing
/// installations load unchanged.
pub mod keys {
    /// The business profile record.
    pub const BUSINESS_INFO: &str = "businessInfo";
    /// Flag set once onboarding finishes.
    pub const ONBOARDING_COMPLETE: &str = "onboardingComplete";
    /// Map of compliance item id to completion status.
    pub const COMPLIANCE_STATUSES: &str = "complianceStatuses";
    /// The loan repayment collection.
    pub const LOAN_REPAYMENTS: &str = "loanRepayments";
    /// The vehicle renewal collection.
    pub const VEHICLE_RENEWALS: &str = "vehicleRenewals";
    /// Flag enabling SMS reminders.
    pub const SMS_REMINDERS_ENABLED: &str = "smsRemindersEnabled";
    /// Phone number SMS reminders go to.
    pub const REMINDER_PHONE_NUMBER: &str = "reminderPhoneNumber";
}

/// Error returned when the store cannot be written to.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Writing a record failed.
    #[error("failed to write record '{key}': {source}")]
    Write {
        /// The key being written.
        key: String,
        /// The underlying I/O error.
        source: io::Error,
    },
    /// Removing a record failed.
    #[error("failed to remove record '{key}': {source}")]
    Remove {
        /// The key being removed.
        key: String,
        /// The underlying I/O error.
        source: io::Error,
    },
}

/// Key-value persistence of JSON-serializable records.
///
/// Reads are infallible: a missing or unreadable record is `None`. Writes
/// are synchronous; when a mutating call returns, the record is persisted.
pub trait Store {
    /// Returns the raw value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Write`] if the value cannot be persisted.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Removes the value stored under `key`. Removing an absent key is not
    /// an error.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Remove`] if the record exists but cannot be
    /// removed.
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// Reads and parses a JSON record, treating corruption as absence.
pub(crate) fn get_json<T: DeserializeOwned>(store: &impl Store, key: &str) -> Option<T> {
    let raw = store.get(key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::debug!("Discarding corrupt record under '{key}': {e}");
            None
        }
    }
}

/// Serializes and writes a JSON record.
pub(crate) fn set_json<T: Serialize>(
    store: &mut impl Store,
    key: &str,
    value: &T,
) -> Result<(), StoreError> {
    let raw = serde_json::to_string(value).expect("in-memory records always serialize");
    store.set(key, &raw)
}

/// A file-backed store: one `<key>.json` file per record under a data
/// directory, created on first write.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Opens a store rooted at the given data directory.
    #[must_use]
    pub const fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// The data directory this store writes into.
    #[must_use]
    pub fn root(&self) -> &std::path::Path {
        &self.root
    }

    fn path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

impl Store for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        match fs::read_to_string(self.path(key)) {
            Ok(raw) => Some(raw),
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => {
                tracing::debug!("Failed to read record '{key}': {e}");
                None
            }
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        fs::create_dir_all(&self.root).map_err(|source| StoreError::Write {
            key: key.to_string(),
            source,
        })?;
        fs::write(self.path(key), value).map_err(|source| StoreError::Write {
            key: key.to_string(),
            source,
        })
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        match fs::remove_file(self.path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StoreError::Remove {
                key: key.to_string(),
                source,
            }),
        }
    }
}

/// An in-memory store for tests and benchmarks.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: BTreeMap<String, String>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Store for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.records.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.records.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.records.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_store_round_trips_values() {
        let tmp = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(tmp.path().join("data"));

        assert_eq!(store.get("businessInfo"), None);
        store.set("businessInfo", r#"{"name":"Shop"}"#).unwrap();
        assert_eq!(store.get("businessInfo").as_deref(), Some(r#"{"name":"Shop"}"#));

        store.remove("businessInfo").unwrap();
        assert_eq!(store.get("businessInfo"), None);
    }

    #[test]
    fn removing_an_absent_key_is_not_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(tmp.path().to_path_buf());
        store.remove("nothing-here").unwrap();
    }

    #[test]
    fn corrupt_json_reads_as_absent() {
        let mut store = MemoryStore::new();
        store.set("loanRepayments", "{not json").unwrap();

        let loans: Option<Vec<crate::domain::LoanRepayment>> =
            get_json(&store, "loanRepayments");
        assert!(loans.is_none());
    }

    #[test]
    fn set_json_writes_parseable_records() {
        let mut store = MemoryStore::new();
        set_json(&mut store, "complianceStatuses", &BTreeMap::from([("a", "b")])).unwrap();

        let back: BTreeMap<String, String> = get_json(&store, "complianceStatuses").unwrap();
        assert_eq!(back.get("a").map(String::as_str), Some("b"));
    }
}
