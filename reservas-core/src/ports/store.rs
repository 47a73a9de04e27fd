//! Store port - synchronous key-value persistence

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::domain::result::Result;

/// Keys of the persisted records
pub mod keys {
    /// JSON array of users
    pub const USERS: &str = "sr_users";
    /// JSON array of reservations
    pub const RESERVATIONS: &str = "sr_reservations";
    /// Snapshot of the logged-in user
    pub const CURRENT_SESSION: &str = "sr_current";
    /// Role applied to self-registrations
    pub const DEFAULT_ROLE: &str = "sr_default_role";
}

/// Raw key-value storage
///
/// Values are opaque strings; every call is a complete synchronous round
/// trip. Adapters provide the actual backend.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`; removing an absent key is not an error
    fn remove(&self, key: &str) -> Result<()>;
}

/// JSON helpers over any [`KeyValueStore`]
pub trait JsonStoreExt: KeyValueStore {
    fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.get(key)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Load a collection, treating a missing key as empty
    fn load_or_default<T: DeserializeOwned + Default>(&self, key: &str) -> Result<T> {
        Ok(self.load(key)?.unwrap_or_default())
    }

    fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value)?;
        self.set(key, &raw)
    }
}

impl<S: KeyValueStore + ?Sized> JsonStoreExt for S {}
