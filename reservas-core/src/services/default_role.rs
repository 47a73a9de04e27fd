//! Default role for self-registration

use std::sync::Arc;

use crate::domain::result::Result;
use crate::domain::Role;
use crate::ports::{keys, KeyValueStore};

/// Role given to users who register themselves
///
/// Stored as the bare role name, not JSON. Unset reads as `cliente`.
#[derive(Clone)]
pub struct DefaultRoleSetting {
    store: Arc<dyn KeyValueStore>,
}

impl DefaultRoleSetting {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn get(&self) -> Result<Role> {
        match self.store.get(keys::DEFAULT_ROLE)? {
            Some(raw) => raw.parse(),
            None => Ok(Role::default()),
        }
    }

    /// Whether a role was ever chosen (the one-time prompt is pending otherwise)
    pub fn is_set(&self) -> Result<bool> {
        Ok(self.store.get(keys::DEFAULT_ROLE)?.is_some())
    }

    pub fn set(&self, role: Role) -> Result<()> {
        self.store.set(keys::DEFAULT_ROLE, role.as_str())
    }
}
