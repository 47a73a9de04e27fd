//! User directory - registration and authentication

use std::sync::Arc;

use crate::domain::result::{Error, Result};
use crate::domain::validation::require_field;
use crate::domain::{Role, User};
use crate::ports::{keys, IdAllocator, JsonStoreExt, KeyValueStore};

use super::credentials::PasswordScheme;

/// User records and identity operations
#[derive(Clone)]
pub struct UserDirectory {
    store: Arc<dyn KeyValueStore>,
    ids: Arc<dyn IdAllocator>,
    scheme: PasswordScheme,
}

impl UserDirectory {
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        ids: Arc<dyn IdAllocator>,
        scheme: PasswordScheme,
    ) -> Self {
        Self { store, ids, scheme }
    }

    pub fn scheme(&self) -> PasswordScheme {
        self.scheme
    }

    /// Register a new user
    ///
    /// Fields are trimmed and must be non-blank. Fails with
    /// `DuplicateEmail` when the email is taken, leaving the directory
    /// untouched.
    pub fn register(&self, name: &str, email: &str, password: &str, role: Role) -> Result<User> {
        let name = require_field("name", name)?;
        let email = require_field("email", email)?;
        let password = require_field("password", password)?;

        let mut users = self.list_users()?;
        if users.iter().any(|u| u.email == email) {
            return Err(Error::DuplicateEmail(email));
        }

        let id = self.ids.next_id(users.iter().map(|u| u.id).max());
        let user = User::new(id, name, email, self.scheme.hash(&password)?, role);
        users.push(user.clone());
        self.store.save(keys::USERS, &users)?;

        Ok(user)
    }

    /// Find the user with exactly this email and password
    ///
    /// Case-sensitive, no trimming. A matching email whose stored password
    /// the active scheme cannot read (plain text under `argon2`) fails with
    /// `Credential` instead of `InvalidCredentials`.
    pub fn authenticate(&self, email: &str, password: &str) -> Result<User> {
        let mut unreadable = false;
        for user in self.list_users()?.into_iter().filter(|u| u.email == email) {
            if !self.scheme.recognizes(&user.password) {
                unreadable = true;
            } else if self.scheme.verify(password, &user.password) {
                return Ok(user);
            }
        }

        if unreadable {
            return Err(Error::Credential(format!(
                "password for {} was not stored with the {} scheme; \
                 set passwordScheme back or re-register the user",
                email, self.scheme
            )));
        }
        Err(Error::InvalidCredentials)
    }

    /// Users whose stored password `scheme` could not check
    pub fn count_unreadable(&self, scheme: PasswordScheme) -> Result<usize> {
        Ok(self
            .list_users()?
            .iter()
            .filter(|u| !scheme.recognizes(&u.password))
            .count())
    }

    pub fn list_users(&self) -> Result<Vec<User>> {
        self.store.load_or_default(keys::USERS)
    }

    pub fn find_by_id(&self, id: u64) -> Result<Option<User>> {
        Ok(self.list_users()?.into_iter().find(|u| u.id == id))
    }

    /// Overwrite the whole collection (demo seeding)
    pub fn replace_all(&self, users: &[User]) -> Result<()> {
        self.store.save(keys::USERS, users)
    }
}
