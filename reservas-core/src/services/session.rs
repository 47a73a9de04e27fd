//! Session context - the currently authenticated user

use std::sync::Arc;

use crate::domain::result::{Error, Result};
use crate::domain::User;
use crate::ports::{keys, JsonStoreExt, KeyValueStore};

use super::directory::UserDirectory;

/// Holds a snapshot of the logged-in user
///
/// The snapshot is taken at login and does not follow later changes to
/// the directory.
#[derive(Clone)]
pub struct SessionContext {
    store: Arc<dyn KeyValueStore>,
}

impl SessionContext {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Replace any previous session with `user`
    pub fn establish(&self, user: &User) -> Result<()> {
        self.store.save(keys::CURRENT_SESSION, user)
    }

    pub fn current(&self) -> Result<Option<User>> {
        self.store.load(keys::CURRENT_SESSION)
    }

    /// Current user, or `NotAuthenticated`
    pub fn require(&self) -> Result<User> {
        self.current()?.ok_or(Error::NotAuthenticated)
    }

    pub fn clear(&self) -> Result<()> {
        self.store.remove(keys::CURRENT_SESSION)
    }

    /// Authenticate and, on success, establish the session
    ///
    /// A failed login leaves the previous session in place.
    pub fn login(&self, directory: &UserDirectory, email: &str, password: &str) -> Result<User> {
        let user = directory.authenticate(email, password)?;
        self.establish(&user)?;
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::MemoryStore;
    use crate::domain::Role;
    use crate::ports::MaxPlusOne;
    use crate::services::PasswordScheme;

    fn setup() -> (UserDirectory, SessionContext) {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let directory =
            UserDirectory::new(Arc::clone(&store), Arc::new(MaxPlusOne), PasswordScheme::Plain);
        (directory, SessionContext::new(store))
    }

    #[test]
    fn test_establish_current_clear() {
        let (directory, session) = setup();
        let ana = directory.register("Ana", "ana@x.com", "p1", Role::Client).unwrap();

        assert!(session.current().unwrap().is_none());
        session.establish(&ana).unwrap();
        assert_eq!(session.current().unwrap(), Some(ana));

        session.clear().unwrap();
        assert!(session.current().unwrap().is_none());
        assert!(matches!(session.require(), Err(Error::NotAuthenticated)));
    }

    #[test]
    fn test_login_replaces_previous_session() {
        let (directory, session) = setup();
        directory.register("Ana", "ana@x.com", "p1", Role::Client).unwrap();
        directory.register("Luis", "luis@x.com", "p2", Role::Admin).unwrap();

        session.login(&directory, "ana@x.com", "p1").unwrap();
        session.login(&directory, "luis@x.com", "p2").unwrap();
        assert_eq!(session.require().unwrap().name, "Luis");

        assert!(session.login(&directory, "luis@x.com", "nope").is_err());
        assert_eq!(session.require().unwrap().name, "Luis");
    }

    #[test]
    fn test_session_is_a_snapshot() {
        let (directory, session) = setup();
        let ana = directory.register("Ana", "ana@x.com", "p1", Role::Client).unwrap();
        session.establish(&ana).unwrap();

        let mut renamed = ana.clone();
        renamed.name = "Ana María".to_string();
        renamed.role = Role::Admin;
        directory.replace_all(&[renamed]).unwrap();

        let current = session.require().unwrap();
        assert_eq!(current.name, "Ana");
        assert_eq!(current.role, Role::Client);
    }
}
