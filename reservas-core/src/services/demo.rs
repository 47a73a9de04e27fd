//! Demo service - load sample users and reservations
//!
//! Seeding overwrites both collections. The session and the default role
//! are left alone.

use rand::Rng;
use serde::Serialize;

use crate::adapters::demo::{generate_demo_reservations, generate_demo_users};
use crate::domain::result::Result;
use crate::domain::User;

use super::directory::UserDirectory;
use super::ledger::ReservationLedger;

#[derive(Debug, Serialize)]
pub struct DemoSummary {
    pub users: usize,
    pub reservations: usize,
}

pub struct DemoService {
    directory: UserDirectory,
    ledger: ReservationLedger,
}

impl DemoService {
    pub fn new(directory: UserDirectory, ledger: ReservationLedger) -> Self {
        Self { directory, ledger }
    }

    pub fn seed(&self) -> Result<DemoSummary> {
        self.seed_with(&mut rand::thread_rng())
    }

    /// Seed using the given random source
    pub fn seed_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<DemoSummary> {
        let scheme = self.directory.scheme();
        let users = generate_demo_users()
            .into_iter()
            .map(|(mut user, password)| {
                user.password = scheme.hash(password)?;
                Ok(user)
            })
            .collect::<Result<Vec<User>>>()?;
        let reservations = generate_demo_reservations(self.ledger.today(), rng);

        self.directory.replace_all(&users)?;
        self.ledger.replace_all(&reservations)?;

        Ok(DemoSummary {
            users: users.len(),
            reservations: reservations.len(),
        })
    }
}
