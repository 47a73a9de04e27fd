//! Reservas Core - Business logic for reservation management
//!
//! This crate implements the core domain logic following hexagonal architecture:
//!
//! - **domain**: Core entities (User, Reservation, Statistics) and validation
//! - **ports**: Trait definitions for external dependencies (KeyValueStore, IdAllocator, Clock)
//! - **services**: Business logic orchestration (directory, ledger, session, dashboards)
//! - **adapters**: Concrete implementations (DuckDB and in-memory stores, demo data)

pub mod adapters;
pub mod config;
pub mod domain;
mod log_migrations;
mod migrations;
pub mod ports;
pub mod services;

use std::path::Path;
use std::sync::Arc;

use adapters::duckdb::DuckDbStore;
use adapters::memory::MemoryStore;
use config::{Config, IdAllocation, StorageBackend};
use ports::{AtomicSequence, Clock, IdAllocator, KeyValueStore, MaxPlusOne, SystemClock};
use services::*;

// Re-export commonly used types at crate root
pub use domain::result::{Error, OperationResult, Result};
pub use domain::{
    NewReservation, Reservation, ReservationPatch, ReservationStatus, Role, Statistics, User,
};
pub use services::{EntryPoint, LogEvent, LogFilter, LoggingService};

/// File name of the store inside the data directory
pub const STORE_FILENAME: &str = "reservas.duckdb";

/// Main context for Reservas operations
///
/// Holds the store and every service wired to it. All services share the
/// same store handle.
pub struct ReservasContext {
    pub config: Config,
    pub store: Arc<dyn KeyValueStore>,
    pub users: UserDirectory,
    pub session: SessionContext,
    pub ledger: ReservationLedger,
    pub default_role: DefaultRoleSetting,
    pub dashboard: DashboardService,
    pub demo: DemoService,
}

impl ReservasContext {
    /// Open the context for a data directory, following its settings
    pub fn new(data_dir: &Path) -> Result<Self> {
        let config = Config::load(data_dir)?;

        let store: Arc<dyn KeyValueStore> = match config.storage {
            StorageBackend::Duckdb => Arc::new(DuckDbStore::open(&data_dir.join(STORE_FILENAME))?),
            StorageBackend::Memory => Arc::new(MemoryStore::new()),
        };

        Ok(Self::with_store(config, store, Arc::new(SystemClock)))
    }

    /// Wire services over an existing store and clock
    pub fn with_store(config: Config, store: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        let users = UserDirectory::new(
            Arc::clone(&store),
            id_allocator(config.id_allocation),
            config.password_scheme,
        );
        let ledger = ReservationLedger::new(
            Arc::clone(&store),
            id_allocator(config.id_allocation),
            clock,
        );
        let session = SessionContext::new(Arc::clone(&store));
        let default_role = DefaultRoleSetting::new(Arc::clone(&store));
        let dashboard = DashboardService::new(users.clone(), ledger.clone());
        let demo = DemoService::new(users.clone(), ledger.clone());

        Self {
            config,
            store,
            users,
            session,
            ledger,
            default_role,
            dashboard,
            demo,
        }
    }

    /// Context over a fresh in-memory store
    pub fn in_memory(clock: Arc<dyn Clock>) -> Self {
        let config = Config {
            storage: StorageBackend::Memory,
            ..Config::default()
        };
        Self::with_store(config, Arc::new(MemoryStore::new()), clock)
    }

    /// Register a user with the configured default role
    pub fn self_register(&self, name: &str, email: &str, password: &str) -> Result<User> {
        let role = self.default_role.get()?;
        self.users.register(name, email, password, role)
    }

    /// Logged-in user, or `NotAuthenticated`
    pub fn current_user(&self) -> Result<User> {
        self.session.require()
    }
}

/// One allocator per collection
fn id_allocator(allocation: IdAllocation) -> Arc<dyn IdAllocator> {
    match allocation {
        IdAllocation::MaxPlusOne => Arc::new(MaxPlusOne),
        IdAllocation::Sequence => Arc::new(AtomicSequence::new()),
    }
}
