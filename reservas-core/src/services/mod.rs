//! Service layer - business logic orchestration
//!
//! Services coordinate domain logic and port interactions. Each service
//! focuses on a specific use case or feature area.

mod credentials;
mod dashboard;
mod default_role;
mod demo;
mod directory;
mod ledger;
pub mod logging;
pub mod migration;
mod session;

pub use credentials::PasswordScheme;
pub use dashboard::{
    AdminOverview, AdminRow, ClientReservations, Dashboard, DashboardService, OperatorAgenda,
    UNKNOWN_OWNER,
};
pub use default_role::DefaultRoleSetting;
pub use demo::{DemoService, DemoSummary};
pub use directory::UserDirectory;
pub use ledger::ReservationLedger;
pub use logging::{
    EntryPoint, EventCount, LogEntry, LogEvent, LogFilter, LogSummary, LoggingService,
};
pub use migration::{MigrationResult, MigrationService};
pub use session::SessionContext;
