//! CLI command implementations

pub mod config;
pub mod dashboard;
pub mod demo;
pub mod logs;
pub mod register;
pub mod reserve;
pub mod role;
pub mod session;
pub mod stats;
pub mod users;

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Serialize;

use reservas_core::{EntryPoint, LogEvent, LoggingService, ReservasContext, Role, User};

/// Get the logging service for CLI operations
///
/// Returns None if logging fails to initialize (shouldn't block operations)
pub fn get_logger() -> Option<LoggingService> {
    let data_dir = get_data_dir().ok()?;
    std::fs::create_dir_all(&data_dir).ok()?;
    LoggingService::new(&data_dir, EntryPoint::Cli, env!("CARGO_PKG_VERSION")).ok()
}

/// Log an event, ignoring any errors (logging should never break the app)
pub fn log_event(logger: &Option<LoggingService>, event: LogEvent) {
    if let Some(l) = logger {
        let _ = l.log(event);
    }
}

/// Get the data directory from `SR_DIR` or default to `~/.reservas`
pub fn get_data_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("SR_DIR") {
        return Ok(PathBuf::from(dir));
    }
    let home = dirs::home_dir().context("Could not find home directory (set SR_DIR)")?;
    Ok(home.join(".reservas"))
}

/// Get or create the reservas context
pub fn get_context() -> Result<ReservasContext> {
    let data_dir = get_data_dir()?;

    std::fs::create_dir_all(&data_dir)
        .with_context(|| format!("Failed to create data directory: {:?}", data_dir))?;

    ReservasContext::new(&data_dir).context("Failed to initialize reservas context")
}

/// The logged-in user, with a hint when nobody is
pub fn require_user(ctx: &ReservasContext) -> Result<User> {
    ctx.current_user()
        .context("Run 'sr login' or 'sr register' first")
}

/// A user as printed by the CLI; never includes the stored password
#[derive(Serialize)]
pub struct UserView<'a> {
    pub id: u64,
    pub name: &'a str,
    pub email: &'a str,
    pub role: Role,
}

impl<'a> From<&'a User> for UserView<'a> {
    fn from(user: &'a User) -> Self {
        Self {
            id: user.id,
            name: &user.name,
            email: &user.email,
            role: user.role,
        }
    }
}
