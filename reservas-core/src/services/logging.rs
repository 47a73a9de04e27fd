//! Logging service - structured event logging to DuckDB
//!
//! Stores events in logs.duckdb next to the data. Events name what
//! happened and which role did it; passwords, emails and reservation
//! contents are never logged.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

use anyhow::{anyhow, Result};
use chrono::{Duration, Utc};
use duckdb::Connection;
use serde::{Deserialize, Serialize};

use crate::domain::Role;
use crate::log_migrations::LOG_MIGRATIONS;
use crate::services::MigrationService;

/// Disambiguates ids created within the same millisecond
static ID_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Millisecond timestamp in the upper bits, 16-bit counter in the lower
fn generate_id(now_ms: i64) -> u64 {
    let counter = ID_COUNTER.fetch_add(1, Ordering::Relaxed) & 0xFFFF;
    ((now_ms as u64) << 16) | counter
}

fn detect_platform() -> &'static str {
    if cfg!(target_os = "macos") {
        "macos"
    } else if cfg!(target_os = "windows") {
        "windows"
    } else if cfg!(target_os = "linux") {
        "linux"
    } else {
        "unknown"
    }
}

/// Who is driving the core
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryPoint {
    Cli,
    Library,
}

impl EntryPoint {
    fn as_str(&self) -> &'static str {
        match self {
            EntryPoint::Cli => "cli",
            EntryPoint::Library => "library",
        }
    }
}

/// A log event to be recorded
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEvent {
    pub event: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_details: Option<String>,
}

impl LogEvent {
    pub fn new(event: impl Into<String>) -> Self {
        Self {
            event: event.into(),
            command: None,
            role: None,
            error_message: None,
            error_details: None,
        }
    }

    /// CLI command that produced the event (`reserve confirm`, `login`)
    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.command = Some(command.into());
        self
    }

    /// Role of the acting user
    pub fn with_role(mut self, role: Role) -> Self {
        self.role = Some(role.as_str().to_string());
        self
    }

    pub fn with_error(mut self, message: impl Into<String>) -> Self {
        self.error_message = Some(message.into());
        self
    }

    pub fn with_error_details(mut self, details: impl Into<String>) -> Self {
        self.error_details = Some(details.into());
        self
    }
}

/// A log entry as stored in the database
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: u64,
    pub timestamp: i64,
    pub entry_point: String,
    pub app_version: String,
    pub platform: String,
    pub event: String,
    pub command: Option<String>,
    pub role: Option<String>,
    pub error_message: Option<String>,
    pub error_details: Option<String>,
}

/// Which entries `query` returns; empty fields match everything
#[derive(Debug, Clone, Default)]
pub struct LogFilter {
    pub event: Option<String>,
    /// Matches the command and its subcommands (`reserve` matches `reserve cancel`)
    pub command: Option<String>,
    pub role: Option<Role>,
    pub errors_only: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventCount {
    pub name: String,
    pub count: u64,
}

/// Totals over the whole log
#[derive(Debug, Clone, Serialize)]
pub struct LogSummary {
    pub total: u64,
    pub errors: u64,
    /// Timestamp (unix ms) of the oldest entry
    pub oldest: Option<i64>,
    /// Most frequent first
    pub by_event: Vec<EventCount>,
    /// Entries recorded with an acting role, most frequent first
    pub by_role: Vec<EventCount>,
}

impl LogSummary {
    pub fn event_count(&self, event: &str) -> u64 {
        self.by_event
            .iter()
            .find(|e| e.name == event)
            .map_or(0, |e| e.count)
    }
}

const SELECT_ENTRY: &str = "SELECT id, timestamp, entry_point, app_version, platform,
        event, command, role, error_message, error_details
 FROM sys_logs";

fn row_to_entry(row: &duckdb::Row<'_>) -> duckdb::Result<LogEntry> {
    Ok(LogEntry {
        id: row.get(0)?,
        timestamp: row.get(1)?,
        entry_point: row.get(2)?,
        app_version: row.get(3)?,
        platform: row.get(4)?,
        event: row.get(5)?,
        command: row.get(6)?,
        role: row.get(7)?,
        error_message: row.get(8)?,
        error_details: row.get(9)?,
    })
}

/// Service for structured event logging
pub struct LoggingService {
    conn: Mutex<Connection>,
    db_path: PathBuf,
    entry_point: EntryPoint,
    app_version: String,
    platform: &'static str,
}

impl LoggingService {
    /// Open or create logs.duckdb in `data_dir` and run pending log migrations
    pub fn new(
        data_dir: &Path,
        entry_point: EntryPoint,
        app_version: impl Into<String>,
    ) -> Result<Self> {
        let db_path = data_dir.join("logs.duckdb");
        let conn = Connection::open(&db_path)?;
        MigrationService::with_migrations(&conn, LOG_MIGRATIONS).run_pending()?;

        Ok(Self {
            conn: Mutex::new(conn),
            db_path,
            entry_point,
            app_version: app_version.into(),
            platform: detect_platform(),
        })
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|e| anyhow!("Lock poisoned: {}", e))
    }

    /// Record an event, stamping entry point, version and platform
    pub fn log(&self, event: LogEvent) -> Result<()> {
        self.insert(&event, Utc::now().timestamp_millis())
    }

    fn insert(&self, event: &LogEvent, timestamp_ms: i64) -> Result<()> {
        self.conn()?.execute(
            r#"
            INSERT INTO sys_logs (
                id, timestamp, entry_point, app_version, platform,
                event, command, role, error_message, error_details
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
            duckdb::params![
                generate_id(timestamp_ms),
                timestamp_ms,
                self.entry_point.as_str(),
                &self.app_version,
                self.platform,
                &event.event,
                &event.command,
                &event.role,
                &event.error_message,
                &event.error_details,
            ],
        )?;
        Ok(())
    }

    /// Matching entries, newest first, up to `limit`
    pub fn query(&self, filter: &LogFilter, limit: usize) -> Result<Vec<LogEntry>> {
        let mut conditions = Vec::new();
        let mut args: Vec<String> = Vec::new();

        if let Some(event) = &filter.event {
            conditions.push("event = ?");
            args.push(event.clone());
        }
        if let Some(command) = &filter.command {
            conditions.push("(command = ? OR command LIKE ?)");
            args.push(command.clone());
            args.push(format!("{} %", command));
        }
        if let Some(role) = filter.role {
            conditions.push("role = ?");
            args.push(role.as_str().to_string());
        }
        if filter.errors_only {
            conditions.push("error_message IS NOT NULL");
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", conditions.join(" AND "))
        };
        let sql = format!(
            "{}{} ORDER BY timestamp DESC, id DESC LIMIT {}",
            SELECT_ENTRY, where_clause, limit
        );

        let conn = self.conn()?;
        let mut stmt = conn.prepare(&sql)?;
        let entries = stmt
            .query_map(duckdb::params_from_iter(args), row_to_entry)?
            .collect::<duckdb::Result<Vec<_>>>()?;
        Ok(entries)
    }

    pub fn summary(&self) -> Result<LogSummary> {
        let conn = self.conn()?;
        let (total, errors, oldest): (i64, i64, Option<i64>) = conn.query_row(
            "SELECT COUNT(*), COUNT(error_message), MIN(timestamp) FROM sys_logs",
            [],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
        )?;

        let group = |column: &str| -> Result<Vec<EventCount>> {
            let sql = format!(
                "SELECT {col}, COUNT(*) AS n FROM sys_logs WHERE {col} IS NOT NULL
                 GROUP BY {col} ORDER BY n DESC, {col}",
                col = column
            );
            let mut stmt = conn.prepare(&sql)?;
            let counts = stmt
                .query_map([], |row| {
                    Ok(EventCount {
                        name: row.get(0)?,
                        count: row.get::<_, i64>(1)? as u64,
                    })
                })?
                .collect::<duckdb::Result<Vec<_>>>()?;
            Ok(counts)
        };

        Ok(LogSummary {
            total: total as u64,
            errors: errors as u64,
            oldest,
            by_event: group("event")?,
            by_role: group("role")?,
        })
    }

    /// Delete entries older than `days` days; an age chrono cannot
    /// represent is an error
    pub fn prune_older_than(&self, days: u64) -> Result<u64> {
        let cutoff = i64::try_from(days)
            .ok()
            .and_then(Duration::try_days)
            .and_then(|age| Utc::now().checked_sub_signed(age))
            .ok_or_else(|| anyhow!("Cannot prune logs older than {} days: out of range", days))?;

        let deleted = self
            .conn()?
            .execute("DELETE FROM sys_logs WHERE timestamp < ?", [cutoff.timestamp_millis()])?;
        Ok(deleted as u64)
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }
}
