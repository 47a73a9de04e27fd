//! Logs command - inspect who did what
//!
//! `list` filters by event, command or acting role; `stats` breaks the log
//! down into reservation changes, failed logins and failed commands.

use anyhow::Result;
use chrono::{TimeZone, Utc};
use clap::Subcommand;
use colored::Colorize;
use dialoguer::Confirm;

use super::get_data_dir;
use crate::output;
use reservas_core::{EntryPoint, LogFilter, LoggingService, Role};

/// Events the stats view always reports, even at zero
const TRACKED_EVENTS: [(&str, &str); 3] = [
    ("reservation_changed", "Reservation changes"),
    ("login_failed", "Failed logins"),
    ("command_failed", "Failed commands"),
];

#[derive(Subcommand)]
pub enum LogsCommands {
    /// Show recent log entries
    List {
        /// Number of entries to show
        #[arg(short, long, default_value = "50")]
        limit: usize,
        /// Only this event (e.g. reservation_changed, login_failed)
        #[arg(long)]
        event: Option<String>,
        /// Only this command and its subcommands (e.g. "reserve")
        #[arg(long)]
        command: Option<String>,
        /// Only entries recorded for this role
        #[arg(long)]
        role: Option<Role>,
        /// Show only errors
        #[arg(long)]
        errors: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete old log entries
    Clear {
        /// Delete logs older than N days
        #[arg(long, default_value = "30")]
        older_than_days: u64,
        /// Skip confirmation prompt
        #[arg(long, short = 'f')]
        force: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Activity by event and role
    Stats {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn open_log() -> Result<LoggingService> {
    let data_dir = get_data_dir()?;
    std::fs::create_dir_all(&data_dir)?;
    LoggingService::new(&data_dir, EntryPoint::Cli, env!("CARGO_PKG_VERSION"))
}

fn format_timestamp(timestamp_ms: i64) -> String {
    Utc.timestamp_millis_opt(timestamp_ms)
        .single()
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| timestamp_ms.to_string())
}

pub fn run(command: LogsCommands) -> Result<()> {
    let service = open_log()?;

    match command {
        LogsCommands::List {
            limit,
            event,
            command,
            role,
            errors,
            json,
        } => {
            let filter = LogFilter {
                event,
                command,
                role,
                errors_only: errors,
            };
            let entries = service.query(&filter, limit)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
                return Ok(());
            }
            if entries.is_empty() {
                println!("{}", "No matching log entries.".dimmed());
                return Ok(());
            }

            let mut table = output::create_table();
            table.set_header(vec!["Time", "Event", "Command", "Role", "Error"]);
            for entry in entries {
                table.add_row(vec![
                    format_timestamp(entry.timestamp),
                    entry.event,
                    entry.command.unwrap_or_default(),
                    entry.role.unwrap_or_default(),
                    entry
                        .error_message
                        .map(|e| e.red().to_string())
                        .unwrap_or_default(),
                ]);
            }
            println!("{}", table);
        }
        LogsCommands::Clear {
            older_than_days,
            force,
            json,
        } => {
            if !force && !json {
                if !Confirm::new()
                    .with_prompt(format!("Delete logs older than {} days?", older_than_days))
                    .default(false)
                    .interact()?
                {
                    println!("{}", "Cancelled".dimmed());
                    return Ok(());
                }
            }

            let deleted = service.prune_older_than(older_than_days)?;
            if json {
                println!("{}", serde_json::json!({ "deleted": deleted }));
            } else {
                output::success(&format!("Deleted {} log entries", deleted));
            }
        }
        LogsCommands::Stats { json } => {
            let summary = service.summary()?;
            let db_path = service.db_path();
            let size_bytes = std::fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);

            if json {
                println!(
                    "{}",
                    serde_json::json!({
                        "summary": summary,
                        "database_path": db_path.to_string_lossy(),
                        "database_size_bytes": size_bytes,
                    })
                );
                return Ok(());
            }

            println!("{}", "Activity".bold());
            for (event, label) in TRACKED_EVENTS {
                println!("  {}: {}", label, summary.event_count(event));
            }
            println!("  Total entries: {}", summary.total);
            if let Some(oldest) = summary.oldest {
                println!("  Since: {}", format_timestamp(oldest));
            }

            if !summary.by_role.is_empty() {
                println!();
                let mut table = output::create_table();
                table.set_header(vec!["Role", "Entries"]);
                for row in &summary.by_role {
                    table.add_row(vec![row.name.clone(), row.count.to_string()]);
                }
                println!("{}", table);
            }

            println!();
            println!("  Database: {}", db_path.display());
            println!("  Size: {}", output::format_size(size_bytes));
        }
    }

    Ok(())
}
