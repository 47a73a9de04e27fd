//! Reserve command - create and manage reservations

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;
use dialoguer::{Confirm, Input};

use reservas_core::domain::validation::parse_date;
use reservas_core::{LogEvent, OperationResult, Reservation, ReservationStatus};

use super::{get_context, get_logger, log_event, require_user};
use crate::output;

#[derive(Subcommand)]
pub enum ReserveCommands {
    /// Book a reservation for the logged-in user
    Create {
        /// Service name
        #[arg(long)]
        service: Option<String>,
        /// Date (YYYY-MM-DD), today or later
        #[arg(long)]
        date: Option<String>,
        /// Free-form notes
        #[arg(long, default_value = "")]
        notes: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List your reservations
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Confirm a reservation (admin, operador)
    Confirm {
        id: u64,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Cancel a reservation (clients: own only)
    Cancel {
        id: u64,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Move a reservation to another date (admin, operador)
    Reschedule {
        id: u64,
        /// New date (YYYY-MM-DD)
        date: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Set any status on a reservation (admin)
    SetStatus {
        id: u64,
        /// pendiente, confirmada or cancelada
        status: ReservationStatus,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete a reservation (admin)
    Delete {
        id: u64,
        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

impl ReserveCommands {
    pub fn name(&self) -> &'static str {
        match self {
            ReserveCommands::Create { .. } => "reserve create",
            ReserveCommands::List { .. } => "reserve list",
            ReserveCommands::Confirm { .. } => "reserve confirm",
            ReserveCommands::Cancel { .. } => "reserve cancel",
            ReserveCommands::Reschedule { .. } => "reserve reschedule",
            ReserveCommands::SetStatus { .. } => "reserve set-status",
            ReserveCommands::Delete { .. } => "reserve delete",
        }
    }
}

pub fn run(command: ReserveCommands) -> Result<()> {
    let ctx = get_context()?;
    let actor = require_user(&ctx)?;
    let name = command.name();
    let mutates = !matches!(command, ReserveCommands::List { .. });

    match command {
        ReserveCommands::Create { service, date, notes, json } => {
            let service = match service {
                Some(s) => s,
                None => Input::new().with_prompt("Service").interact_text()?,
            };
            let date = match date {
                Some(d) => d,
                None => Input::new()
                    .with_prompt("Date (YYYY-MM-DD)")
                    .default(ctx.ledger.today().to_string())
                    .interact_text()?,
            };
            let date = parse_date(&date)?;

            let reservation = ctx.dashboard.create(&actor, &service, date, &notes)?;
            print_changed(&reservation, "Reservation created", json)?;
        }
        ReserveCommands::List { json } => {
            let reservations = ctx.ledger.list_for_user(actor.id)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&reservations)?);
            } else if reservations.is_empty() {
                println!("{}", "No reservations yet.".dimmed());
            } else {
                let table =
                    output::reservation_table(reservations.iter().map(|r| (r, None)), false);
                println!("{}", table);
            }
        }
        ReserveCommands::Confirm { id, json } => {
            let reservation = ctx.dashboard.confirm(&actor, id)?;
            print_changed(&reservation, "Reservation confirmed", json)?;
        }
        ReserveCommands::Cancel { id, json } => {
            let reservation = ctx.dashboard.cancel(&actor, id)?;
            print_changed(&reservation, "Reservation cancelled", json)?;
        }
        ReserveCommands::Reschedule { id, date, json } => {
            let date = parse_date(&date)?;
            let reservation = ctx.dashboard.reschedule(&actor, id, date)?;
            print_changed(&reservation, "Reservation rescheduled", json)?;
        }
        ReserveCommands::SetStatus { id, status, json } => {
            let reservation = ctx.dashboard.set_status(&actor, id, status)?;
            print_changed(&reservation, "Status updated", json)?;
        }
        ReserveCommands::Delete { id, force, json } => {
            if !force && !json {
                if !Confirm::new()
                    .with_prompt(format!("Delete reservation {}?", id))
                    .default(false)
                    .interact()?
                {
                    println!("{}", "Cancelled".dimmed());
                    return Ok(());
                }
            }

            let removed = ctx.dashboard.delete(&actor, id)?;
            if json {
                let result = OperationResult::ok(removed)
                    .with_context("id", serde_json::json!(id));
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else if removed {
                output::success(&format!("Reservation {} deleted", id));
            } else {
                output::warning(&format!("No reservation with id {}", id));
            }
        }
    }

    if mutates {
        log_event(
            &get_logger(),
            LogEvent::new("reservation_changed")
                .with_command(name)
                .with_role(actor.role),
        );
    }

    Ok(())
}

fn print_changed(reservation: &Reservation, message: &str, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(reservation)?);
        return Ok(());
    }

    output::success(message);
    println!("  ID: {}", reservation.id);
    println!("  Service: {}", reservation.service);
    println!("  Date: {}", reservation.date);
    println!("  Status: {}", output::status_label(reservation.status));
    if !reservation.notes.is_empty() {
        println!("  Notes: {}", reservation.notes);
    }
    Ok(())
}
