//! Dashboard and agenda commands - the role-scoped views

use anyhow::Result;
use colored::Colorize;

use reservas_core::services::{AdminOverview, Dashboard, OperatorAgenda};
use reservas_core::ReservationStatus;

use super::{get_context, require_user};
use crate::output;

pub fn run(json: bool) -> Result<()> {
    let ctx = get_context()?;
    let actor = require_user(&ctx)?;
    let dashboard = ctx.dashboard.dashboard(&actor)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&dashboard)?);
        return Ok(());
    }

    println!("{} {}", "Hola,".bold(), actor.name.bold());
    println!();

    match dashboard {
        Dashboard::Admin(overview) => print_admin(&overview),
        Dashboard::Operator(agenda) => print_agenda(&agenda),
        Dashboard::Client(view) => {
            println!("{}", "My reservations".bold());
            if view.reservations.is_empty() {
                println!("{}", "No reservations yet. Try 'sr reserve create'.".dimmed());
            } else {
                let table =
                    output::reservation_table(view.reservations.iter().map(|r| (r, None)), false);
                println!("{}", table);
            }
        }
    }

    Ok(())
}

pub fn agenda(json: bool) -> Result<()> {
    let ctx = get_context()?;
    let actor = require_user(&ctx)?;
    let agenda = ctx.dashboard.agenda(&actor)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&agenda)?);
    } else {
        print_agenda(&agenda);
    }
    Ok(())
}

fn print_agenda(agenda: &OperatorAgenda) {
    println!("{} {}", "Agenda for".bold(), agenda.date.to_string().bold());
    if agenda.pending.is_empty() {
        println!("{}", "Nothing pending today.".dimmed());
        return;
    }
    let table = output::reservation_table(agenda.pending.iter().map(|r| (r, None)), false);
    println!("{}", table);
    output::info(&format!("{} pending", agenda.pending.len()));
}

fn print_admin(overview: &AdminOverview) {
    println!("{}", "All reservations".bold());

    let mut summary = output::create_table();
    summary.add_row(vec!["Reservations".to_string(), overview.total_reservations.to_string()]);
    summary.add_row(vec!["Users".to_string(), overview.total_users.to_string()]);
    for status in ReservationStatus::ALL {
        summary.add_row(vec![
            output::status_label(status).to_string(),
            overview.statistics.count(status).to_string(),
        ]);
    }
    println!("{}", summary);
    println!();

    if overview.rows.is_empty() {
        println!("{}", "No reservations yet.".dimmed());
        return;
    }
    let table = output::reservation_table(
        overview
            .rows
            .iter()
            .map(|row| (&row.reservation, Some(row.owner_name.as_str()))),
        true,
    );
    println!("{}", table);
}
