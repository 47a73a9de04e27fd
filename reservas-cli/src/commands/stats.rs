//! Stats command - counts by status and the next seven days

use anyhow::Result;
use colored::Colorize;

use reservas_core::ReservationStatus;

use super::{get_context, require_user};
use crate::output;

pub fn run(json: bool) -> Result<()> {
    let ctx = get_context()?;
    let actor = require_user(&ctx)?;
    let stats = ctx.dashboard.statistics(&actor)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("{}", "Reservation Statistics".bold());
    println!();

    let mut table = output::create_table();
    table.set_header(vec!["Status", "Count", "%"]);
    for status in ReservationStatus::ALL {
        table.add_row(vec![
            output::status_label(status).to_string(),
            stats.count(status).to_string(),
            format!("{}%", stats.percent(status)),
        ]);
    }
    table.add_row(vec!["total".to_string(), stats.total.to_string(), String::new()]);
    println!("{}", table);
    println!();

    println!("{}", "Next 7 days".bold());
    let mut days = output::create_table();
    days.set_header(vec!["Date", "Reservations"]);
    for day in &stats.next_7_days {
        days.add_row(vec![day.date.to_string(), day.count.to_string()]);
    }
    println!("{}", days);

    Ok(())
}
