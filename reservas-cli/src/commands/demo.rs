//! Demo command - load sample users and reservations

use anyhow::Result;
use colored::Colorize;
use dialoguer::Confirm;

use reservas_core::LogEvent;

use super::{get_context, get_logger, log_event};

pub fn run(force: bool, json: bool) -> Result<()> {
    let ctx = get_context()?;

    if !force && !json {
        println!(
            "\n{}",
            "This replaces every user and reservation with demo data.".yellow()
        );
        if !Confirm::new()
            .with_prompt("Are you sure?")
            .default(false)
            .interact()?
        {
            println!("{}\n", "Cancelled".dimmed());
            return Ok(());
        }
    }

    let summary = ctx.demo.seed()?;
    log_event(&get_logger(), LogEvent::new("demo_seeded").with_command("demo"));

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!(
        "{} ({} users, {} reservations)",
        "Demo data loaded".green(),
        summary.users,
        summary.reservations
    );
    println!("  admin@demo / admin123");
    println!("  operador@demo / operador123");
    println!("{}", "Run 'sr login admin@demo' to explore.".dimmed());
    Ok(())
}
