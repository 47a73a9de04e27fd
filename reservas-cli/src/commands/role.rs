//! Role command - default role for self-registration

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;

use reservas_core::Role;

use super::get_context;

#[derive(Subcommand)]
pub enum RoleCommands {
    /// Show the current default role
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Set the default role (admin, operador, cliente)
    Set {
        role: Role,
    },
}

pub fn run(command: Option<RoleCommands>) -> Result<()> {
    let ctx = get_context()?;

    match command {
        Some(RoleCommands::Set { role }) => {
            ctx.default_role.set(role)?;
            println!("{} {}", "Default role set to".green(), role.to_string().bold());
        }
        Some(RoleCommands::Show { json }) => show(&ctx, json)?,
        None => show(&ctx, false)?,
    }

    Ok(())
}

fn show(ctx: &reservas_core::ReservasContext, json: bool) -> Result<()> {
    let role = ctx.default_role.get()?;
    let explicit = ctx.default_role.is_set()?;

    if json {
        println!(
            "{}",
            serde_json::json!({ "role": role, "explicit": explicit })
        );
    } else if explicit {
        println!("Default role: {}", role.to_string().bold());
    } else {
        println!("Default role: {} {}", role.to_string().bold(), "(not set)".dimmed());
    }
    Ok(())
}
