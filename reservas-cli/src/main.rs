//! Reservas CLI - reservation management in your terminal

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod output;

use commands::{config, dashboard, demo, logs, register, reserve, role, session, stats, users};
use reservas_core::LogEvent;

/// Reservas - reservation management in your terminal
#[derive(Parser)]
#[command(name = "sr", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account with the default role
    Register {
        /// Full name
        #[arg(long)]
        name: Option<String>,
        /// Email address
        #[arg(long)]
        email: Option<String>,
        /// Password (prompted when omitted)
        #[arg(long)]
        password: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Log in and keep the session
    Login {
        /// Email address
        email: Option<String>,
        /// Password (prompted when omitted)
        #[arg(long)]
        password: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// End the current session
    Logout,

    /// Show the logged-in user
    Whoami {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show or change the role given to new registrations
    Role {
        #[command(subcommand)]
        command: Option<role::RoleCommands>,
    },

    /// Create and manage reservations
    Reserve {
        #[command(subcommand)]
        command: reserve::ReserveCommands,
    },

    /// Today's pending reservations (admin, operador)
    Agenda {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the view for the logged-in role
    Dashboard {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Reservation statistics (admin)
    Stats {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List registered users (admin)
    Users {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Replace all users and reservations with demo data
    Demo {
        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show or change settings
    Config {
        #[command(subcommand)]
        command: config::ConfigCommands,
    },

    /// View and manage application logs
    Logs {
        #[command(subcommand)]
        command: logs::LogsCommands,
    },
}

impl Commands {
    /// Command name as recorded in the event log
    fn name(&self) -> &'static str {
        match self {
            Commands::Register { .. } => "register",
            Commands::Login { .. } => "login",
            Commands::Logout => "logout",
            Commands::Whoami { .. } => "whoami",
            Commands::Role { .. } => "role",
            Commands::Reserve { command } => command.name(),
            Commands::Agenda { .. } => "agenda",
            Commands::Dashboard { .. } => "dashboard",
            Commands::Stats { .. } => "stats",
            Commands::Users { .. } => "users",
            Commands::Demo { .. } => "demo",
            Commands::Config { .. } => "config",
            Commands::Logs { .. } => "logs",
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let command_name = cli.command.name();

    // The log database is only held open while writing one event
    commands::log_event(
        &commands::get_logger(),
        LogEvent::new("command_executed").with_command(command_name),
    );

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            commands::log_event(
                &commands::get_logger(),
                LogEvent::new("command_failed")
                    .with_command(command_name)
                    .with_error(e.to_string()),
            );
            output::error(&format!("Error: {:#}", e));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Register { name, email, password, json } => {
            register::run(name, email, password, json)
        }
        Commands::Login { email, password, json } => session::login(email, password, json),
        Commands::Logout => session::logout(),
        Commands::Whoami { json } => session::whoami(json),
        Commands::Role { command } => role::run(command),
        Commands::Reserve { command } => reserve::run(command),
        Commands::Agenda { json } => dashboard::agenda(json),
        Commands::Dashboard { json } => dashboard::run(json),
        Commands::Stats { json } => stats::run(json),
        Commands::Users { json } => users::run(json),
        Commands::Demo { force, json } => demo::run(force, json),
        Commands::Config { command } => config::run(command),
        Commands::Logs { command } => logs::run(command),
    }
}
