//! Config command - view and change settings.json

use anyhow::{bail, Result};
use clap::Subcommand;
use colored::Colorize;

use reservas_core::config::{Config, IdAllocation, StorageBackend};
use reservas_core::services::PasswordScheme;

use super::{get_context, get_data_dir};
use crate::output;

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the settings in effect (environment overrides included)
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Change settings
    Set {
        /// duckdb or memory
        #[arg(long)]
        storage: Option<StorageBackend>,
        /// plain or argon2
        #[arg(long)]
        password_scheme: Option<PasswordScheme>,
        /// maxPlusOne or sequence
        #[arg(long)]
        id_allocation: Option<IdAllocation>,
    },
}

pub fn run(command: ConfigCommands) -> Result<()> {
    let data_dir = get_data_dir()?;
    std::fs::create_dir_all(&data_dir)?;
    let mut config = Config::load(&data_dir)?;

    match command {
        ConfigCommands::Show { json } => {
            if json {
                println!(
                    "{}",
                    serde_json::json!({
                        "storage": config.storage,
                        "passwordScheme": config.password_scheme,
                        "idAllocation": config.id_allocation,
                    })
                );
            } else {
                println!("{}", "Settings".bold());
                println!("  Storage: {}", config.storage);
                println!("  Password scheme: {}", config.password_scheme);
                println!("  Id allocation: {}", config.id_allocation);
                let path = data_dir.join("settings.json");
                println!("  File: {}", path.display().to_string().dimmed());
            }
        }
        ConfigCommands::Set {
            storage,
            password_scheme,
            id_allocation,
        } => {
            if storage.is_none() && password_scheme.is_none() && id_allocation.is_none() {
                bail!("Nothing to change (use --storage, --password-scheme or --id-allocation)");
            }

            if let Some(scheme) = password_scheme {
                if scheme != config.password_scheme {
                    let unreadable = get_context()?.users.count_unreadable(scheme)?;
                    if unreadable > 0 {
                        output::warning(&format!(
                            "{} existing user(s) cannot log in under {} until they re-register",
                            unreadable, scheme
                        ));
                    }
                }
                config.password_scheme = scheme;
            }
            if let Some(storage) = storage {
                config.storage = storage;
            }
            if let Some(allocation) = id_allocation {
                config.id_allocation = allocation;
            }

            config.save(&data_dir)?;
            output::success("Settings saved");
        }
    }

    Ok(())
}
