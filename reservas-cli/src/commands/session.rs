//! Session commands - login, logout, whoami

use anyhow::Result;
use colored::Colorize;
use dialoguer::{Input, Password};

use reservas_core::{Error, LogEvent};

use super::{get_context, get_logger, log_event, require_user, UserView};

pub fn login(email: Option<String>, password: Option<String>, json: bool) -> Result<()> {
    let ctx = get_context()?;

    let email = match email {
        Some(e) => e,
        None => Input::new().with_prompt("Email").interact_text()?,
    };
    let password = match password {
        Some(p) => p,
        None => Password::new().with_prompt("Password").interact()?,
    };

    // Stored credentials are compared exactly; trim what the terminal added
    let user = match ctx.session.login(&ctx.users, email.trim(), password.trim()) {
        Ok(user) => user,
        Err(e @ Error::InvalidCredentials) => {
            log_event(&get_logger(), LogEvent::new("login_failed").with_command("login"));
            return Err(e.into());
        }
        Err(e) => return Err(e.into()),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&UserView::from(&user))?);
    } else {
        println!(
            "{} {} ({})",
            "Logged in as".green(),
            user.name.bold(),
            user.role
        );
    }

    Ok(())
}

pub fn logout() -> Result<()> {
    let ctx = get_context()?;
    match ctx.session.current()? {
        Some(user) => {
            ctx.session.clear()?;
            println!("{} {}", "Logged out".green(), user.email.dimmed());
        }
        None => println!("{}", "No active session".dimmed()),
    }
    Ok(())
}

pub fn whoami(json: bool) -> Result<()> {
    let ctx = get_context()?;
    let user = require_user(&ctx)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&UserView::from(&user))?);
        return Ok(());
    }

    println!("{}", user.name.bold());
    println!("  ID: {}", user.id);
    println!("  Email: {}", user.email);
    println!("  Role: {}", user.role);
    Ok(())
}
