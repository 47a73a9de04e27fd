//! Register command - create an account with the default role

use anyhow::Result;
use colored::Colorize;
use dialoguer::{Input, Password, Select};

use reservas_core::{ReservasContext, Role};

use super::{get_context, UserView};

pub fn run(
    name: Option<String>,
    email: Option<String>,
    password: Option<String>,
    json: bool,
) -> Result<()> {
    let ctx = get_context()?;

    let name = match name {
        Some(n) => n,
        None => Input::new().with_prompt("Name").interact_text()?,
    };
    let email = match email {
        Some(e) => e,
        None => Input::new().with_prompt("Email").interact_text()?,
    };
    let password = match password {
        Some(p) => p,
        None => Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords do not match")
            .interact()?,
    };

    if !json && !ctx.default_role.is_set()? {
        choose_default_role(&ctx)?;
    }

    let user = ctx.self_register(&name, &email, &password)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&UserView::from(&user))?);
    } else {
        println!("{}", "Account created".green());
        println!("  ID: {}", user.id);
        println!("  Email: {}", user.email);
        println!("  Role: {}", user.role);
        println!("{}", "Run 'sr login' to start a session.".dimmed());
    }

    Ok(())
}

/// Asked once, before the first registration that finds no default role
fn choose_default_role(ctx: &ReservasContext) -> Result<()> {
    let labels: Vec<&str> = Role::ALL.iter().map(|r| r.as_str()).collect();
    let default = Role::ALL
        .iter()
        .position(|r| *r == Role::default())
        .unwrap_or(0);

    let choice = Select::new()
        .with_prompt("Default role for new accounts")
        .items(&labels)
        .default(default)
        .interact()?;

    let role = Role::ALL[choice];
    ctx.default_role.set(role)?;
    println!("{} {}", "Default role set to".green(), role.to_string().bold());
    Ok(())
}
