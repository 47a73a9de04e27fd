//! Users command - list registered accounts

use anyhow::Result;
use colored::Colorize;

use super::{get_context, require_user, UserView};
use crate::output;

pub fn run(json: bool) -> Result<()> {
    let ctx = get_context()?;
    let actor = require_user(&ctx)?;
    let users = ctx.dashboard.users(&actor)?;

    if json {
        let views: Vec<UserView> = users.iter().map(UserView::from).collect();
        println!("{}", serde_json::to_string_pretty(&views)?);
        return Ok(());
    }

    if users.is_empty() {
        println!("{}", "No users registered.".dimmed());
        return Ok(());
    }

    let mut table = output::create_table();
    table.set_header(vec!["ID", "Name", "Email", "Role"]);
    for user in &users {
        table.add_row(vec![
            user.id.to_string(),
            user.name.clone(),
            user.email.clone(),
            user.role.to_string(),
        ]);
    }
    println!("{}", table);
    Ok(())
}
