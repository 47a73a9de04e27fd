//! Output formatting utilities

use colored::{ColoredString, Colorize};
use comfy_table::{presets::UTF8_FULL_CONDENSED, ContentArrangement, Table};
use reservas_core::{Reservation, ReservationStatus};

/// Print a success message
pub fn success(msg: &str) {
    println!("{}", msg.green());
}

/// Print an error message
pub fn error(msg: &str) {
    eprintln!("{}", msg.red());
}

/// Print a warning message
pub fn warning(msg: &str) {
    println!("{}", msg.yellow());
}

/// Print an info message
pub fn info(msg: &str) {
    println!("{}", msg.cyan());
}

/// Create a styled table
pub fn create_table() -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Status label colored by state
pub fn status_label(status: ReservationStatus) -> ColoredString {
    match status {
        ReservationStatus::Pending => status.as_str().yellow(),
        ReservationStatus::Confirmed => status.as_str().green(),
        ReservationStatus::Cancelled => status.as_str().red(),
    }
}

/// Table of reservations, with an optional owner column
pub fn reservation_table<'a>(
    rows: impl IntoIterator<Item = (&'a Reservation, Option<&'a str>)>,
    with_owner: bool,
) -> Table {
    let mut table = create_table();
    let mut header = vec!["ID", "Service", "Date", "Status", "Notes"];
    if with_owner {
        header.insert(1, "Owner");
    }
    table.set_header(header);

    for (r, owner) in rows {
        let mut row = vec![
            r.id.to_string(),
            r.service.clone(),
            r.date.to_string(),
            status_label(r.status).to_string(),
            r.notes.clone(),
        ];
        if with_owner {
            row.insert(1, owner.unwrap_or_default().to_string());
        }
        table.add_row(row);
    }
    table
}

/// Format bytes as human-readable size
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}
