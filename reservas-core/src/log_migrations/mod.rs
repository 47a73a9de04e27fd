//! Log database migrations - embedded SQL files
//!
//! Applied to logs.duckdb by the logging service, separately from the
//! store schema. Same (filename, sql_content) format as the store list.
pub const LOG_MIGRATIONS: &[(&str, &str)] = &[
    ("000_migrations.sql", include_str!("000_migrations.sql")),
    ("001_initial_schema.sql", include_str!("001_initial_schema.sql")),
];
