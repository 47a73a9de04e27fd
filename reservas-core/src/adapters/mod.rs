//! Adapter implementations
//!
//! Adapters implement the port traits with concrete technologies:
//! - DuckDB for the KeyValueStore port
//! - In-memory map for the KeyValueStore port (tests, throwaway sessions)
//! - Demo data for seeding

pub mod demo;
pub mod duckdb;
pub mod memory;
