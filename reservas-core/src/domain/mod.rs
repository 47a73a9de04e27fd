//! Core domain entities
//!
//! All business entities are defined here. These are pure data structures
//! with validation logic - no I/O or external dependencies.

mod reservation;
pub mod result;
pub mod statistics;
mod user;
pub mod validation;

pub use reservation::{NewReservation, Reservation, ReservationPatch, ReservationStatus};
pub use statistics::{DayCount, Statistics, StatusCount};
pub use user::{Role, User};
