//! Clock port - where "today" comes from

use chrono::{Local, NaiveDate};

pub trait Clock: Send + Sync {
    /// Current calendar day
    fn today(&self) -> NaiveDate;
}

/// Local calendar day of the machine
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Always returns the same day (tests, replays)
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
