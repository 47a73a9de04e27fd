//! Reservation ledger - reservation records and their lifecycle

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::result::{Error, Result};
use crate::domain::validation::{ensure_not_past, require_field, validate_date};
use crate::domain::{
    NewReservation, Reservation, ReservationPatch, ReservationStatus, Statistics,
};
use crate::ports::{keys, Clock, IdAllocator, JsonStoreExt, KeyValueStore};

/// Ordered collection of reservations and the operations over it
#[derive(Clone)]
pub struct ReservationLedger {
    store: Arc<dyn KeyValueStore>,
    ids: Arc<dyn IdAllocator>,
    clock: Arc<dyn Clock>,
}

impl ReservationLedger {
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        ids: Arc<dyn IdAllocator>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self { store, ids, clock }
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// True when `date` is today or later
    pub fn validate_date(&self, date: NaiveDate) -> bool {
        validate_date(date, self.today())
    }

    /// Create a reservation in `pendiente` status
    ///
    /// The service must be non-blank and the date not in the past; the
    /// check is repeated here even when the caller already did it.
    pub fn create(&self, new: NewReservation) -> Result<Reservation> {
        let service = require_field("service", &new.service)?;
        ensure_not_past(new.date, self.today())?;

        let mut reservations = self.list_all()?;
        let id = self.ids.next_id(reservations.iter().map(|r| r.id).max());
        let reservation = Reservation {
            id,
            user_id: new.user_id,
            service,
            date: new.date,
            status: ReservationStatus::Pending,
            notes: new.notes.trim().to_string(),
        };
        reservations.push(reservation.clone());
        self.save(&reservations)?;

        Ok(reservation)
    }

    /// Merge `patch` into the reservation with `id`
    ///
    /// Shallow merge, no date check. `NotFound` when the id is unknown.
    pub fn update(&self, id: u64, patch: &ReservationPatch) -> Result<Reservation> {
        let mut reservations = self.list_all()?;
        let reservation = reservations
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| Error::not_found(format!("reservation {}", id)))?;

        reservation.apply(patch);
        let updated = reservation.clone();
        self.save(&reservations)?;

        Ok(updated)
    }

    /// Any status may follow any other
    pub fn change_status(&self, id: u64, status: ReservationStatus) -> Result<Reservation> {
        self.update(id, &ReservationPatch::status(status))
    }

    /// Move a reservation to a new date, which must not be in the past
    pub fn reschedule(&self, id: u64, date: NaiveDate) -> Result<Reservation> {
        ensure_not_past(date, self.today())?;
        self.update(id, &ReservationPatch::date(date))
    }

    /// Remove the reservation with `id`
    ///
    /// Returns whether something was removed; an unknown id is a no-op.
    pub fn delete(&self, id: u64) -> Result<bool> {
        let mut reservations = self.list_all()?;
        let before = reservations.len();
        reservations.retain(|r| r.id != id);
        let removed = reservations.len() != before;
        self.save(&reservations)?;
        Ok(removed)
    }

    pub fn get(&self, id: u64) -> Result<Option<Reservation>> {
        Ok(self.list_all()?.into_iter().find(|r| r.id == id))
    }

    /// All reservations owned by `user_id`, any status
    pub fn list_for_user(&self, user_id: u64) -> Result<Vec<Reservation>> {
        Ok(self
            .list_all()?
            .into_iter()
            .filter(|r| r.user_id == user_id)
            .collect())
    }

    /// Pending reservations on `date`
    pub fn list_pending_for_date(&self, date: NaiveDate) -> Result<Vec<Reservation>> {
        Ok(self
            .list_all()?
            .into_iter()
            .filter(|r| r.date == date && r.status == ReservationStatus::Pending)
            .collect())
    }

    pub fn list_all(&self) -> Result<Vec<Reservation>> {
        self.store.load_or_default(keys::RESERVATIONS)
    }

    /// Aggregate `reservations` relative to today
    pub fn statistics(&self, reservations: &[Reservation]) -> Statistics {
        Statistics::compute(reservations, self.today())
    }

    /// Overwrite the whole collection (demo seeding)
    pub fn replace_all(&self, reservations: &[Reservation]) -> Result<()> {
        self.save(reservations)
    }

    fn save(&self, reservations: &[Reservation]) -> Result<()> {
        self.store.save(keys::RESERVATIONS, reservations)
    }
}
