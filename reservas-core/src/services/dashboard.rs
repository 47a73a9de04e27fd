//! Dashboard service - role-scoped views and actions
//!
//! Builds what each role sees and guards what each role may do:
//!
//! | action | admin | operador | cliente |
//! |---|---|---|---|
//! | create (own) | yes | yes | yes |
//! | confirm / reschedule | yes | yes | no |
//! | cancel | yes | yes | own only |
//! | set any status | yes | no | no |
//! | delete | yes | no | no |

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::result::{Error, Result};
use crate::domain::{NewReservation, Reservation, ReservationStatus, Role, Statistics, User};

use super::directory::UserDirectory;
use super::ledger::ReservationLedger;

/// Owner name shown when a reservation points at no known user
pub const UNKNOWN_OWNER: &str = "Desconocido";

/// One row of the admin table
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminRow {
    #[serde(flatten)]
    pub reservation: Reservation,
    pub owner_name: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminOverview {
    pub rows: Vec<AdminRow>,
    pub total_reservations: usize,
    pub total_users: usize,
    pub statistics: Statistics,
}

/// The operator's daily agenda: today's pending reservations
#[derive(Debug, Clone, Serialize)]
pub struct OperatorAgenda {
    pub date: NaiveDate,
    pub pending: Vec<Reservation>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientReservations {
    pub user_id: u64,
    pub reservations: Vec<Reservation>,
}

/// What the logged-in user sees, by role
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "view")]
pub enum Dashboard {
    #[serde(rename = "admin")]
    Admin(AdminOverview),
    #[serde(rename = "operador")]
    Operator(OperatorAgenda),
    #[serde(rename = "cliente")]
    Client(ClientReservations),
}

/// Role-scoped access to the directory and the ledger
#[derive(Clone)]
pub struct DashboardService {
    directory: UserDirectory,
    ledger: ReservationLedger,
}

impl DashboardService {
    pub fn new(directory: UserDirectory, ledger: ReservationLedger) -> Self {
        Self { directory, ledger }
    }

    pub fn dashboard(&self, actor: &User) -> Result<Dashboard> {
        Ok(match actor.role {
            Role::Admin => Dashboard::Admin(self.admin_overview()?),
            Role::Operator => Dashboard::Operator(self.operator_agenda()?),
            Role::Client => Dashboard::Client(ClientReservations {
                user_id: actor.id,
                reservations: self.ledger.list_for_user(actor.id)?,
            }),
        })
    }

    pub fn admin_overview(&self) -> Result<AdminOverview> {
        let reservations = self.ledger.list_all()?;
        let users = self.directory.list_users()?;

        let rows = reservations
            .iter()
            .map(|r| AdminRow {
                reservation: r.clone(),
                owner_name: users
                    .iter()
                    .find(|u| u.id == r.user_id)
                    .map_or_else(|| UNKNOWN_OWNER.to_string(), |u| u.name.clone()),
            })
            .collect();

        Ok(AdminOverview {
            rows,
            total_reservations: reservations.len(),
            total_users: users.len(),
            statistics: self.ledger.statistics(&reservations),
        })
    }

    pub fn operator_agenda(&self) -> Result<OperatorAgenda> {
        let date = self.ledger.today();
        Ok(OperatorAgenda {
            date,
            pending: self.ledger.list_pending_for_date(date)?,
        })
    }

    /// Today's agenda (admin, operador)
    pub fn agenda(&self, actor: &User) -> Result<OperatorAgenda> {
        require_role(actor, &[Role::Admin, Role::Operator], "view the agenda")?;
        self.operator_agenda()
    }

    /// Statistics over every reservation (admin only)
    pub fn statistics(&self, actor: &User) -> Result<Statistics> {
        require_role(actor, &[Role::Admin], "view statistics")?;
        Ok(self.ledger.statistics(&self.ledger.list_all()?))
    }

    /// List users (admin only)
    pub fn users(&self, actor: &User) -> Result<Vec<User>> {
        require_role(actor, &[Role::Admin], "list users")?;
        self.directory.list_users()
    }

    /// Create a reservation owned by `actor`
    pub fn create(
        &self,
        actor: &User,
        service: &str,
        date: NaiveDate,
        notes: &str,
    ) -> Result<Reservation> {
        self.ledger.create(NewReservation {
            user_id: actor.id,
            service: service.to_string(),
            date,
            notes: notes.to_string(),
        })
    }

    pub fn confirm(&self, actor: &User, id: u64) -> Result<Reservation> {
        require_role(actor, &[Role::Admin, Role::Operator], "confirm reservations")?;
        self.ledger.change_status(id, ReservationStatus::Confirmed)
    }

    pub fn reschedule(&self, actor: &User, id: u64, date: NaiveDate) -> Result<Reservation> {
        require_role(actor, &[Role::Admin, Role::Operator], "reschedule reservations")?;
        self.ledger.reschedule(id, date)
    }

    /// Cancel a reservation; clients may only cancel their own
    pub fn cancel(&self, actor: &User, id: u64) -> Result<Reservation> {
        if actor.role == Role::Client {
            let reservation = self
                .ledger
                .get(id)?
                .ok_or_else(|| Error::not_found(format!("reservation {}", id)))?;
            if reservation.user_id != actor.id {
                return Err(Error::forbidden("clients can only cancel their own reservations"));
            }
        }
        self.ledger.change_status(id, ReservationStatus::Cancelled)
    }

    pub fn set_status(
        &self,
        actor: &User,
        id: u64,
        status: ReservationStatus,
    ) -> Result<Reservation> {
        require_role(actor, &[Role::Admin], "set arbitrary statuses")?;
        self.ledger.change_status(id, status)
    }

    /// Delete a reservation (admin only); unknown ids are a no-op
    pub fn delete(&self, actor: &User, id: u64) -> Result<bool> {
        require_role(actor, &[Role::Admin], "delete reservations")?;
        self.ledger.delete(id)
    }
}

fn require_role(actor: &User, allowed: &[Role], action: &str) -> Result<()> {
    if allowed.contains(&actor.role) {
        Ok(())
    } else {
        Err(Error::forbidden(format!("{} cannot {}", actor.role, action)))
    }
}
