//! Demo data generation
//!
//! Two pre-registered accounts (admin, operador) and a week of
//! reservations assigned to the operador.

use chrono::{Days, NaiveDate};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::domain::{Reservation, ReservationStatus, Role, User};

/// Demo services, picked at random per reservation
pub const DEMO_SERVICES: &[&str] = &["Servicio A", "Servicio B", "Servicio C", "Consulta", "Soporte"];

/// Owner of every demo reservation (the operador account)
pub const DEMO_OWNER_ID: u64 = 2;

pub const DEMO_NOTES: &str = "Reserva demo";

/// Demo accounts as `(user, clear-text password)`
pub fn generate_demo_users() -> Vec<(User, &'static str)> {
    vec![
        (
            User::new(1, "Admin Demo", "admin@demo", "", Role::Admin),
            "admin123",
        ),
        (
            User::new(2, "Operador Demo", "operador@demo", "", Role::Operator),
            "operador123",
        ),
    ]
}

/// 1-3 reservations for each of the 7 days starting at `today`
///
/// Ids run 1..n in date order; service and status are random.
pub fn generate_demo_reservations<R: Rng + ?Sized>(today: NaiveDate, rng: &mut R) -> Vec<Reservation> {
    let mut reservations = Vec::new();
    let mut next_id = 1;

    for offset in 0..7 {
        let Some(date) = today.checked_add_days(Days::new(offset)) else {
            break;
        };
        let count = rng.gen_range(1..=3);
        for _ in 0..count {
            let service = DEMO_SERVICES.choose(rng).copied().unwrap_or("Consulta");
            let status = ReservationStatus::ALL
                .choose(rng)
                .copied()
                .unwrap_or_default();
            reservations.push(Reservation {
                id: next_id,
                user_id: DEMO_OWNER_ID,
                service: service.to_string(),
                date,
                status,
                notes: DEMO_NOTES.to_string(),
            });
            next_id += 1;
        }
    }

    reservations
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_demo_reservation_shape() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let reservations = generate_demo_reservations(today, &mut rng);

        assert!(reservations.len() >= 7 && reservations.len() <= 21);
        for (i, r) in reservations.iter().enumerate() {
            assert_eq!(r.id, i as u64 + 1);
            assert_eq!(r.user_id, DEMO_OWNER_ID);
            assert!(DEMO_SERVICES.contains(&r.service.as_str()));
            assert!(r.date >= today && r.date < today + Days::new(7));
        }

        for offset in 0..7 {
            let day = today + Days::new(offset);
            let n = reservations.iter().filter(|r| r.date == day).count();
            assert!((1..=3).contains(&n), "{} has {} reservations", day, n);
        }
    }

    #[test]
    fn test_same_seed_same_data() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let a = generate_demo_reservations(today, &mut StdRng::seed_from_u64(1));
        let b = generate_demo_reservations(today, &mut StdRng::seed_from_u64(1));
        assert_eq!(a, b);
    }
}
