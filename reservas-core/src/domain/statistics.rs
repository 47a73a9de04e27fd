//! Reservation statistics

use chrono::{Days, NaiveDate};
use serde::Serialize;

use super::reservation::{Reservation, ReservationStatus};

/// Number of days covered by the upcoming breakdown, today included
pub const UPCOMING_DAYS: u64 = 7;

/// Count and share of one status
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusCount {
    pub status: ReservationStatus,
    pub count: usize,
    /// Rounded percentage of the total (an empty set counts as total 1)
    pub percent: u32,
}

/// Reservations falling on one calendar day
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayCount {
    pub date: NaiveDate,
    pub count: usize,
}

/// Aggregated view over a set of reservations
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub total: usize,
    /// Always one entry per status, in `ReservationStatus::ALL` order
    pub counts_by_status: Vec<StatusCount>,
    pub next_7_days: Vec<DayCount>,
}

impl Statistics {
    pub fn compute(reservations: &[Reservation], today: NaiveDate) -> Self {
        let total = reservations.len();
        let denominator = total.max(1) as f64;

        let counts_by_status = ReservationStatus::ALL
            .iter()
            .map(|&status| {
                let count = reservations.iter().filter(|r| r.status == status).count();
                StatusCount {
                    status,
                    count,
                    percent: ((count as f64 / denominator) * 100.0).round() as u32,
                }
            })
            .collect();

        let next_7_days = (0..UPCOMING_DAYS)
            .filter_map(|offset| today.checked_add_days(Days::new(offset)))
            .map(|date| DayCount {
                date,
                count: reservations.iter().filter(|r| r.date == date).count(),
            })
            .collect();

        Self {
            total,
            counts_by_status,
            next_7_days,
        }
    }

    pub fn count(&self, status: ReservationStatus) -> usize {
        self.entry(status).map_or(0, |e| e.count)
    }

    pub fn percent(&self, status: ReservationStatus) -> u32 {
        self.entry(status).map_or(0, |e| e.percent)
    }

    fn entry(&self, status: ReservationStatus) -> Option<&StatusCount> {
        self.counts_by_status.iter().find(|e| e.status == status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reservation(id: u64, date: NaiveDate, status: ReservationStatus) -> Reservation {
        Reservation {
            id,
            user_id: 1,
            service: "Consulta".to_string(),
            date,
            status,
            notes: String::new(),
        }
    }

    #[test]
    fn test_counts_and_percentages() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let reservations = vec![
            reservation(1, today, ReservationStatus::Pending),
            reservation(2, today, ReservationStatus::Pending),
            reservation(3, today, ReservationStatus::Confirmed),
            reservation(4, today, ReservationStatus::Cancelled),
        ];

        let stats = Statistics::compute(&reservations, today);

        assert_eq!(stats.total, 4);
        assert_eq!(stats.count(ReservationStatus::Pending), 2);
        assert_eq!(stats.count(ReservationStatus::Confirmed), 1);
        assert_eq!(stats.count(ReservationStatus::Cancelled), 1);
        assert_eq!(stats.percent(ReservationStatus::Pending), 50);
        assert_eq!(stats.percent(ReservationStatus::Confirmed), 25);
        assert_eq!(stats.percent(ReservationStatus::Cancelled), 25);
    }

    #[test]
    fn test_empty_set() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let stats = Statistics::compute(&[], today);

        assert_eq!(stats.total, 0);
        assert_eq!(stats.counts_by_status.len(), 3);
        assert!(stats.counts_by_status.iter().all(|e| e.count == 0 && e.percent == 0));
        assert_eq!(stats.next_7_days.len(), 7);
    }

    #[test]
    fn test_next_7_days_window() {
        let today = NaiveDate::from_ymd_opt(2026, 12, 29).unwrap();
        let in_window = NaiveDate::from_ymd_opt(2027, 1, 4).unwrap();
        let outside = NaiveDate::from_ymd_opt(2027, 1, 5).unwrap();
        let reservations = vec![
            reservation(1, today, ReservationStatus::Cancelled),
            reservation(2, in_window, ReservationStatus::Pending),
            reservation(3, in_window, ReservationStatus::Confirmed),
            reservation(4, outside, ReservationStatus::Pending),
        ];

        let stats = Statistics::compute(&reservations, today);
        let days: Vec<_> = stats.next_7_days.iter().map(|d| (d.date, d.count)).collect();

        assert_eq!(days.first(), Some(&(today, 1)));
        assert_eq!(days.last(), Some(&(in_window, 2)));
        assert_eq!(days.iter().map(|(_, c)| c).sum::<usize>(), 3);
    }
}
