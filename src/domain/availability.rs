use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{CarId, DateRange, DateRangeError, RentalStatus};

/// Availability view of a rental: which car, which days, in which state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub car_id: CarId,
    pub date_range: DateRange,
    pub status: RentalStatus,
}

impl Reservation {
    /// Only approved reservations occupy their days.
    pub fn blocks(&self) -> bool {
        self.status == RentalStatus::Approved
    }
}

fn validate_all(reservations: &[Reservation]) -> Result<(), DateRangeError> {
    reservations
        .iter()
        .try_for_each(|r| r.date_range.validate())
}

/// Union of the day-sets of all approved reservations.
///
/// # Errors
/// `StartAfterEnd` or `TooLong` if any reservation, approved or not, carries
/// a malformed range.
pub fn occupied_days(reservations: &[Reservation]) -> Result<BTreeSet<NaiveDate>, DateRangeError> {
    validate_all(reservations)?;
    let mut days = BTreeSet::new();
    for reservation in reservations.iter().filter(|r| r.blocks()) {
        days.extend(reservation.date_range.days());
    }
    Ok(days)
}

/// Pure function: can `requested` be approved against the existing approved reservations?
///
/// Business rules:
/// - Day granularity; partial days are not modelled
/// - A request conflicts when it shares at least one calendar day with an
///   approved reservation, including a shared boundary day (no same-day handoff)
/// - Reservations in any status other than Approved are ignored
///
/// The caller passes the approved reservations of a single car.
pub fn is_available(
    existing_approved: &[Reservation],
    requested: &DateRange,
) -> Result<bool, DateRangeError> {
    requested.validate()?;
    validate_all(existing_approved)?;
    let conflict = existing_approved
        .iter()
        .filter(|r| r.blocks())
        .any(|r| r.date_range.overlaps(requested));
    Ok(!conflict)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn range(start: NaiveDate, end: NaiveDate) -> DateRange {
        DateRange::new(start, end).unwrap()
    }

    fn approved(car_id: CarId, start: NaiveDate, end: NaiveDate) -> Reservation {
        Reservation {
            car_id,
            date_range: range(start, end),
            status: RentalStatus::Approved,
        }
    }

    #[test]
    fn test_empty_list_is_always_available() {
        let requested = range(date(2024, 1, 1), date(2024, 12, 31));
        assert!(is_available(&[], &requested).unwrap());
    }

    #[test]
    fn test_single_day_exact_overlap_is_unavailable() {
        let car_id = CarId::new();
        let existing = vec![approved(car_id, date(2024, 1, 5), date(2024, 1, 10))];
        let requested = range(date(2024, 1, 5), date(2024, 1, 5));
        assert!(!is_available(&existing, &requested).unwrap());
    }

    #[test]
    fn test_shared_boundary_day_is_unavailable() {
        let car_id = CarId::new();
        let existing = vec![approved(car_id, date(2024, 1, 1), date(2024, 1, 10))];
        let requested = range(date(2024, 1, 10), date(2024, 1, 15));
        assert!(!is_available(&existing, &requested).unwrap());
    }

    #[test]
    fn test_request_enclosing_existing_is_unavailable() {
        let car_id = CarId::new();
        let existing = vec![approved(car_id, date(2024, 3, 10), date(2024, 3, 12))];
        let requested = range(date(2024, 3, 1), date(2024, 3, 31));
        assert!(!is_available(&existing, &requested).unwrap());
    }

    #[test]
    fn test_range_disjoint_from_all_approved_is_available() {
        let car_id = CarId::new();
        let existing = vec![
            approved(car_id, date(2024, 1, 1), date(2024, 1, 5)),
            approved(car_id, date(2024, 1, 20), date(2024, 1, 25)),
        ];
        let between = range(date(2024, 1, 6), date(2024, 1, 19));
        let after = range(date(2024, 1, 26), date(2024, 2, 3));
        assert!(is_available(&existing, &between).unwrap());
        assert!(is_available(&existing, &after).unwrap());
    }

    #[test]
    fn test_non_approved_reservations_do_not_block() {
        let car_id = CarId::new();
        let mut existing = Vec::new();
        for status in [
            RentalStatus::Waiting,
            RentalStatus::Rejected,
            RentalStatus::Cancelled,
            RentalStatus::Completed,
        ] {
            existing.push(Reservation {
                car_id,
                date_range: range(date(2024, 1, 1), date(2024, 1, 10)),
                status,
            });
        }
        let requested = range(date(2024, 1, 3), date(2024, 1, 4));
        assert!(is_available(&existing, &requested).unwrap());
    }

    #[test]
    fn test_malformed_existing_range_fails() {
        let car_id = CarId::new();
        let broken: DateRange =
            serde_json::from_str(r#"{"start":"2024-01-10","end":"2024-01-01"}"#).unwrap();
        let existing = vec![Reservation {
            car_id,
            date_range: broken,
            status: RentalStatus::Approved,
        }];
        let requested = range(date(2024, 2, 1), date(2024, 2, 2));
        assert!(is_available(&existing, &requested).is_err());
    }

    #[test]
    fn test_malformed_requested_range_fails() {
        let requested: DateRange =
            serde_json::from_str(r#"{"start":"2024-01-10","end":"2024-01-01"}"#).unwrap();
        assert!(matches!(
            is_available(&[], &requested),
            Err(DateRangeError::StartAfterEnd { .. })
        ));
    }

    #[test]
    fn test_malformed_non_approved_range_fails() {
        let broken: DateRange =
            serde_json::from_str(r#"{"start":"2024-01-10","end":"2024-01-01"}"#).unwrap();
        let existing = vec![Reservation {
            car_id: CarId::new(),
            date_range: broken,
            status: RentalStatus::Cancelled,
        }];
        let requested = range(date(2024, 2, 1), date(2024, 2, 2));
        assert!(is_available(&existing, &requested).is_err());
        assert!(occupied_days(&existing).is_err());
    }

    #[test]
    fn test_oversized_stored_range_is_rejected_without_expansion() {
        let huge: DateRange =
            serde_json::from_str(r#"{"start":"0001-01-01","end":"9999-12-31"}"#).unwrap();
        let existing = vec![Reservation {
            car_id: CarId::new(),
            date_range: huge,
            status: RentalStatus::Approved,
        }];
        let requested = range(date(2024, 1, 1), date(2024, 1, 2));
        assert!(matches!(
            is_available(&existing, &requested),
            Err(DateRangeError::TooLong { .. })
        ));
        assert!(occupied_days(&existing).is_err());
    }

    #[test]
    fn test_year_long_approval_blocks_without_day_walk() {
        let car_id = CarId::new();
        let existing = vec![approved(car_id, date(2024, 1, 1), date(2024, 12, 31))];
        assert!(!is_available(&existing, &range(date(2024, 12, 31), date(2025, 1, 3))).unwrap());
        assert!(is_available(&existing, &range(date(2025, 1, 1), date(2025, 1, 3))).unwrap());
    }

    #[test]
    fn test_occupied_days_is_union_of_approved_day_sets() {
        let car_id = CarId::new();
        let existing = vec![
            approved(car_id, date(2024, 1, 1), date(2024, 1, 2)),
            approved(car_id, date(2024, 1, 2), date(2024, 1, 3)),
            Reservation {
                car_id,
                date_range: range(date(2024, 1, 9), date(2024, 1, 9)),
                status: RentalStatus::Waiting,
            },
        ];
        let days: Vec<_> = occupied_days(&existing).unwrap().into_iter().collect();
        assert_eq!(days, vec![date(2024, 1, 1), date(2024, 1, 2), date(2024, 1, 3)]);
    }
}
