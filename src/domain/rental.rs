use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{
    CarId, DateRange, OfferId, RentalError, RentalId, RentalRequested, RentalStatusChanged,
    Reservation, Role, UserId, availability,
};

/// Rental status
///
/// ```text
/// Waiting ──> Approved ──> Completed
///    │           │
///    │           └──────> Cancelled
///    ├──> Rejected
///    └──> Cancelled
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RentalStatus {
    Waiting,
    Approved,
    Rejected,
    Cancelled,
    Completed,
}

impl RentalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RentalStatus::Waiting => "Waiting",
            RentalStatus::Approved => "Approved",
            RentalStatus::Rejected => "Rejected",
            RentalStatus::Cancelled => "Cancelled",
            RentalStatus::Completed => "Completed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            RentalStatus::Rejected | RentalStatus::Cancelled | RentalStatus::Completed
        )
    }

    pub fn can_transition_to(&self, to: RentalStatus) -> bool {
        matches!(
            (self, to),
            (
                RentalStatus::Waiting,
                RentalStatus::Approved | RentalStatus::Rejected | RentalStatus::Cancelled
            ) | (
                RentalStatus::Approved,
                RentalStatus::Completed | RentalStatus::Cancelled
            )
        )
    }
}

impl std::fmt::Display for RentalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RentalStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "WAITING" => Ok(RentalStatus::Waiting),
            "APPROVED" => Ok(RentalStatus::Approved),
            "REJECTED" => Ok(RentalStatus::Rejected),
            "CANCELLED" => Ok(RentalStatus::Cancelled),
            "COMPLETED" => Ok(RentalStatus::Completed),
            _ => Err(format!("Invalid rental status: {}", s)),
        }
    }
}

/// Rental aggregate - one request for one car over one date range
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rental {
    pub rental_id: RentalId,

    // References to other aggregates (IDs only)
    pub car_id: CarId,
    pub requested_by: UserId,
    pub approved_by: Option<UserId>,
    pub offer_id: Option<OfferId>,

    pub date_range: DateRange,
    pub status: RentalStatus,

    // Audit
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Rental {
    pub fn reservation(&self) -> Reservation {
        Reservation {
            car_id: self.car_id,
            date_range: self.date_range,
            status: self.status,
        }
    }
}

/// Pure function: request a rental
///
/// The new rental waits for an employee's decision. Availability at request
/// time is checked by the caller against the approved snapshot.
pub fn request_rental(
    car_id: CarId,
    requested_by: UserId,
    offer_id: Option<OfferId>,
    date_range: DateRange,
    requested_at: DateTime<Utc>,
) -> (Rental, RentalRequested) {
    let rental_id = RentalId::new();

    let rental = Rental {
        rental_id,
        car_id,
        requested_by,
        approved_by: None,
        offer_id,
        date_range,
        status: RentalStatus::Waiting,
        created_at: requested_at,
        updated_at: requested_at,
    };

    let event = RentalRequested {
        rental_id,
        car_id,
        requested_by,
        offer_id,
        date_range,
        requested_at,
    };

    (rental, event)
}

/// Whether a user with `role` may move a rental to `new_status`.
///
/// Customers may only cancel; staff and admins may set any status.
pub fn can_change_status(role: Role, new_status: RentalStatus) -> bool {
    role.is_employee() || new_status == RentalStatus::Cancelled
}

/// Pure function: move a rental to a new status
///
/// Business rules:
/// - Only the transitions drawn on [`RentalStatus`] are allowed
/// - Approval requires the car to be free on every day of the rental,
///   checked against the approved rentals of the same car
/// - The approver is recorded on approval
///
/// `approved_rentals` is the approved snapshot for the car, read in the same
/// unit of work that will persist the result.
pub fn change_status(
    rental: &Rental,
    new_status: RentalStatus,
    changed_by: UserId,
    approved_rentals: &[Reservation],
    changed_at: DateTime<Utc>,
) -> Result<(Rental, RentalStatusChanged), RentalError> {
    if !rental.status.can_transition_to(new_status) {
        return Err(RentalError::InvalidTransition {
            from: rental.status,
            to: new_status,
        });
    }

    let mut approved_by = rental.approved_by;
    if new_status == RentalStatus::Approved {
        let same_car: Vec<Reservation> = approved_rentals
            .iter()
            .filter(|r| r.car_id == rental.car_id)
            .cloned()
            .collect();
        if !availability::is_available(&same_car, &rental.date_range)? {
            return Err(RentalError::CarNotAvailable);
        }
        approved_by = Some(changed_by);
    }

    let new_rental = Rental {
        status: new_status,
        approved_by,
        updated_at: changed_at,
        ..rental.clone()
    };

    let event = RentalStatusChanged {
        rental_id: rental.rental_id,
        car_id: rental.car_id,
        requested_by: rental.requested_by,
        old_status: rental.status,
        new_status,
        changed_by,
        changed_at,
    };

    Ok((new_rental, event))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn waiting_rental(car_id: CarId, start: NaiveDate, end: NaiveDate) -> Rental {
        let range = DateRange::new(start, end).unwrap();
        let (rental, _) = request_rental(car_id, UserId::new(), None, range, Utc::now());
        rental
    }

    fn approved_reservation(car_id: CarId, start: NaiveDate, end: NaiveDate) -> Reservation {
        Reservation {
            car_id,
            date_range: DateRange::new(start, end).unwrap(),
            status: RentalStatus::Approved,
        }
    }

    #[test]
    fn test_request_rental_creates_waiting_rental() {
        let car_id = CarId::new();
        let user_id = UserId::new();
        let offer_id = OfferId::new();
        let range = DateRange::new(date(2024, 1, 1), date(2024, 1, 4)).unwrap();
        let now = Utc::now();

        let (rental, event) = request_rental(car_id, user_id, Some(offer_id), range, now);

        assert_eq!(rental.status, RentalStatus::Waiting);
        assert_eq!(rental.approved_by, None);
        assert_eq!(rental.car_id, car_id);
        assert_eq!(rental.requested_by, user_id);
        assert_eq!(rental.offer_id, Some(offer_id));
        assert_eq!(rental.created_at, now);

        assert_eq!(event.rental_id, rental.rental_id);
        assert_eq!(event.date_range, range);
    }

    #[test]
    fn test_status_transition_table() {
        use RentalStatus::*;
        let all = [Waiting, Approved, Rejected, Cancelled, Completed];
        let allowed = [
            (Waiting, Approved),
            (Waiting, Rejected),
            (Waiting, Cancelled),
            (Approved, Completed),
            (Approved, Cancelled),
        ];
        for from in all {
            for to in all {
                assert_eq!(
                    from.can_transition_to(to),
                    allowed.contains(&(from, to)),
                    "{} -> {}",
                    from,
                    to
                );
            }
        }
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(!RentalStatus::Waiting.is_terminal());
        assert!(!RentalStatus::Approved.is_terminal());
        assert!(RentalStatus::Rejected.is_terminal());
        assert!(RentalStatus::Cancelled.is_terminal());
        assert!(RentalStatus::Completed.is_terminal());
    }

    #[test]
    fn test_status_parse_is_case_insensitive() {
        assert_eq!(
            "APPROVED".parse::<RentalStatus>().unwrap(),
            RentalStatus::Approved
        );
        assert_eq!(
            "cancelled".parse::<RentalStatus>().unwrap(),
            RentalStatus::Cancelled
        );
        assert!("returned".parse::<RentalStatus>().is_err());
    }

    #[test]
    fn test_approve_free_car_records_approver() {
        let car_id = CarId::new();
        let rental = waiting_rental(car_id, date(2024, 1, 1), date(2024, 1, 4));
        let staff = UserId::new();
        let changed_at = rental.created_at + Duration::hours(2);

        let (approved, event) =
            change_status(&rental, RentalStatus::Approved, staff, &[], changed_at).unwrap();

        assert_eq!(approved.status, RentalStatus::Approved);
        assert_eq!(approved.approved_by, Some(staff));
        assert_eq!(approved.updated_at, changed_at);
        assert_eq!(event.old_status, RentalStatus::Waiting);
        assert_eq!(event.new_status, RentalStatus::Approved);
        assert_eq!(event.changed_by, staff);
    }

    #[test]
    fn test_approve_fails_on_shared_boundary_day() {
        let car_id = CarId::new();
        let rental = waiting_rental(car_id, date(2024, 1, 10), date(2024, 1, 15));
        let existing = vec![approved_reservation(car_id, date(2024, 1, 1), date(2024, 1, 10))];

        let result = change_status(
            &rental,
            RentalStatus::Approved,
            UserId::new(),
            &existing,
            Utc::now(),
        );
        assert_eq!(result.unwrap_err(), RentalError::CarNotAvailable);
    }

    #[test]
    fn test_approve_ignores_other_cars() {
        let car_id = CarId::new();
        let rental = waiting_rental(car_id, date(2024, 1, 1), date(2024, 1, 4));
        let existing = vec![approved_reservation(
            CarId::new(),
            date(2024, 1, 1),
            date(2024, 1, 4),
        )];

        let result = change_status(
            &rental,
            RentalStatus::Approved,
            UserId::new(),
            &existing,
            Utc::now(),
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_second_approval_is_invalid_transition() {
        let car_id = CarId::new();
        let rental = waiting_rental(car_id, date(2024, 1, 1), date(2024, 1, 4));
        let (approved, _) =
            change_status(&rental, RentalStatus::Approved, UserId::new(), &[], Utc::now())
                .unwrap();

        let result = change_status(
            &approved,
            RentalStatus::Approved,
            UserId::new(),
            &[],
            Utc::now(),
        );
        assert_eq!(
            result.unwrap_err(),
            RentalError::InvalidTransition {
                from: RentalStatus::Approved,
                to: RentalStatus::Approved,
            }
        );
    }

    #[test]
    fn test_completed_rental_cannot_change() {
        let car_id = CarId::new();
        let rental = waiting_rental(car_id, date(2024, 1, 1), date(2024, 1, 4));
        let staff = UserId::new();
        let (approved, _) =
            change_status(&rental, RentalStatus::Approved, staff, &[], Utc::now()).unwrap();
        let (completed, _) =
            change_status(&approved, RentalStatus::Completed, staff, &[], Utc::now()).unwrap();

        for to in [
            RentalStatus::Waiting,
            RentalStatus::Approved,
            RentalStatus::Cancelled,
            RentalStatus::Rejected,
        ] {
            let result = change_status(&completed, to, staff, &[], Utc::now());
            assert!(matches!(result, Err(RentalError::InvalidTransition { .. })));
        }
    }

    #[test]
    fn test_cancel_keeps_approver() {
        let car_id = CarId::new();
        let rental = waiting_rental(car_id, date(2024, 1, 1), date(2024, 1, 4));
        let staff = UserId::new();
        let (approved, _) =
            change_status(&rental, RentalStatus::Approved, staff, &[], Utc::now()).unwrap();

        let (cancelled, _) = change_status(
            &approved,
            RentalStatus::Cancelled,
            approved.requested_by,
            &[],
            Utc::now(),
        )
        .unwrap();

        assert_eq!(cancelled.status, RentalStatus::Cancelled);
        assert_eq!(cancelled.approved_by, Some(staff));
    }

    #[test]
    fn test_reject_does_not_check_availability() {
        let car_id = CarId::new();
        let rental = waiting_rental(car_id, date(2024, 1, 1), date(2024, 1, 4));
        let existing = vec![approved_reservation(car_id, date(2024, 1, 1), date(2024, 1, 4))];

        let (rejected, _) = change_status(
            &rental,
            RentalStatus::Rejected,
            UserId::new(),
            &existing,
            Utc::now(),
        )
        .unwrap();
        assert_eq!(rejected.status, RentalStatus::Rejected);
        assert_eq!(rejected.approved_by, None);
    }

    #[test]
    fn test_customer_may_only_cancel() {
        assert!(can_change_status(Role::Customer, RentalStatus::Cancelled));
        assert!(!can_change_status(Role::Customer, RentalStatus::Approved));
        assert!(!can_change_status(Role::Customer, RentalStatus::Completed));
        assert!(can_change_status(Role::Staff, RentalStatus::Approved));
        assert!(can_change_status(Role::Admin, RentalStatus::Rejected));
    }
}
