use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::DateRangeError;

/// Declares a UUID-backed identifier for an aggregate or an external reference.
macro_rules! define_id {
    ($(#[doc = $doc:literal] $name:ident),* $(,)?) => {
        $(
            #[doc = $doc]
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
            pub struct $name(Uuid);

            impl $name {
                pub fn new() -> Self {
                    Self(Uuid::new_v4())
                }

                pub fn from_uuid(uuid: Uuid) -> Self {
                    Self(uuid)
                }

                pub fn value(&self) -> Uuid {
                    self.0
                }
            }

            impl Default for $name {
                fn default() -> Self {
                    Self::new()
                }
            }
        )*
    };
}

define_id! {
    /// Rental ID - aggregate root of the rental ledger
    RentalId,
    /// Car ID - reference into the fleet catalog
    CarId,
    /// User ID - reference into the user directory (customers and employees)
    UserId,
    /// Offer ID - reference to a discount offer in the catalog
    OfferId,
    /// Bill ID
    BillId,
    /// Damage report ID
    DamageId,
    /// Payment ID
    PaymentId,
}

/// Role of the user issuing a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Customer,
    Staff,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "Customer",
            Role::Staff => "Staff",
            Role::Admin => "Admin",
        }
    }

    pub fn is_customer(&self) -> bool {
        matches!(self, Role::Customer)
    }

    /// Staff and admins are employees of the rental agency.
    pub fn is_employee(&self) -> bool {
        matches!(self, Role::Staff | Role::Admin)
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "CUSTOMER" => Ok(Role::Customer),
            "STAFF" => Ok(Role::Staff),
            "ADMIN" => Ok(Role::Admin),
            _ => Err(format!("Invalid role: {}", s)),
        }
    }
}

/// Inclusive calendar span of a rental.
///
/// Invariant: `start <= end`. Enforced by [`DateRange::new`]; ranges that
/// come back from storage or deserialization are re-checked by
/// [`DateRange::validate`] before any computation uses them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

/// Longest accepted rental, as `end - start` in days
pub const MAX_RENTAL_DAYS: i64 = 365;

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, DateRangeError> {
        if start > end {
            return Err(DateRangeError::StartAfterEnd { start, end });
        }
        if (end - start).num_days() > MAX_RENTAL_DAYS {
            return Err(DateRangeError::TooLong {
                start,
                end,
                max_days: MAX_RENTAL_DAYS,
            });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn validate(&self) -> Result<(), DateRangeError> {
        Self::new(self.start, self.end).map(|_| ())
    }

    /// Day-set of the range: every calendar day from `start` to `end`, both included.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + use<> {
        let end = self.end;
        std::iter::successors(Some(self.start), |d| d.checked_add_days(Days::new(1)))
            .take_while(move |d| *d <= end)
    }

    /// Rental duration as a date subtraction (`end - start`); a single-day
    /// range has a duration of zero.
    pub fn duration_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    /// Whether the two day-sets share at least one calendar day.
    ///
    /// Ranges that only touch at a boundary day overlap: the end date is
    /// itself occupied.
    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}

/// Discount percentage as stored on an offer (e.g. `10` for 10 %)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Percent(Decimal);

impl Percent {
    pub const ZERO: Percent = Percent(Decimal::ZERO);
    pub const HUNDRED: Percent = Percent(Decimal::ONE_HUNDRED);

    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Adds percentage points.
    pub fn add_points(self, points: Decimal) -> Self {
        Self(self.0 + points)
    }

    pub fn clamp_to_valid(self) -> Self {
        self.clamp(Self::ZERO, Self::HUNDRED)
    }

    /// Remaining fraction after applying the discount, `(100 - p) / 100`.
    pub fn remaining_fraction(&self) -> Decimal {
        (Decimal::ONE_HUNDRED - self.0) / Decimal::ONE_HUNDRED
    }
}

impl Default for Percent {
    fn default() -> Self {
        Self::ZERO
    }
}

impl From<Decimal> for Percent {
    fn from(value: Decimal) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(value: i64) -> Decimal {
        Decimal::from(value)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_rental_id_creation() {
        let id1 = RentalId::new();
        let id2 = RentalId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_car_id_from_uuid() {
        let uuid = Uuid::new_v4();
        let id = CarId::from_uuid(uuid);
        assert_eq!(id.value(), uuid);
    }

    #[test]
    fn test_role_parse_is_case_insensitive() {
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("STAFF".parse::<Role>().unwrap(), Role::Staff);
        assert_eq!("Customer".parse::<Role>().unwrap(), Role::Customer);
        assert!("manager".parse::<Role>().is_err());
    }

    #[test]
    fn test_role_kinds() {
        assert!(Role::Customer.is_customer());
        assert!(!Role::Customer.is_employee());
        assert!(Role::Staff.is_employee());
        assert!(Role::Admin.is_employee());
    }

    #[test]
    fn test_date_range_rejects_start_after_end() {
        let result = DateRange::new(date(2024, 1, 10), date(2024, 1, 5));
        assert_eq!(
            result.unwrap_err(),
            DateRangeError::StartAfterEnd {
                start: date(2024, 1, 10),
                end: date(2024, 1, 5),
            }
        );
    }

    #[test]
    fn test_date_range_length_is_bounded() {
        assert!(DateRange::new(date(2024, 1, 1), date(2024, 12, 31)).is_ok());
        assert!(DateRange::new(date(2023, 1, 1), date(2024, 1, 1)).is_ok());

        let result = DateRange::new(date(2024, 1, 1), date(2025, 1, 2));
        assert!(matches!(
            result,
            Err(DateRangeError::TooLong { max_days: MAX_RENTAL_DAYS, .. })
        ));

        let huge: DateRange =
            serde_json::from_str(r#"{"start":"1000-01-01","end":"9000-12-31"}"#).unwrap();
        assert!(matches!(
            huge.validate(),
            Err(DateRangeError::TooLong { .. })
        ));
    }

    #[test]
    fn test_date_range_single_day_occupies_one_day() {
        let range = DateRange::new(date(2024, 1, 5), date(2024, 1, 5)).unwrap();
        let days: Vec<_> = range.days().collect();
        assert_eq!(days, vec![date(2024, 1, 5)]);
        assert_eq!(range.duration_days(), 0);
    }

    #[test]
    fn test_date_range_days_are_inclusive_across_month_end() {
        let range = DateRange::new(date(2024, 1, 30), date(2024, 2, 2)).unwrap();
        let days: Vec<_> = range.days().collect();
        assert_eq!(
            days,
            vec![
                date(2024, 1, 30),
                date(2024, 1, 31),
                date(2024, 2, 1),
                date(2024, 2, 2)
            ]
        );
        assert_eq!(range.duration_days(), 3);
    }

    #[test]
    fn test_date_range_overlap_on_shared_boundary_day() {
        let a = DateRange::new(date(2024, 1, 1), date(2024, 1, 10)).unwrap();
        let b = DateRange::new(date(2024, 1, 10), date(2024, 1, 15)).unwrap();
        let c = DateRange::new(date(2024, 1, 11), date(2024, 1, 15)).unwrap();
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_deserialized_range_is_revalidated() {
        let range: DateRange =
            serde_json::from_str(r#"{"start":"2024-02-01","end":"2024-01-01"}"#).unwrap();
        assert!(range.validate().is_err());
    }

    #[test]
    fn test_percent_clamp_and_fraction() {
        assert_eq!(Percent::new(dec(120)).clamp_to_valid(), Percent::HUNDRED);
        assert_eq!(Percent::new(dec(-5)).clamp_to_valid(), Percent::ZERO);
        assert_eq!(Percent::new(dec(10)).add_points(dec(10)).value(), dec(20));
        assert_eq!(
            Percent::new(dec(25)).remaining_fraction(),
            Decimal::new(75, 2)
        );
    }
}
