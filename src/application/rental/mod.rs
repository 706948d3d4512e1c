mod billing_service;
mod damage_service;
mod errors;
mod payment_service;
mod rental_service;

pub use billing_service::{BillOutcome, generate_bill};
pub use damage_service::{assess_damage, report_damage};
pub use errors::{RentalApplicationError, Result};
pub use payment_service::{find_payment, record_payment};
pub use rental_service::{ServiceDependencies, change_rental_status, rented_dates, request_rental};
