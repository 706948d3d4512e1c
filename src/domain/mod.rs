pub mod availability;
pub mod billing;
pub mod commands;
pub mod damage;
pub mod errors;
pub mod events;
pub mod payment;
pub mod rental;
pub mod value_objects;

pub use availability::Reservation;
pub use billing::{Bill, BillResult, Quote};
pub use damage::DamageRecord;
pub use errors::*;
pub use events::*;
pub use payment::Payment;
pub use rental::{Rental, RentalStatus};
pub use value_objects::*;
