pub mod bill_store;
pub mod car_catalog;
pub mod damage_store;
pub mod notification_service;
pub mod payment_store;
pub mod rental_store;
pub mod user_directory;

pub use bill_store::{BillStore, DuplicateBill};
pub use car_catalog::CarCatalog;
pub use damage_store::DamageStore;
pub use notification_service::NotificationService;
pub use payment_store::{DuplicatePayment, PaymentStore};
pub use rental_store::{OverlappingApproval, RentalStore};
pub use user_directory::UserDirectory;
