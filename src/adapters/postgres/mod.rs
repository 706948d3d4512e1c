pub mod bill_store;
pub mod damage_store;
pub mod payment_store;
pub mod rental_store;

pub use bill_store::BillStore as PostgresBillStore;
pub use damage_store::DamageStore as PostgresDamageStore;
pub use payment_store::PaymentStore as PostgresPaymentStore;
pub use rental_store::RentalStore as PostgresRentalStore;
