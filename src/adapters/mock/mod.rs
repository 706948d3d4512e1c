pub mod car_catalog;
pub mod notification_service;
pub mod seed;
pub mod user_directory;

pub use car_catalog::CarCatalog;
pub use notification_service::NotificationService;
pub use user_directory::UserDirectory;
