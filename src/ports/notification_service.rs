use crate::domain::events::DomainEvent;
use async_trait::async_trait;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Notification service port
///
/// Abstracts how users are told about their rentals (email, SMS, push).
#[async_trait]
pub trait NotificationService: Send + Sync {
    /// Deliver a notification for a domain event.
    ///
    /// Implementations decide which events concern which user and may
    /// ignore the rest.
    async fn notify(&self, event: &DomainEvent) -> Result<()>;
}
