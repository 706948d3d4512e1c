use crate::domain::events::DomainEvent;
use crate::ports::notification_service::{NotificationService as NotificationServiceTrait, Result};
use async_trait::async_trait;
use std::sync::Mutex;

/// Mock implementation of NotificationService
///
/// Sends nothing. Events are logged and kept so tests can inspect them.
pub struct NotificationService {
    sent: Mutex<Vec<DomainEvent>>,
}

impl NotificationService {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
        }
    }

    /// Events notified so far, oldest first
    pub fn sent(&self) -> Vec<DomainEvent> {
        self.sent.lock().unwrap().clone()
    }
}

impl Default for NotificationService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NotificationServiceTrait for NotificationService {
    async fn notify(&self, event: &DomainEvent) -> Result<()> {
        if let DomainEvent::RentalStatusChanged(e) = event {
            tracing::info!(
                user_id = %e.requested_by.value(),
                rental_id = %e.rental_id.value(),
                status = %e.new_status,
                "Notifying requester of rental status"
            );
        }
        self.sent.lock().unwrap().push(event.clone());
        Ok(())
    }
}
