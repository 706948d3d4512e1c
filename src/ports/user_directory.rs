use crate::domain::value_objects::{Role, UserId};
use async_trait::async_trait;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// User directory port
///
/// Identity and role assignment live outside the ledger.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Role of a user, `None` if the user does not exist.
    async fn get_role(&self, user_id: UserId) -> Result<Option<Role>>;
}
