use crate::domain::value_objects::{Role, UserId};
use crate::ports::user_directory::{Result, UserDirectory as UserDirectoryTrait};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// In-memory UserDirectory
///
/// Users are registered together with their role.
pub struct UserDirectory {
    roles: Mutex<HashMap<UserId, Role>>,
}

impl UserDirectory {
    pub fn new() -> Self {
        Self {
            roles: Mutex::new(HashMap::new()),
        }
    }

    pub fn add_user(&self, user_id: UserId, role: Role) {
        self.roles.lock().unwrap().insert(user_id, role);
    }
}

impl Default for UserDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserDirectoryTrait for UserDirectory {
    async fn get_role(&self, user_id: UserId) -> Result<Option<Role>> {
        Ok(self.roles.lock().unwrap().get(&user_id).copied())
    }
}
