use serde::{Deserialize, Serialize};

use crate::domain::types::{UserId, UserRole};
use crate::domain::user::User;

/// Identity of the caller, passed explicitly into every service operation.
///
/// Stored as JSON in the session identity after a successful login.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub id: UserId,
    pub email: String,
    pub role: UserRole,
}

impl AuthenticatedUser {
    pub fn has_role(&self, role: UserRole) -> bool {
        self.role == role
    }
}

impl From<&User> for AuthenticatedUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.as_str().to_string(),
            role: user.role,
        }
    }
}
