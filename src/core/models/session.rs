use serde::{Deserialize, Serialize};

use super::user::Role;

/// The authenticated caller of a request. Stored in the session on login and
/// read back by the session middleware on every protected request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub username: String,
    pub role: Role,
}

impl Identity {
    pub fn new(username: &str, role: Role) -> Self {
        Identity {
            username: username.to_string(),
            role,
        }
    }
}
