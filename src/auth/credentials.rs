use crate::core::errors::MedviewError;
use crate::core::models::user::{Role, User};
use std::collections::HashMap;

/// Fixed username -> (bcrypt hash, role) table, built once at startup.
pub struct CredentialStore {
    users: HashMap<String, User>,
}

impl CredentialStore {
    /// Seeds the two built-in accounts, `doctor` and `student`.
    pub fn builtin(cost: u32, doctor_password: &str, student_password: &str) -> Result<Self, MedviewError> {
        Self::from_accounts(
            cost,
            &[("doctor", doctor_password, Role::Doctor), ("student", student_password, Role::Student)],
        )
    }

    pub fn from_accounts(cost: u32, accounts: &[(&str, &str, Role)]) -> Result<Self, MedviewError> {
        let mut users = HashMap::with_capacity(accounts.len());
        for &(username, password, role) in accounts {
            let password_hash = bcrypt::hash(password, cost)
                .map_err(|e| MedviewError::InternalServerError(format!("Password hashing error: {}", e)))?;
            users.insert(
                username.to_string(),
                User {
                    username: username.to_string(),
                    password_hash,
                    role,
                },
            );
        }
        Ok(CredentialStore { users })
    }

    /// Checks `password` against the stored hash. The bcrypt comparison runs
    /// on the blocking pool.
    pub async fn verify(&self, username: &str, password: &str) -> Result<User, MedviewError> {
        let user = self
            .users
            .get(username)
            .cloned()
            .ok_or(MedviewError::InvalidCredentials)?;

        let password = password.to_string();
        let hash = user.password_hash.clone();
        let matches = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .map_err(|e| MedviewError::InternalServerError(format!("password check panicked: {}", e)))?
            .map_err(|e| MedviewError::InternalServerError(format!("Password verification error: {}", e)))?;

        if matches {
            Ok(user)
        } else {
            Err(MedviewError::InvalidCredentials)
        }
    }
}
