//! In-memory user accounts with argon2 password hashing.

use std::collections::HashMap;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use newsdesk_core::content::status::Role;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct UserRecord {
    pub id: Uuid,
    pub username: String,
    pub role: Role,
    password_hash: String,
}

#[derive(Debug, Error)]
pub enum UserError {
    #[error("username '{0}' is already taken")]
    Taken(String),
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("password hashing failed")]
    Hash,
}

#[derive(Debug, Default)]
pub struct UserDirectory {
    by_name: HashMap<String, UserRecord>,
}

impl UserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an account. Usernames are unique, case-sensitive.
    pub fn create(&mut self, username: &str, password: &str, role: Role) -> Result<Uuid, UserError> {
        if self.by_name.contains_key(username) {
            return Err(UserError::Taken(username.to_string()));
        }
        let salt = SaltString::generate(&mut OsRng);
        let password_hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|_| UserError::Hash)?
            .to_string();
        let id = Uuid::new_v4();
        self.by_name.insert(
            username.to_string(),
            UserRecord {
                id,
                username: username.to_string(),
                role,
                password_hash,
            },
        );
        Ok(id)
    }

    pub fn get(&self, username: &str) -> Option<&UserRecord> {
        self.by_name.get(username)
    }

    /// Verify a username/password pair. The same error covers unknown
    /// users and wrong passwords.
    pub fn authenticate(&self, username: &str, password: &str) -> Result<&UserRecord, UserError> {
        let user = self
            .by_name
            .get(username)
            .ok_or(UserError::InvalidCredentials)?;
        let parsed =
            PasswordHash::new(&user.password_hash).map_err(|_| UserError::InvalidCredentials)?;
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .map_err(|_| UserError::InvalidCredentials)?;
        Ok(user)
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}
