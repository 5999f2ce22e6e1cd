//! User model
//!
//! A registered user of the expense manager. The password is stored in
//! clear text in the user directory, matching the original data format; a
//! known weakness that is out of scope to remediate here.

use serde::{Deserialize, Serialize};

use crate::error::{ExpenseError, ExpenseResult};

use super::ids::{FileHandle, UserId};

/// A registered user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Display name
    pub name: String,
    /// Unique login name
    pub username: String,
    /// Clear-text password
    pub password: String,
    /// Identifier stamped on this user's expenses
    pub user_id: UserId,
    /// Token naming this user's expense file
    pub file_handle: FileHandle,
}

impl User {
    /// Create a new user, deriving the user id from the username and
    /// generating a fresh file handle
    pub fn new(
        name: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> ExpenseResult<Self> {
        let username = username.into();
        let user = Self {
            name: name.into(),
            user_id: UserId::derive(&username),
            username,
            password: password.into(),
            file_handle: FileHandle::generate(),
        };
        user.validate()?;
        Ok(user)
    }

    /// Check all user invariants
    pub fn validate(&self) -> ExpenseResult<()> {
        if self.name.trim().is_empty() {
            return Err(ExpenseError::validation("name", "cannot be empty"));
        }
        if self.name.len() < 3 {
            return Err(ExpenseError::validation(
                "name",
                "must be at least 3 characters long",
            ));
        }
        if !self
            .name
            .chars()
            .all(|c| c.is_ascii_alphabetic() || c == ' ')
        {
            return Err(ExpenseError::validation(
                "name",
                "can only contain letters and spaces",
            ));
        }

        if self.username.trim().is_empty() {
            return Err(ExpenseError::validation("username", "cannot be empty"));
        }
        if self.username.len() < 3 {
            return Err(ExpenseError::validation(
                "username",
                "must be at least 3 characters long",
            ));
        }
        if !self
            .username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(ExpenseError::validation(
                "username",
                "can only contain letters, numbers, and underscores",
            ));
        }

        if self.password.trim().is_empty() {
            return Err(ExpenseError::validation("password", "cannot be empty"));
        }
        if self.password.len() < 4 {
            return Err(ExpenseError::validation(
                "password",
                "must be at least 4 characters long",
            ));
        }

        if self.file_handle.as_str().trim().is_empty() {
            return Err(ExpenseError::validation("file_handle", "cannot be empty"));
        }

        Ok(())
    }

    /// Compare a candidate password against the stored clear text
    pub fn verify_password(&self, password: &str) -> bool {
        self.password == password
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user() {
        let user = User::new("Jane Doe", "jane_d", "s3cret").unwrap();
        assert_eq!(user.username, "jane_d");
        assert!(user.user_id.as_str().starts_with("jane_d_"));
        assert!(user.file_handle.as_str().starts_with("CSV_"));
    }

    #[test]
    fn test_name_rules() {
        assert!(User::new("Jo", "jane_d", "s3cret").is_err());
        assert!(User::new("Jane2", "jane_d", "s3cret").is_err());
        assert!(User::new("Jane Doe", "jane_d", "s3cret").is_ok());
    }

    #[test]
    fn test_username_rules() {
        assert!(User::new("Jane Doe", "jd", "s3cret").is_err());
        assert!(User::new("Jane Doe", "jane d", "s3cret").is_err());
        assert!(User::new("Jane Doe", "jane_d99", "s3cret").is_ok());
    }

    #[test]
    fn test_password_rules() {
        assert!(User::new("Jane Doe", "jane_d", "abc").is_err());
        assert!(User::new("Jane Doe", "jane_d", "abcd").is_ok());
    }

    #[test]
    fn test_verify_password() {
        let user = User::new("Jane Doe", "jane_d", "s3cret").unwrap();
        assert!(user.verify_password("s3cret"));
        assert!(!user.verify_password("wrong"));
    }

    #[test]
    fn test_serialization_round_trip() {
        let user = User::new("Jane Doe", "jane_d", "s3cret").unwrap();
        let json = serde_json::to_string(&user).unwrap();
        let loaded: User = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded.username, user.username);
        assert_eq!(loaded.file_handle, user.file_handle);
    }
}
