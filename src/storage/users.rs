//! User directory
//!
//! JSON-backed registry of users (name, username, password, user id, file
//! handle), stored as a single array in `users.json`. Consumed for
//! registration, login, and file-handle lookup; users are never deleted.

use std::path::PathBuf;

use crate::config::ExpenserPaths;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{FileHandle, User};

use super::file_io::{read_json, write_json_atomic};

/// Registry of users backed by a single JSON file
pub struct UserDirectory {
    path: PathBuf,
}

impl UserDirectory {
    /// Create a directory over the configured users file
    pub fn new(paths: &ExpenserPaths) -> Self {
        Self {
            path: paths.users_file(),
        }
    }

    fn load(&self) -> ExpenseResult<Vec<User>> {
        read_json(&self.path)
    }

    fn save(&self, users: &[User]) -> ExpenseResult<()> {
        write_json_atomic(&self.path, &users)
    }

    /// Register a new user
    ///
    /// Usernames are unique case-insensitively. The user id and file handle
    /// are generated here.
    pub fn register(
        &self,
        name: &str,
        username: &str,
        password: &str,
    ) -> ExpenseResult<User> {
        let mut users = self.load()?;

        if users
            .iter()
            .any(|u| u.username.eq_ignore_ascii_case(username))
        {
            return Err(ExpenseError::duplicate_user(username));
        }

        let user = User::new(name, username, password)?;
        users.push(user.clone());
        self.save(&users)?;

        Ok(user)
    }

    /// Look up a user by username and password
    ///
    /// An unknown username and a wrong password both report the user as not
    /// found, so callers cannot tell the two apart.
    pub fn login(&self, username: &str, password: &str) -> ExpenseResult<User> {
        let users = self.load()?;

        let user = users
            .iter()
            .find(|u| u.username.eq_ignore_ascii_case(username))
            .ok_or_else(|| ExpenseError::user_not_found(username))?;

        if !user.verify_password(password) {
            return Err(ExpenseError::user_not_found(username));
        }

        Ok(user.clone())
    }

    /// Look up the user owning the given file handle
    pub fn find_by_handle(&self, handle: &FileHandle) -> ExpenseResult<User> {
        let users = self.load()?;

        users
            .into_iter()
            .find(|u| &u.file_handle == handle)
            .ok_or_else(|| ExpenseError::user_not_found(handle.as_str()))
    }

    /// Whether a username is already taken
    pub fn user_exists(&self, username: &str) -> ExpenseResult<bool> {
        let users = self.load()?;
        Ok(users
            .iter()
            .any(|u| u.username.eq_ignore_ascii_case(username)))
    }
}
