//! Identifier types for expenses and users
//!
//! Expense ids are newtype-wrapped UUIDs so they cannot be confused with
//! other strings at compile time. User ids and file handles are opaque
//! string tokens carried through from the user directory.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Unique identifier of an expense record
///
/// Displays as `EXP_<uuid>`; parsing accepts the prefixed form as written
/// in the storage files as well as a bare UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpenseId(Uuid);

impl ExpenseId {
    /// Create a new random ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ExpenseId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EXP_{}", self.0.simple())
    }
}

impl From<Uuid> for ExpenseId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl FromStr for ExpenseId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.strip_prefix("EXP_").unwrap_or(s);
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Identifier of a user, derived from the username at registration
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Derive a user id from a username: lowercased, whitespace collapsed
    /// to underscores, with a random suffix for uniqueness
    pub fn derive(username: &str) -> Self {
        let normalized: String = username
            .to_lowercase()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("_");
        let suffix = &Uuid::new_v4().simple().to_string()[..8];
        Self(format!("{}_{}", normalized, suffix))
    }

    /// View the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the id is empty (only possible for rehydrated values)
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for UserId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for UserId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Opaque token naming one user's expense storage file
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileHandle(String);

impl FileHandle {
    /// Generate a fresh handle: `CSV_` plus 12 uppercase hex characters
    pub fn generate() -> Self {
        let token = Uuid::new_v4().simple().to_string()[..12].to_uppercase();
        Self(format!("CSV_{}", token))
    }

    /// View the handle as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FileHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for FileHandle {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for FileHandle {
    fn from(s: String) -> Self {
        Self(s)
    }
}
