//! Path management for expenser-cli
//!
//! Provides XDG-compliant path resolution for the user directory and the
//! per-user expense files.
//!
//! ## Path Resolution Order
//!
//! 1. `EXPENSER_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/expenser` or `~/.config/expenser`
//! 3. Windows: `%APPDATA%\expenser`

use std::fs;
use std::path::PathBuf;

use crate::error::ExpenseError;
use crate::models::FileHandle;

/// Manages all paths used by expenser-cli
#[derive(Debug, Clone)]
pub struct ExpenserPaths {
    /// Base directory for all expenser data
    base_dir: PathBuf,
}

impl ExpenserPaths {
    /// Create a new ExpenserPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, ExpenseError> {
        let base_dir = if let Ok(custom) = std::env::var("EXPENSER_DATA_DIR") {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create ExpenserPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.config/expenser/ or equivalent)
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the directory holding the per-user expense files
    pub fn expenses_dir(&self) -> PathBuf {
        self.base_dir.join("expenses")
    }

    /// Get the path of one user's expense file, named by their file handle
    pub fn expense_file(&self, handle: &FileHandle) -> PathBuf {
        self.expenses_dir().join(format!("{}.csv", handle))
    }

    /// Get the path to the user directory file
    pub fn users_file(&self) -> PathBuf {
        self.base_dir.join("users.json")
    }

    /// Create the base and expenses directories if they don't exist
    pub fn ensure_directories(&self) -> Result<(), ExpenseError> {
        for dir in [&self.base_dir, &self.expenses_dir()] {
            fs::create_dir_all(dir).map_err(|e| {
                ExpenseError::Config(format!(
                    "Failed to create directory {}: {}",
                    dir.display(),
                    e
                ))
            })?;
        }
        Ok(())
    }
}

#[cfg(unix)]
fn resolve_default_path() -> Result<PathBuf, ExpenseError> {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        if !xdg.is_empty() {
            return Ok(PathBuf::from(xdg).join("expenser"));
        }
    }

    let home = std::env::var("HOME")
        .map_err(|_| ExpenseError::Config("Could not determine home directory".into()))?;
    Ok(PathBuf::from(home).join(".config").join("expenser"))
}

#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, ExpenseError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| ExpenseError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("expenser"))
}
