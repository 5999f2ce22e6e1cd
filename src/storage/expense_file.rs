//! Per-user expense file store
//!
//! One CSV file per user, named by the user's file handle. Inserts append;
//! updates load, replace in memory, and rewrite the whole file. Unreadable
//! lines are skipped with a warning so one bad record never takes the rest
//! of the file down with it.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;

use tracing::{debug, warn};

use crate::config::ExpenserPaths;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Expense, ExpenseId, FileHandle, UserId};

use super::record;

/// File-backed store for expense records
pub struct ExpenseFileStore {
    paths: ExpenserPaths,
}

impl ExpenseFileStore {
    /// Create a store rooted at the given paths
    pub fn new(paths: ExpenserPaths) -> Self {
        Self { paths }
    }

    fn file_path(&self, handle: &FileHandle) -> PathBuf {
        self.paths.expense_file(handle)
    }

    /// Append one expense to the user's file, writing the header row first
    /// if the file is new. Creates the file and its parent directory if
    /// absent.
    pub fn append(&self, handle: &FileHandle, expense: &Expense) -> ExpenseResult<()> {
        let path = self.file_path(handle);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ExpenseError::Storage(format!(
                    "Failed to create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let is_new = !path.exists();
        let file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&path)
            .map_err(|e| {
                ExpenseError::Storage(format!("Failed to open {}: {}", path.display(), e))
            })?;
        let mut writer = BufWriter::new(file);

        if is_new {
            writeln!(writer, "{}", record::HEADER)?;
        }
        writeln!(writer, "{}", record::encode(expense))?;
        writer.flush()?;

        debug!(handle = %handle, id = %expense.id(), "appended expense record");
        Ok(())
    }

    /// Load every decodable record from the user's file
    ///
    /// Returns an empty list if the file does not exist. The header row is
    /// skipped; blank lines are ignored; lines that fail to decode are
    /// logged and skipped. Every returned expense carries the given
    /// `user_id` regardless of what the rows embed.
    pub fn load_all(&self, handle: &FileHandle, user_id: &UserId) -> ExpenseResult<Vec<Expense>> {
        let path = self.file_path(handle);
        if !path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&path).map_err(|e| {
            ExpenseError::Storage(format!("Failed to open {}: {}", path.display(), e))
        })?;
        let reader = BufReader::new(file);

        let mut expenses = Vec::new();
        for (index, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| {
                ExpenseError::Storage(format!("Failed to read {}: {}", path.display(), e))
            })?;
            // First line is the header
            if index == 0 || line.trim().is_empty() {
                continue;
            }
            match record::decode(&line, user_id) {
                Ok(expense) => expenses.push(expense),
                Err(e) => {
                    warn!(line = %line, error = %e, "skipping unreadable expense record");
                }
            }
        }

        Ok(expenses)
    }

    /// Overwrite the user's file with the header and the given records
    pub fn save_all(&self, handle: &FileHandle, expenses: &[Expense]) -> ExpenseResult<()> {
        let path = self.file_path(handle);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ExpenseError::Storage(format!(
                    "Failed to create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let file = File::create(&path).map_err(|e| {
            ExpenseError::Storage(format!("Failed to create {}: {}", path.display(), e))
        })?;
        let mut writer = BufWriter::new(file);

        writeln!(writer, "{}", record::HEADER)?;
        for expense in expenses {
            writeln!(writer, "{}", record::encode(expense))?;
        }
        writer.flush()?;

        debug!(handle = %handle, count = expenses.len(), "rewrote expense file");
        Ok(())
    }

    /// Replace the record with the given id and rewrite the file
    ///
    /// The load and in-memory replace happen before any write, so a missing
    /// id returns [`ExpenseError::NotFound`] with the file untouched. The
    /// stored record keeps the matched id regardless of the replacement's.
    pub fn update(
        &self,
        handle: &FileHandle,
        id: ExpenseId,
        new_expense: &Expense,
    ) -> ExpenseResult<()> {
        let mut expenses = self.load_all(handle, new_expense.user_id())?;

        let slot = expenses
            .iter_mut()
            .find(|e| e.id() == id)
            .ok_or_else(|| ExpenseError::expense_not_found(id.to_string()))?;
        *slot = Expense::rehydrate(
            id,
            new_expense.user_id().clone(),
            new_expense.amount(),
            new_expense.timestamp(),
            new_expense.description(),
            new_expense.details().clone(),
        )?;

        self.save_all(handle, &expenses)
    }
}
