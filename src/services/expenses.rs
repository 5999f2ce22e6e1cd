//! Expense repository
//!
//! Query façade over one user's expense file. Read operations never fail:
//! an I/O error is logged and the caller gets an empty result, so query
//! paths stay usable. Only `add` and `update` surface errors. No state is
//! cached between calls; every operation re-reads the file.

use chrono::NaiveDate;
use tracing::warn;

use crate::config::ExpenserPaths;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Expense, ExpenseId, FileHandle, User, UserId};
use crate::storage::ExpenseFileStore;

/// Query façade over one user's stored expenses
pub struct ExpenseRepository {
    store: ExpenseFileStore,
    handle: FileHandle,
    user_id: UserId,
}

impl ExpenseRepository {
    /// Create a repository over the given store, scoped to one file handle
    /// and user identity
    pub fn new(store: ExpenseFileStore, handle: FileHandle, user_id: UserId) -> Self {
        Self {
            store,
            handle,
            user_id,
        }
    }

    /// Convenience constructor for a logged-in user
    pub fn for_user(paths: ExpenserPaths, user: &User) -> Self {
        Self::new(
            ExpenseFileStore::new(paths),
            user.file_handle.clone(),
            user.user_id.clone(),
        )
    }

    fn load(&self) -> ExpenseResult<Vec<Expense>> {
        self.store.load_all(&self.handle, &self.user_id)
    }

    /// Persist a new expense
    pub fn add(&self, expense: &Expense) -> ExpenseResult<()> {
        self.store.append(&self.handle, expense)
    }

    /// Replace the expense with the given id
    pub fn update(&self, id: ExpenseId, expense: &Expense) -> ExpenseResult<()> {
        self.store.update(&self.handle, id, expense)
    }

    /// All stored expenses; empty on I/O error
    pub fn get_all(&self) -> Vec<Expense> {
        match self.load() {
            Ok(expenses) => expenses,
            Err(e) => {
                warn!(error = %e, "failed to load expenses, returning empty result");
                Vec::new()
            }
        }
    }

    /// Look up one expense by id
    ///
    /// Reports not-found both when the id is absent and when the underlying
    /// load failed.
    pub fn get_by_id(&self, id: ExpenseId) -> ExpenseResult<Expense> {
        let expenses = self.load().map_err(|e| {
            warn!(error = %e, "failed to load expenses during id lookup");
            ExpenseError::expense_not_found(id.to_string())
        })?;

        expenses
            .into_iter()
            .find(|e| e.id() == id)
            .ok_or_else(|| ExpenseError::expense_not_found(id.to_string()))
    }

    /// Expenses in the named category, matched case-insensitively
    pub fn get_by_category(&self, category: &str) -> Vec<Expense> {
        self.get_all()
            .into_iter()
            .filter(|e| e.category().matches(category))
            .collect()
    }

    /// Expenses on exactly the given date
    pub fn get_by_date(&self, date: NaiveDate) -> Vec<Expense> {
        self.get_all()
            .into_iter()
            .filter(|e| e.date() == date)
            .collect()
    }

    /// Expenses within the inclusive date range
    pub fn get_by_date_range(&self, from: NaiveDate, to: NaiveDate) -> Vec<Expense> {
        self.get_all()
            .into_iter()
            .filter(|e| e.date() >= from && e.date() <= to)
            .collect()
    }

    /// Sum of all amounts; 0.0 on empty or error
    pub fn total_amount(&self) -> f64 {
        self.get_all().iter().map(Expense::amount).sum()
    }

    /// Sum of amounts in the named category; 0.0 on empty or error
    pub fn total_amount_by_category(&self, category: &str) -> f64 {
        self.get_by_category(category)
            .iter()
            .map(Expense::amount)
            .sum()
    }

    /// Sorted distinct category names actually present in the data
    pub fn available_categories(&self) -> Vec<String> {
        let mut categories: Vec<String> = self
            .get_all()
            .iter()
            .map(|e| e.category().name().to_string())
            .collect();
        categories.sort();
        categories.dedup();
        categories
    }
}
