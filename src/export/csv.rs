//! CSV export
//!
//! Writes a standalone CSV file with the same column scheme as the storage
//! files, to a caller-chosen destination.

use std::io::Write;

use chrono::Utc;

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::Expense;
use crate::storage::record;

/// Write the given expenses as CSV: header row, then one record per line
pub fn export_expenses<W: Write>(expenses: &[Expense], writer: &mut W) -> ExpenseResult<()> {
    writeln!(writer, "{}", record::HEADER)
        .map_err(|e| ExpenseError::Export(e.to_string()))?;

    for expense in expenses {
        writeln!(writer, "{}", record::encode(expense))
            .map_err(|e| ExpenseError::Export(e.to_string()))?;
    }

    Ok(())
}

/// Default export filename derived from the user's name and the current time
pub fn default_export_filename(user_name: &str) -> String {
    format!(
        "{}_expenses_{}.csv",
        user_name,
        Utc::now().timestamp_millis()
    )
}
