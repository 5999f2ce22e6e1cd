//! Storage layer for expenser-cli
//!
//! Per-user CSV expense files plus a JSON user directory with atomic
//! writes and automatic directory creation.

pub mod expense_file;
pub mod file_io;
pub mod record;
pub mod users;

pub use expense_file::ExpenseFileStore;
pub use file_io::{read_json, write_json_atomic};
pub use users::UserDirectory;
