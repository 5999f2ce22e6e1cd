//! CLI command handlers
//!
//! Bridges clap argument parsing with the storage and service layers.

pub mod expense;
pub mod user;

pub use expense::{handle_expense_command, AddCommands, ExpenseCommands};
pub use user::{authenticate, handle_register, RegisterArgs};
