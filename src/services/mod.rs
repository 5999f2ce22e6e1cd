//! Service layer for expenser-cli
//!
//! Query and mutation façades on top of the storage layer.

pub mod expenses;

pub use expenses::ExpenseRepository;
