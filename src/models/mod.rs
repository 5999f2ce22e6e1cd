//! Core data models for expenser-cli
//!
//! This module contains the data structures that represent the domain:
//! expenses with category-specific payloads, users, and identifier types.

pub mod category;
pub mod expense;
pub mod ids;
pub mod user;

pub use category::{Category, MealType, TransportMode};
pub use expense::{CategoryDetails, Expense, MAX_AMOUNT, MAX_DISTANCE_KM, MAX_UNITS_CONSUMED};
pub use ids::{ExpenseId, FileHandle, UserId};
pub use user::User;
