//! expenser-cli - Command-line personal expense tracker
//!
//! This library provides the core functionality for the expenser CLI: a
//! single-process expense tracker where each registered user owns one CSV
//! file of categorized expenses (food, travel, electricity, or generic).
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Data-directory path resolution
//! - `error`: Custom error types
//! - `models`: Core data models (expenses, categories, users)
//! - `storage`: Per-user CSV files, the record codec, and the JSON user
//!   directory
//! - `services`: The expense repository (query façade)
//! - `display`: Terminal output formatting
//! - `export`: Standalone CSV export
//! - `cli`: clap subcommands and their handlers

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{ExpenseError, ExpenseResult};
