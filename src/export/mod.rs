//! Export functionality

pub mod csv;

pub use csv::{default_export_filename, export_expenses};
