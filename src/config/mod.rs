//! Configuration module for expenser-cli
//!
//! Provides XDG-compliant path resolution for the data directory.

pub mod paths;

pub use paths::ExpenserPaths;
