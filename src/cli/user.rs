//! User CLI commands
//!
//! Registration and login against the user directory.

use clap::Args;

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::User;
use crate::storage::UserDirectory;

/// Arguments for the `register` command
#[derive(Args)]
pub struct RegisterArgs {
    /// Display name (letters and spaces)
    #[arg(long)]
    pub name: String,

    /// Login name (letters, numbers, underscores)
    #[arg(long)]
    pub username: String,

    /// Password (at least 4 characters)
    #[arg(long)]
    pub password: String,
}

/// Handle the `register` command
pub fn handle_register(directory: &UserDirectory, args: RegisterArgs) -> ExpenseResult<()> {
    let user = directory.register(&args.name, &args.username, &args.password)?;

    println!("Registration successful! Welcome, {}!", user.name);
    println!("Your expense file handle: {}", user.file_handle);
    Ok(())
}

/// Authenticate the credentials passed on the command line
pub fn authenticate(
    directory: &UserDirectory,
    username: Option<String>,
    password: Option<String>,
) -> ExpenseResult<User> {
    let username = username.ok_or_else(|| {
        ExpenseError::Config("this command requires --username (or EXPENSER_USERNAME)".into())
    })?;
    let password = password.ok_or_else(|| {
        ExpenseError::Config("this command requires --password (or EXPENSER_PASSWORD)".into())
    })?;

    directory.login(&username, &password)
}
