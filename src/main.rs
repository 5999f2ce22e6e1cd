use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use expenser_cli::cli::{
    authenticate, handle_expense_command, handle_register, ExpenseCommands, RegisterArgs,
};
use expenser_cli::config::ExpenserPaths;
use expenser_cli::services::ExpenseRepository;
use expenser_cli::storage::UserDirectory;

#[derive(Parser)]
#[command(
    name = "expenser",
    version,
    about = "Command-line personal expense tracker",
    long_about = "expenser is a command-line expense tracker. Register once, then \
                  record categorized expenses (food, travel, electricity, or any \
                  label you like), query and summarize them, and export them to CSV. \
                  Each user's expenses live in their own file."
)]
struct Cli {
    /// Username for authenticated commands
    #[arg(short = 'u', long, global = true, env = "EXPENSER_USERNAME")]
    username: Option<String>,

    /// Password for authenticated commands
    #[arg(short = 'p', long, global = true, env = "EXPENSER_PASSWORD")]
    password: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Register a new user
    Register(RegisterArgs),

    #[command(flatten)]
    Expense(ExpenseCommands),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let paths = ExpenserPaths::new()?;
    paths.ensure_directories()?;
    let directory = UserDirectory::new(&paths);

    match cli.command {
        Commands::Register(args) => handle_register(&directory, args)?,
        Commands::Expense(cmd) => {
            let user = authenticate(&directory, cli.username, cli.password)?;
            let repo = ExpenseRepository::for_user(paths, &user);
            handle_expense_command(&repo, &user, cmd)?;
        }
    }

    Ok(())
}
