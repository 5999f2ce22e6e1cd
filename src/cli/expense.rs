//! Expense CLI commands
//!
//! Bridges clap argument parsing with the repository. Every command here
//! operates on the logged-in user's own expense file.

use std::fs::File;
use std::io::BufWriter;

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};
use clap::Subcommand;

use crate::display::{format_expense_list, format_summary};
use crate::error::{ExpenseError, ExpenseResult};
use crate::export::{default_export_filename, export_expenses};
use crate::models::{CategoryDetails, Expense, ExpenseId, MealType, TransportMode, User};
use crate::services::ExpenseRepository;

/// Expense subcommands (all require login)
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Add a new expense
    #[command(subcommand)]
    Add(AddCommands),

    /// List expenses, optionally filtered
    List {
        /// Filter by category name (case-insensitive)
        #[arg(short, long)]
        category: Option<String>,
        /// Exact date filter (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<NaiveDate>,
        /// Start of an inclusive date range (YYYY-MM-DD)
        #[arg(long, requires = "to")]
        from: Option<NaiveDate>,
        /// End of an inclusive date range (YYYY-MM-DD)
        #[arg(long, requires = "from")]
        to: Option<NaiveDate>,
    },

    /// Show one expense by id
    Show {
        /// Expense id (EXP_...)
        id: String,
    },

    /// Update fields of an existing expense
    Update {
        /// Expense id (EXP_...)
        id: String,
        /// New amount
        #[arg(long)]
        amount: Option<f64>,
        /// New date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<NaiveDate>,
        /// New description
        #[arg(long)]
        description: Option<String>,
        /// New restaurant name (food expenses)
        #[arg(long)]
        restaurant: Option<String>,
        /// New meal type (food expenses)
        #[arg(long)]
        meal: Option<String>,
        /// New transport mode (travel expenses)
        #[arg(long)]
        mode: Option<String>,
        /// New destination (travel expenses)
        #[arg(long)]
        destination: Option<String>,
        /// New distance in km (travel expenses)
        #[arg(long)]
        distance: Option<f64>,
        /// New bill number (electricity expenses)
        #[arg(long)]
        bill: Option<String>,
        /// New units consumed in kWh (electricity expenses)
        #[arg(long)]
        units: Option<f64>,
        /// New provider (electricity expenses)
        #[arg(long)]
        provider: Option<String>,
    },

    /// Show the total and per-category breakdown
    Summary,

    /// List the categories present in the stored data
    Categories,

    /// Export all expenses to a standalone CSV file
    Export {
        /// Output path; defaults to <name>_expenses_<timestamp>.csv
        #[arg(short, long)]
        output: Option<String>,
    },
}

/// Category-specific `add` subcommands
#[derive(Subcommand)]
pub enum AddCommands {
    /// Add a food expense
    Food {
        /// Amount spent
        #[arg(long)]
        amount: f64,
        /// Restaurant name
        #[arg(long)]
        restaurant: String,
        /// Meal type: Breakfast, Lunch, Dinner, or Snacks
        #[arg(long)]
        meal: String,
        /// Expense date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Free-form description
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Add a travel expense
    Travel {
        /// Amount spent
        #[arg(long)]
        amount: f64,
        /// Transport mode: Car, Bus, Train, Flight, or Taxi
        #[arg(long)]
        mode: String,
        /// Destination
        #[arg(long)]
        destination: String,
        /// Distance in kilometers
        #[arg(long)]
        distance: f64,
        /// Expense date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Free-form description
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Add an electricity bill
    Electricity {
        /// Amount spent
        #[arg(long)]
        amount: f64,
        /// Bill number
        #[arg(long)]
        bill: String,
        /// Units consumed in kWh
        #[arg(long)]
        units: f64,
        /// Provider name
        #[arg(long)]
        provider: String,
        /// Expense date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Free-form description
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Add a generic expense under any category label
    Generic {
        /// Amount spent
        #[arg(long)]
        amount: f64,
        /// Category label
        #[arg(long, default_value = "Miscellaneous")]
        category: String,
        /// Expense date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Free-form description
        #[arg(long, default_value = "")]
        description: String,
    },
}

/// Handle an expense subcommand for the logged-in user
pub fn handle_expense_command(
    repo: &ExpenseRepository,
    user: &User,
    cmd: ExpenseCommands,
) -> ExpenseResult<()> {
    match cmd {
        ExpenseCommands::Add(add) => handle_add(repo, user, add),
        ExpenseCommands::List {
            category,
            date,
            from,
            to,
        } => {
            let expenses = if let Some(category) = category {
                repo.get_by_category(&category)
            } else if let Some(date) = date {
                repo.get_by_date(date)
            } else if let (Some(from), Some(to)) = (from, to) {
                if from > to {
                    return Err(ExpenseError::validation(
                        "date_range",
                        "start date cannot be after end date",
                    ));
                }
                repo.get_by_date_range(from, to)
            } else {
                repo.get_all()
            };
            print!("{}", format_expense_list(&expenses));
            Ok(())
        }
        ExpenseCommands::Show { id } => {
            let expense = repo.get_by_id(parse_id(&id)?)?;
            println!("{}", expense);
            Ok(())
        }
        ExpenseCommands::Update {
            id,
            amount,
            date,
            description,
            restaurant,
            meal,
            mode,
            destination,
            distance,
            bill,
            units,
            provider,
        } => {
            let id = parse_id(&id)?;
            let mut expense = repo.get_by_id(id)?;

            if let Some(amount) = amount {
                expense.set_amount(amount)?;
            }
            if let Some(date) = date {
                expense.set_timestamp(date.and_time(NaiveTime::MIN));
            }
            if let Some(description) = description {
                expense.set_description(description);
            }
            if let Some(restaurant) = restaurant {
                expense.set_restaurant(restaurant)?;
            }
            if let Some(meal) = meal {
                let meal_type = MealType::parse(&meal).ok_or_else(|| {
                    ExpenseError::validation(
                        "meal_type",
                        format!("must be one of: {}", MealType::VALID),
                    )
                })?;
                expense.set_meal_type(meal_type)?;
            }
            if let Some(mode) = mode {
                let mode = TransportMode::parse(&mode).ok_or_else(|| {
                    ExpenseError::validation(
                        "mode_of_transport",
                        format!("must be one of: {}", TransportMode::VALID),
                    )
                })?;
                expense.set_mode(mode)?;
            }
            if let Some(destination) = destination {
                expense.set_destination(destination)?;
            }
            if let Some(distance) = distance {
                expense.set_distance(distance)?;
            }
            if let Some(bill) = bill {
                expense.set_bill_number(bill)?;
            }
            if let Some(units) = units {
                expense.set_units_consumed(units)?;
            }
            if let Some(provider) = provider {
                expense.set_provider(provider)?;
            }

            repo.update(id, &expense)?;
            println!("Expense updated successfully!");
            println!("{}", expense);
            Ok(())
        }
        ExpenseCommands::Summary => {
            let total = repo.total_amount();
            let categories: Vec<(String, f64)> = repo
                .available_categories()
                .into_iter()
                .map(|name| {
                    let category_total = repo.total_amount_by_category(&name);
                    (name, category_total)
                })
                .collect();
            print!("{}", format_summary(total, &categories));
            Ok(())
        }
        ExpenseCommands::Categories => {
            let categories = repo.available_categories();
            if categories.is_empty() {
                println!("No expenses found.");
            } else {
                for name in categories {
                    println!("{}", name);
                }
            }
            Ok(())
        }
        ExpenseCommands::Export { output } => {
            let expenses = repo.get_all();
            if expenses.is_empty() {
                println!("No expenses to export.");
                return Ok(());
            }

            let filename = output.unwrap_or_else(|| default_export_filename(&user.name));
            let file = File::create(&filename)
                .map_err(|e| ExpenseError::Export(format!("cannot create {}: {}", filename, e)))?;
            let mut writer = BufWriter::new(file);
            export_expenses(&expenses, &mut writer)?;

            println!("Expenses exported successfully to: {}", filename);
            println!("Total expenses exported: {}", expenses.len());
            Ok(())
        }
    }
}

fn handle_add(repo: &ExpenseRepository, user: &User, add: AddCommands) -> ExpenseResult<()> {
    let (amount, date, description, details) = match add {
        AddCommands::Food {
            amount,
            restaurant,
            meal,
            date,
            description,
        } => (
            amount,
            date,
            description,
            CategoryDetails::food(restaurant, &meal)?,
        ),
        AddCommands::Travel {
            amount,
            mode,
            destination,
            distance,
            date,
            description,
        } => (
            amount,
            date,
            description,
            CategoryDetails::travel(&mode, destination, distance)?,
        ),
        AddCommands::Electricity {
            amount,
            bill,
            units,
            provider,
            date,
            description,
        } => (
            amount,
            date,
            description,
            CategoryDetails::electricity(bill, units, provider),
        ),
        AddCommands::Generic {
            amount,
            category,
            date,
            description,
        } => (amount, date, description, CategoryDetails::generic(category)),
    };

    let expense = Expense::new(
        user.user_id.clone(),
        amount,
        timestamp_for(date),
        description,
        details,
    )?;
    repo.add(&expense)?;

    println!("Expense added successfully!");
    println!("{}", expense);
    Ok(())
}

fn parse_id(s: &str) -> ExpenseResult<ExpenseId> {
    s.parse()
        .map_err(|_| ExpenseError::validation("expense_id", format!("'{}' is not a valid id", s)))
}

fn timestamp_for(date: Option<NaiveDate>) -> NaiveDateTime {
    match date {
        Some(date) => date.and_time(NaiveTime::MIN),
        None => Local::now().naive_local(),
    }
}
