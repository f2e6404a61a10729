//! Transaction CLI commands
//!
//! `income add`, `expense add`, `shift` and the `txn` history commands.

use chrono::NaiveDate;
use clap::{Args, Subcommand};

use crate::config::settings::Settings;
use crate::display::{format_transaction_details, format_transaction_table};
use crate::error::{DriverbookError, DriverbookResult};
use crate::models::Money;
use crate::reports::ReportRange;
use crate::services::{CreateTransactionInput, TransactionService};
use crate::storage::Storage;

use super::range::RangeArgs;
use super::{parse_amount, parse_date_or_today};

/// Income subcommands
#[derive(Subcommand)]
pub enum IncomeCommands {
    /// Record earnings from a shift or ride
    Add {
        /// Amount earned (e.g., "150" or "150.50")
        amount: String,
        /// What the earnings were for
        description: String,
        /// Date earned (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,
        /// Kilometres driven
        #[arg(short, long)]
        km: Option<f64>,
        /// Hours worked
        #[arg(long)]
        hours: Option<f64>,
    },
}

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Record a cost
    Add {
        /// Amount spent
        amount: String,
        /// What the money was spent on
        description: String,
        /// Expense category (see `driverbook config`)
        #[arg(short, long)]
        category: Option<String>,
        /// Date spent (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,
    },
}

/// One shift's earnings together with what it cost
#[derive(Args)]
pub struct ShiftArgs {
    /// Amount earned over the shift
    pub amount: String,
    /// What the shift was (e.g., "Friday night")
    pub description: String,
    /// Date of the shift (YYYY-MM-DD, defaults to today)
    #[arg(short, long)]
    pub date: Option<String>,
    /// Kilometres driven
    #[arg(short, long)]
    pub km: Option<f64>,
    /// Hours worked
    #[arg(long)]
    pub hours: Option<f64>,
    /// Expense as AMOUNT:DESCRIPTION[:CATEGORY]; repeat for each cost
    #[arg(short, long = "expense", value_name = "EXPENSE")]
    pub expenses: Vec<String>,
}

/// Transaction history subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// List transactions, newest first
    List {
        #[command(flatten)]
        range: RangeArgs,
    },
    /// Show transaction details
    Show {
        /// Transaction ID (full or at least 4 leading characters)
        id: String,
    },
    /// Delete a transaction
    Delete {
        /// Transaction ID (full or at least 4 leading characters)
        id: String,
    },
}

/// Handle an income command
pub fn handle_income_command(
    storage: &Storage,
    settings: &Settings,
    today: NaiveDate,
    cmd: IncomeCommands,
) -> DriverbookResult<()> {
    let service = TransactionService::new(storage);

    match cmd {
        IncomeCommands::Add {
            amount,
            description,
            date,
            km,
            hours,
        } => {
            let mut input = CreateTransactionInput::new(
                parse_amount(&amount)?,
                description,
                parse_date_or_today(date.as_deref(), today)?,
            );
            input.mileage = km;
            input.duration_hours = hours;

            let txn = service.add_income(input)?;
            println!(
                "Recorded income: {} {} ({})",
                txn.amount.format_with_symbol(&settings.currency_symbol),
                txn.description,
                txn.id
            );
        }
    }

    Ok(())
}

/// Handle an expense command
pub fn handle_expense_command(
    storage: &Storage,
    settings: &Settings,
    today: NaiveDate,
    cmd: ExpenseCommands,
) -> DriverbookResult<()> {
    let service = TransactionService::new(storage);

    match cmd {
        ExpenseCommands::Add {
            amount,
            description,
            category,
            date,
        } => {
            let category = category
                .map(|name| resolve_category(settings, &name))
                .transpose()?;

            let mut input = CreateTransactionInput::new(
                parse_amount(&amount)?,
                description,
                parse_date_or_today(date.as_deref(), today)?,
            );
            input.category = category;

            let txn = service.add_expense(input)?;
            println!(
                "Recorded expense: {} {} ({})",
                txn.amount.format_with_symbol(&settings.currency_symbol),
                txn.description,
                txn.id
            );
        }
    }

    Ok(())
}

/// Handle the shift command
pub fn handle_shift_command(
    storage: &Storage,
    settings: &Settings,
    today: NaiveDate,
    args: ShiftArgs,
) -> DriverbookResult<()> {
    let date = parse_date_or_today(args.date.as_deref(), today)?;

    let mut income = CreateTransactionInput::new(parse_amount(&args.amount)?, args.description, date);
    income.mileage = args.km;
    income.duration_hours = args.hours;

    let expenses = args
        .expenses
        .iter()
        .map(|spec| parse_shift_expense(settings, spec, date))
        .collect::<DriverbookResult<Vec<_>>>()?;

    let (income, expenses) = TransactionService::new(storage).close_shift(income, expenses)?;

    let symbol = &settings.currency_symbol;
    println!(
        "Recorded shift: {} {} ({})",
        income.amount.format_with_symbol(symbol),
        income.description,
        income.id
    );
    for txn in &expenses {
        println!(
            "  expense: {} {}",
            txn.amount.format_with_symbol(symbol),
            txn.description
        );
    }
    let spent = expenses.iter().map(|t| t.amount).sum::<Money>();
    println!("Net for the shift: {}", (income.amount - spent).format_with_symbol(symbol));

    Ok(())
}

/// Parse `AMOUNT:DESCRIPTION[:CATEGORY]`
fn parse_shift_expense(
    settings: &Settings,
    spec: &str,
    date: NaiveDate,
) -> DriverbookResult<CreateTransactionInput> {
    let mut parts = spec.splitn(3, ':');
    let (Some(amount), Some(description)) = (parts.next(), parts.next()) else {
        return Err(DriverbookError::Validation(format!(
            "Invalid expense '{}' (expected AMOUNT:DESCRIPTION[:CATEGORY])",
            spec
        )));
    };

    let mut input = CreateTransactionInput::new(parse_amount(amount)?, description, date);
    input.category = parts
        .next()
        .map(|name| resolve_category(settings, name))
        .transpose()?;
    Ok(input)
}

/// Handle a transaction history command
pub fn handle_transaction_command(
    storage: &Storage,
    settings: &Settings,
    today: NaiveDate,
    cmd: TransactionCommands,
) -> DriverbookResult<()> {
    let service = TransactionService::new(storage);
    let symbol = &settings.currency_symbol;

    match cmd {
        TransactionCommands::List { range } => {
            let range = range.to_range(ReportRange::All)?;
            let transactions = service.list(range, today)?;
            println!("{}", range.label());
            print!("{}", format_transaction_table(&transactions, symbol));
        }

        TransactionCommands::Show { id } => {
            let txn = service
                .find(&id)?
                .ok_or_else(|| DriverbookError::transaction_not_found(&id))?;
            print!("{}", format_transaction_details(&txn, symbol));
        }

        TransactionCommands::Delete { id } => {
            let txn = service
                .find(&id)?
                .ok_or_else(|| DriverbookError::transaction_not_found(&id))?;
            service.delete(txn.id)?;
            println!("Deleted transaction {} ({})", txn.id, txn.description);
        }
    }

    Ok(())
}

fn resolve_category(settings: &Settings, name: &str) -> DriverbookResult<String> {
    settings
        .find_category(name)
        .map(str::to_string)
        .ok_or_else(|| {
            DriverbookError::Validation(format!(
                "Unknown category '{}'. Available: {}",
                name.trim(),
                settings.expense_categories.join(", ")
            ))
        })
}
