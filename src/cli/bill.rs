//! Bill CLI commands

use chrono::NaiveDate;
use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::{bill_status, format_bill_schedule, format_bill_table};
use crate::error::{DriverbookError, DriverbookResult};
use crate::models::{parse_date, Bill};
use crate::reports::BillSchedule;
use crate::services::{BillService, CreateBillInput, UpdateBillInput};
use crate::storage::Storage;

use super::parse_amount;

/// Bill subcommands
#[derive(Subcommand)]
pub enum BillCommands {
    /// Add an upcoming bill
    Add {
        /// Bill description (e.g., "Car rental")
        description: String,
        /// Amount due
        amount: String,
        /// Due date (YYYY-MM-DD)
        #[arg(short, long)]
        due: String,
        /// Category
        #[arg(short, long)]
        category: Option<String>,
    },
    /// List bills by due date
    List {
        /// Include bills already paid
        #[arg(short, long)]
        all: bool,
    },
    /// Change a bill's description, amount, due date or category
    Edit {
        /// Bill description or ID
        bill: String,
        /// New description
        #[arg(long)]
        description: Option<String>,
        /// New amount due
        #[arg(short, long)]
        amount: Option<String>,
        /// New due date (YYYY-MM-DD)
        #[arg(short, long)]
        due: Option<String>,
        /// New category (empty to clear)
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Show unpaid bills with the working days left for each
    Schedule,
    /// Mark a bill as paid
    Pay {
        /// Bill description or ID
        bill: String,
    },
    /// Mark a bill as unpaid
    Unpay {
        /// Bill description or ID
        bill: String,
    },
    /// Flip a bill between paid and unpaid
    Toggle {
        /// Bill description or ID
        bill: String,
    },
    /// Delete a bill
    Delete {
        /// Bill description or ID
        bill: String,
    },
}

/// Handle a bill command
pub fn handle_bill_command(
    storage: &Storage,
    settings: &Settings,
    today: NaiveDate,
    cmd: BillCommands,
) -> DriverbookResult<()> {
    let service = BillService::new(storage);
    let symbol = &settings.currency_symbol;

    match cmd {
        BillCommands::Add {
            description,
            amount,
            due,
            category,
        } => {
            let bill = service.create(CreateBillInput {
                description,
                amount: parse_amount(&amount)?,
                due_date: parse_date(&due)?,
                category,
            })?;
            println!(
                "Added bill: {} {} due {} ({})",
                bill.description,
                bill.amount.format_with_symbol(symbol),
                bill.due_date.format("%Y-%m-%d"),
                bill.id
            );
        }

        BillCommands::List { all } => {
            let bills = service.list(all)?;
            print!("{}", format_bill_table(&bills, today, symbol));
        }

        BillCommands::Edit {
            bill,
            description,
            amount,
            due,
            category,
        } => {
            let changes = UpdateBillInput {
                description,
                amount: amount.as_deref().map(parse_amount).transpose()?,
                due_date: due.as_deref().map(parse_date).transpose()?,
                category,
            };
            if changes.is_empty() {
                return Err(DriverbookError::Validation(
                    "Nothing to change; pass --description, --amount, --due or --category".into(),
                ));
            }

            let bill = service.update(find_bill(&service, &bill)?.id, changes)?;
            println!(
                "Updated bill: {} {} due {}",
                bill.description,
                bill.amount.format_with_symbol(symbol),
                bill.due_date.format("%Y-%m-%d")
            );
        }

        BillCommands::Schedule => {
            let bills = service.list(false)?;
            let schedule = BillSchedule::generate(&bills, settings.work_days, today);
            print!("{}", format_bill_schedule(&schedule, symbol));
        }

        BillCommands::Pay { bill } => {
            let bill = service.set_paid(find_bill(&service, &bill)?.id, true)?;
            print_paid_state(&bill, today);
        }

        BillCommands::Unpay { bill } => {
            let bill = service.set_paid(find_bill(&service, &bill)?.id, false)?;
            print_paid_state(&bill, today);
        }

        BillCommands::Toggle { bill } => {
            let bill = service.toggle_paid(find_bill(&service, &bill)?.id)?;
            print_paid_state(&bill, today);
        }

        BillCommands::Delete { bill } => {
            let bill = service.delete(find_bill(&service, &bill)?.id)?;
            println!("Deleted bill: {}", bill.description);
        }
    }

    Ok(())
}

fn find_bill(service: &BillService, reference: &str) -> DriverbookResult<Bill> {
    service
        .find(reference)?
        .ok_or_else(|| DriverbookError::bill_not_found(reference))
}

fn print_paid_state(bill: &Bill, today: NaiveDate) {
    println!("{}: {}", bill.description, bill_status(bill, today));
}
