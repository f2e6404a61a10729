use anyhow::Result;
use clap::{Parser, Subcommand};

use driverbook::cli::{
    handle_bill_command, handle_dashboard_command, handle_expense_command, handle_goal_command,
    handle_income_command, handle_report_command, handle_shift_command, handle_transaction_command,
    handle_workdays_command, BillCommands, ExpenseCommands, GoalArgs, IncomeCommands, ReportArgs,
    ShiftArgs, TransactionCommands, WorkdaysCommands,
};
use driverbook::clock::{Clock, FixedClock, SystemClock};
use driverbook::config::{paths::DriverbookPaths, settings::Settings};
use driverbook::logging::init_tracing;
use driverbook::models::parse_date;
use driverbook::services::{GoalService, SettingsService};
use driverbook::storage::{initialize_storage, Storage};

#[derive(Parser)]
#[command(
    name = "driverbook",
    author = "Kaylee Beyene",
    version,
    about = "Earnings, expense and bill tracker for drivers",
    long_about = "Driverbook records what you earn and spend on the road, keeps track \
                  of upcoming bills, and tells you how much to earn each working day \
                  so every bill is paid on time."
)]
struct Cli {
    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Evaluate as if today were this date (YYYY-MM-DD)
    #[arg(long, global = true)]
    today: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Record earnings
    #[command(subcommand)]
    Income(IncomeCommands),

    /// Record costs
    #[command(subcommand)]
    Expense(ExpenseCommands),

    /// Record a shift's earnings and its expenses in one go
    Shift(ShiftArgs),

    /// Transaction history
    #[command(subcommand, alias = "txn")]
    Transaction(TransactionCommands),

    /// Upcoming bills
    #[command(subcommand)]
    Bill(BillCommands),

    /// Days of the week you drive
    #[command(subcommand)]
    Workdays(WorkdaysCommands),

    /// Show today's earnings goal
    Goal(GoalArgs),

    /// Show totals, per-km and per-hour earnings, and the daily goal
    Dashboard,

    /// Income and expenses over a date range
    Report(ReportArgs),

    /// Show recent changes from the audit log
    History {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Initialize the data directory
    Init,

    /// Show current configuration and paths
    Config {
        /// Change the currency symbol printed in front of amounts
        #[arg(long)]
        currency: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Initialize paths and settings
    let paths = DriverbookPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;

    let clock: Box<dyn Clock> = match cli.today.as_deref() {
        Some(date) => Box::new(FixedClock(parse_date(date)?)),
        None => Box::new(SystemClock),
    };
    let today = clock.today();

    let open_storage = || -> Result<Storage> {
        let mut storage = Storage::new(paths.clone())?;
        storage.load_all()?;
        Ok(storage)
    };

    match cli.command {
        Some(Commands::Income(cmd)) => {
            handle_income_command(&open_storage()?, &settings, today, cmd)?;
        }
        Some(Commands::Expense(cmd)) => {
            handle_expense_command(&open_storage()?, &settings, today, cmd)?;
        }
        Some(Commands::Shift(args)) => {
            handle_shift_command(&open_storage()?, &settings, today, args)?;
        }
        Some(Commands::Transaction(cmd)) => {
            handle_transaction_command(&open_storage()?, &settings, today, cmd)?;
        }
        Some(Commands::Bill(cmd)) => {
            handle_bill_command(&open_storage()?, &settings, today, cmd)?;
        }
        Some(Commands::Workdays(cmd)) => {
            handle_workdays_command(&open_storage()?, &mut settings, cmd)?;
        }
        Some(Commands::Goal(args)) => {
            let storage = open_storage()?;
            let service = GoalService::new(&storage, settings.work_days, clock.as_ref());
            handle_goal_command(&service, &settings, args)?;
        }
        Some(Commands::Dashboard) => {
            let storage = open_storage()?;
            let service = GoalService::new(&storage, settings.work_days, clock.as_ref());
            handle_dashboard_command(&service, &settings)?;
        }
        Some(Commands::Report(args)) => {
            let storage = open_storage()?;
            let service = GoalService::new(&storage, settings.work_days, clock.as_ref());
            handle_report_command(&service, &settings, args)?;
        }
        Some(Commands::History { limit }) => {
            let storage = open_storage()?;
            let entries = storage.audit().read_recent(limit)?;
            if entries.is_empty() {
                println!("No changes recorded yet.");
            }
            for entry in entries.iter().rev() {
                println!("{}", entry.format_human_readable());
            }
        }
        Some(Commands::Init) => {
            println!("Initializing Driverbook at: {}", paths.base_dir().display());
            let settings = initialize_storage(&paths)?;
            println!("Initialization complete!");
            println!();
            println!("Working days: {}", settings.work_days);
            println!("Expense categories: {}", settings.expense_categories.join(", "));
            println!();
            println!("Run 'driverbook bill add' to add your first bill.");
        }
        Some(Commands::Config { currency }) => {
            if let Some(symbol) = currency {
                SettingsService::new(&open_storage()?).set_currency_symbol(&mut settings, &symbol)?;
            }

            println!("Driverbook Configuration");
            println!("========================");
            println!("Base directory:  {}", paths.base_dir().display());
            println!("Data directory:  {}", paths.data_dir().display());
            println!("Settings file:   {}", paths.settings_file().display());
            println!("Audit log:       {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Working days:       {}", settings.work_days);
            println!("  Currency symbol:    {}", settings.currency_symbol);
            println!("  Expense categories: {}", settings.expense_categories.join(", "));
        }
        None => {
            println!("Driverbook - earnings and bills for drivers");
            println!();
            println!("Run 'driverbook --help' for usage information.");
            println!("Run 'driverbook goal' to see today's earnings goal.");
        }
    }

    Ok(())
}
