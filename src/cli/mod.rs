//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod bill;
pub mod range;
pub mod report;
pub mod transaction;
pub mod workdays;

pub use bill::{handle_bill_command, BillCommands};
pub use range::{RangeArg, RangeArgs};
pub use report::{
    handle_dashboard_command, handle_goal_command, handle_report_command, GoalArgs, ReportArgs,
};
pub use transaction::{
    handle_expense_command, handle_income_command, handle_shift_command,
    handle_transaction_command, ExpenseCommands, IncomeCommands, ShiftArgs, TransactionCommands,
};
pub use workdays::{handle_workdays_command, WorkdaysCommands};

use chrono::NaiveDate;

use crate::error::{DriverbookError, DriverbookResult};
use crate::models::{parse_date, Money};

/// Parse a user-typed amount such as "150" or "150.50"
pub(crate) fn parse_amount(s: &str) -> DriverbookResult<Money> {
    Money::parse(s).map_err(|e| DriverbookError::Validation(format!("Invalid amount: {}", e)))
}

/// Parse an optional `--date`, defaulting to `today`
pub(crate) fn parse_date_or_today(
    date: Option<&str>,
    today: NaiveDate,
) -> DriverbookResult<NaiveDate> {
    date.map(parse_date).transpose().map(|d| d.unwrap_or(today))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("150.5").unwrap(), Money::from_cents(15050));
        assert!(parse_amount("abc").unwrap_err().is_validation());
    }

    #[test]
    fn test_parse_date_or_today() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
        assert_eq!(parse_date_or_today(None, today).unwrap(), today);
        assert_eq!(
            parse_date_or_today(Some("2025-02-28"), today).unwrap(),
            NaiveDate::from_ymd_opt(2025, 2, 28).unwrap()
        );
        assert!(parse_date_or_today(Some("yesterday"), today).is_err());
    }
}
