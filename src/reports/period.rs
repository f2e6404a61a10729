//! Period report
//!
//! Income, expenses and driving efficiency for a date range, with a
//! day-by-day breakdown.

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Write;

use super::dashboard::ratio;
use crate::error::DriverbookResult;
use crate::models::{Money, Transaction};

/// Date range selector for reports and history listings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportRange {
    Today,
    /// Monday of the current week through today
    Week,
    /// First of the current month through today
    Month,
    All,
    Custom { start: NaiveDate, end: NaiveDate },
}

impl ReportRange {
    /// Resolve to an inclusive `(start, end)` pair; `None` means unbounded
    pub fn resolve(&self, today: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
        match *self {
            Self::Today => Some((today, today)),
            Self::Week => {
                let offset = i64::from(today.weekday().num_days_from_monday());
                Some((today - Duration::days(offset), today))
            }
            Self::Month => Some((today.with_day(1).unwrap_or(today), today)),
            Self::All => None,
            Self::Custom { start, end } => Some((start, end)),
        }
    }

    /// Whether `date` falls inside the range
    pub fn contains(&self, date: NaiveDate, today: NaiveDate) -> bool {
        match self.resolve(today) {
            Some((start, end)) => date >= start && date <= end,
            None => true,
        }
    }

    pub fn label(&self) -> String {
        match self {
            Self::Today => "Today".to_string(),
            Self::Week => "This week".to_string(),
            Self::Month => "This month".to_string(),
            Self::All => "All time".to_string(),
            Self::Custom { start, end } => format!("{} to {}", start, end),
        }
    }
}

/// Income and expense on one calendar day
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyBreakdown {
    pub date: NaiveDate,
    pub income: Money,
    pub expense: Money,
}

/// Report over a date range
#[derive(Debug, Clone, Serialize)]
pub struct PeriodReport {
    pub label: String,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    /// Matching transactions, newest first
    pub transactions: Vec<Transaction>,
    pub total_income: Money,
    pub total_expense: Money,
    pub balance: Money,
    pub total_km: f64,
    pub total_hours: f64,
    pub earnings_per_km: f64,
    pub earnings_per_hour: f64,
    /// Per-day totals, oldest first
    pub days: Vec<DailyBreakdown>,
}

impl PeriodReport {
    pub fn generate(transactions: &[Transaction], range: ReportRange, today: NaiveDate) -> Self {
        let mut selected: Vec<Transaction> = transactions
            .iter()
            .filter(|t| range.contains(t.date, today))
            .cloned()
            .collect();
        selected.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));

        let mut total_income = Money::zero();
        let mut total_expense = Money::zero();
        let mut total_km = 0.0;
        let mut total_hours = 0.0;
        let mut by_day: BTreeMap<NaiveDate, (Money, Money)> = BTreeMap::new();

        for txn in &selected {
            let day = by_day.entry(txn.date).or_default();
            if txn.is_income() {
                total_income += txn.amount;
                total_km += txn.mileage.unwrap_or(0.0);
                total_hours += txn.duration_hours.unwrap_or(0.0);
                day.0 += txn.amount;
            } else {
                total_expense += txn.amount;
                day.1 += txn.amount;
            }
        }

        let days = by_day
            .into_iter()
            .map(|(date, (income, expense))| DailyBreakdown {
                date,
                income,
                expense,
            })
            .collect();

        let bounds = range.resolve(today);

        Self {
            label: range.label(),
            start: bounds.map(|(s, _)| s),
            end: bounds.map(|(_, e)| e),
            transactions: selected,
            total_income,
            total_expense,
            balance: total_income - total_expense,
            total_km,
            total_hours,
            earnings_per_km: ratio(total_income, total_km),
            earnings_per_hour: ratio(total_income, total_hours),
            days,
        }
    }

    /// Format the report for terminal output
    pub fn format_terminal(&self, symbol: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!("Report: {}\n", self.label));
        output.push_str(&"=".repeat(50));
        output.push('\n');
        output.push_str(&format!(
            "Income:   {}\n",
            self.total_income.format_with_symbol(symbol)
        ));
        output.push_str(&format!(
            "Expenses: {}\n",
            self.total_expense.format_with_symbol(symbol)
        ));
        output.push_str(&format!(
            "Balance:  {}\n",
            self.balance.format_with_symbol(symbol)
        ));
        output.push_str(&format!(
            "Distance: {:.1} km ({}{:.2}/km)\n",
            self.total_km, symbol, self.earnings_per_km
        ));
        output.push_str(&format!(
            "Time:     {:.1} h ({}{:.2}/h)\n",
            self.total_hours, symbol, self.earnings_per_hour
        ));

        if !self.days.is_empty() {
            output.push_str(&format!(
                "\n{:<12} {:>12} {:>12}\n",
                "Date", "Income", "Expense"
            ));
            output.push_str(&"-".repeat(38));
            output.push('\n');
            for day in &self.days {
                output.push_str(&format!(
                    "{:<12} {:>12} {:>12}\n",
                    day.date.format("%Y-%m-%d").to_string(),
                    day.income.format_with_symbol(symbol),
                    day.expense.format_with_symbol(symbol)
                ));
            }
        }

        output
    }

    /// Export the per-day breakdown as CSV
    pub fn export_csv<W: Write>(&self, writer: W) -> DriverbookResult<()> {
        let mut out = csv::Writer::from_writer(writer);
        out.write_record(["date", "income", "expense"])?;
        for day in &self.days {
            out.write_record([
                day.date.format("%Y-%m-%d").to_string(),
                format!("{:.2}", day.income.as_f64()),
                format!("{:.2}", day.expense.as_f64()),
            ])?;
        }
        out.flush()?;
        Ok(())
    }
}
