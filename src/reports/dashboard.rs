//! Dashboard summary
//!
//! Headline numbers for the driver: totals, margins, efficiency per
//! kilometre and per hour, pending bills and the daily goal.

use chrono::NaiveDate;
use serde::Serialize;

use super::daily_goal::{compute_daily_goal, DailyGoal};
use crate::models::{Bill, Money, Transaction, WorkDaySet};

/// Dashboard statistics over the whole transaction log
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardStats {
    pub today: NaiveDate,
    pub total_income: Money,
    pub total_expense: Money,
    pub net_profit: Money,
    /// Net profit as a percentage of income (0 without income)
    pub profit_margin: f64,
    /// Kilometres logged on income entries
    pub total_km: f64,
    /// Hours logged on income entries
    pub total_hours: f64,
    pub earnings_per_km: f64,
    pub earnings_per_hour: f64,
    pub pending_bills_total: Money,
    pub pending_bills_count: usize,
    /// Income dated today
    pub earnings_today: Money,
    pub goal: DailyGoal,
}

impl DashboardStats {
    pub fn compute(
        transactions: &[Transaction],
        bills: &[Bill],
        work_days: WorkDaySet,
        today: NaiveDate,
    ) -> Self {
        let mut total_income = Money::zero();
        let mut total_expense = Money::zero();
        let mut total_km = 0.0;
        let mut total_hours = 0.0;
        let mut earnings_today = Money::zero();

        for txn in transactions {
            if txn.is_income() {
                total_income += txn.amount;
                total_km += txn.mileage.unwrap_or(0.0);
                total_hours += txn.duration_hours.unwrap_or(0.0);
                if txn.date == today {
                    earnings_today += txn.amount;
                }
            } else {
                total_expense += txn.amount;
            }
        }

        let net_profit = total_income - total_expense;
        let profit_margin = if total_income.is_positive() {
            net_profit.as_f64() / total_income.as_f64() * 100.0
        } else {
            0.0
        };

        let pending: Vec<&Bill> = bills.iter().filter(|b| !b.is_paid).collect();

        Self {
            today,
            total_income,
            total_expense,
            net_profit,
            profit_margin,
            total_km,
            total_hours,
            earnings_per_km: ratio(total_income, total_km),
            earnings_per_hour: ratio(total_income, total_hours),
            pending_bills_total: pending.iter().map(|b| b.amount).sum(),
            pending_bills_count: pending.len(),
            earnings_today,
            goal: compute_daily_goal(transactions, bills, work_days, today),
        }
    }

    /// How much of today's goal is still missing (zero once reached)
    pub fn remaining_today(&self) -> Money {
        (self.goal.daily_goal - self.earnings_today).non_negative()
    }

    /// Format the dashboard for terminal output
    pub fn format_terminal(&self, symbol: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!("Dashboard for {}\n", self.today.format("%Y-%m-%d")));
        output.push_str(&"=".repeat(50));
        output.push('\n');

        output.push_str(&format!(
            "Daily goal:        {}\n",
            self.goal.daily_goal.format_with_symbol(symbol)
        ));
        output.push_str(&format!("  {}\n", self.goal.explanation));
        output.push_str(&format!(
            "Earned today:      {}  (remaining {})\n\n",
            self.earnings_today.format_with_symbol(symbol),
            self.remaining_today().format_with_symbol(symbol)
        ));

        output.push_str(&format!(
            "Income:            {}\n",
            self.total_income.format_with_symbol(symbol)
        ));
        output.push_str(&format!(
            "Expenses:          {}\n",
            self.total_expense.format_with_symbol(symbol)
        ));
        output.push_str(&format!(
            "Net profit:        {}  ({:.1}% margin)\n",
            self.net_profit.format_with_symbol(symbol),
            self.profit_margin
        ));
        output.push_str(&format!(
            "Per km:            {}{:.2}  ({:.1} km)\n",
            symbol, self.earnings_per_km, self.total_km
        ));
        output.push_str(&format!(
            "Per hour:          {}{:.2}  ({:.1} h)\n",
            symbol, self.earnings_per_hour, self.total_hours
        ));
        output.push_str(&format!(
            "Pending bills:     {} ({} unpaid)\n",
            self.pending_bills_total.format_with_symbol(symbol),
            self.pending_bills_count
        ));

        output
    }
}

/// Income per unit (km or hour), 0 when nothing was logged
pub(crate) fn ratio(amount: Money, per: f64) -> f64 {
    if per > 0.0 {
        amount.as_f64() / per
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_compute_totals_and_efficiency() {
        let today = date("2024-06-03");
        let transactions = vec![
            Transaction::income(Money::from_units(200), "Uber", today)
                .with_mileage(100.0)
                .with_duration_hours(8.0),
            Transaction::income(Money::from_units(100), "99", date("2024-06-01"))
                .with_mileage(50.0)
                .with_duration_hours(2.0),
            Transaction::expense(Money::from_units(75), "Fuel", today).with_mileage(999.0),
        ];

        let stats = DashboardStats::compute(&transactions, &[], WorkDaySet::default(), today);

        assert_eq!(stats.total_income, Money::from_units(300));
        assert_eq!(stats.total_expense, Money::from_units(75));
        assert_eq!(stats.net_profit, Money::from_units(225));
        assert!((stats.profit_margin - 75.0).abs() < 1e-9);
        // Expense mileage is not counted
        assert!((stats.total_km - 150.0).abs() < 1e-9);
        assert!((stats.earnings_per_km - 2.0).abs() < 1e-9);
        assert!((stats.earnings_per_hour - 30.0).abs() < 1e-9);
        assert_eq!(stats.earnings_today, Money::from_units(200));
    }

    #[test]
    fn test_empty_log() {
        let today = date("2024-06-03");
        let stats = DashboardStats::compute(&[], &[], WorkDaySet::default(), today);
        assert_eq!(stats.profit_margin, 0.0);
        assert_eq!(stats.earnings_per_km, 0.0);
        assert_eq!(stats.earnings_per_hour, 0.0);
        assert_eq!(stats.goal.daily_goal, Money::zero());
    }

    #[test]
    fn test_pending_bills_and_remaining() {
        let today = date("2024-06-03");
        let mut paid = Bill::new("Phone", Money::from_units(40), today);
        paid.set_paid(true);
        let rent = Bill::new("Rent", Money::from_units(100), today);

        let transactions = vec![Transaction::income(Money::from_units(30), "Ride", today)];
        let stats =
            DashboardStats::compute(&transactions, &[paid, rent], WorkDaySet::weekdays(), today);

        assert_eq!(stats.pending_bills_total, Money::from_units(100));
        assert_eq!(stats.pending_bills_count, 1);
        assert_eq!(stats.goal.daily_goal, Money::from_units(70));
        assert_eq!(stats.remaining_today(), Money::from_units(40));
    }

    #[test]
    fn test_format_terminal() {
        let today = date("2024-06-03");
        let stats = DashboardStats::compute(&[], &[], WorkDaySet::default(), today);
        let output = stats.format_terminal("$");
        assert!(output.contains("Dashboard for 2024-06-03"));
        assert!(output.contains("Daily goal:        $0.00"));
        assert!(output.contains("No pending bills"));
    }
}
