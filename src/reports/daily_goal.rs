//! Daily earnings goal
//!
//! Computes the minimum amount the driver has to earn today to stay able to
//! pay every unpaid bill on time.
//!
//! Unpaid bills are walked in due-date order. Each bill is a milestone: all
//! bills due by that date, minus the cash already on hand, must be earned
//! over the working days between today and the due date. The milestone that
//! demands the steepest daily rate is the binding one, and that rate is the
//! goal. A large bill due later can therefore dominate a small bill due
//! sooner.
//!
//! The computation is a pure function of its inputs; callers recompute it
//! whenever transactions, bills or the work schedule change.

use chrono::NaiveDate;
use serde::Serialize;
use std::cmp::Ordering;

use crate::models::{Bill, BillId, Money, Transaction, WorkDaySet};

pub const NO_PENDING_BILLS: &str = "Congratulations! No pending bills.";
pub const CASH_COVERS_BILLS: &str = "Congratulations! Your cash covers your upcoming bills.";
pub const COVERS_ALL_BILLS: &str = "Calculated to cover all upcoming bills.";

/// Result of the daily goal computation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyGoal {
    /// Amount to earn today, rounded up to the next cent
    pub daily_goal: Money,
    /// Human-readable justification
    pub explanation: String,
    /// The bill whose milestone sets the goal
    pub binding_bill: Option<BillId>,
    /// Working days available for the binding milestone
    pub working_days: Option<u32>,
    /// Shortfall at the binding milestone; the unrounded rate is this
    /// amount divided by `working_days`
    pub amount_needed: Option<Money>,
}

impl DailyGoal {
    fn zero(explanation: &str) -> Self {
        Self {
            daily_goal: Money::zero(),
            explanation: explanation.to_string(),
            binding_bill: None,
            working_days: None,
            amount_needed: None,
        }
    }
}

/// Exact daily rate: `needed` cents spread over `days` working days
#[derive(Debug, Clone, Copy)]
struct Rate {
    needed: i64,
    days: u32,
}

impl Rate {
    const ZERO: Rate = Rate { needed: 0, days: 1 };

    /// Rate rounded up to a whole cent
    fn to_money(self) -> Money {
        let days = i64::from(self.days);
        let cents = self.needed / days + i64::from(self.needed % days > 0);
        Money::from_cents(cents)
    }
}

impl PartialEq for Rate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Rate {}

impl PartialOrd for Rate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Rate {
    fn cmp(&self, other: &Self) -> Ordering {
        let lhs = i128::from(self.needed) * i128::from(other.days);
        let rhs = i128::from(other.needed) * i128::from(self.days);
        lhs.cmp(&rhs)
    }
}

/// Net profit over the whole log: income minus expenses
pub fn net_profit(transactions: &[Transaction]) -> Money {
    transactions.iter().map(Transaction::signed_amount).sum()
}

/// Working days available to pay a bill due on `due_date`
///
/// Counts work days in `[today, due_date]`. Overdue bills get a single day,
/// and the result is never below 1.
pub fn working_days_until(work_days: WorkDaySet, today: NaiveDate, due_date: NaiveDate) -> u32 {
    if due_date < today {
        return 1;
    }
    work_days.count_between(today, due_date).max(1)
}

/// Compute the daily earnings goal
///
/// Only a positive net profit offsets bills; a negative balance counts as
/// zero cash. Paid bills are ignored. Ties between milestones keep the
/// earlier bill.
pub fn compute_daily_goal(
    transactions: &[Transaction],
    bills: &[Bill],
    work_days: WorkDaySet,
    today: NaiveDate,
) -> DailyGoal {
    let starting_cash = net_profit(transactions).non_negative();

    let mut unpaid: Vec<&Bill> = bills.iter().filter(|b| !b.is_paid).collect();
    if unpaid.is_empty() {
        tracing::debug!("no unpaid bills, daily goal is zero");
        return DailyGoal::zero(NO_PENDING_BILLS);
    }
    unpaid.sort_by_key(|b| b.due_date);

    let mut cumulative = Money::zero();
    let mut max_rate = Rate::ZERO;
    let mut binding: Option<&Bill> = None;

    for bill in unpaid {
        cumulative += bill.amount;

        let needed = cumulative - starting_cash;
        if !needed.is_positive() {
            tracing::debug!(bill = %bill.id, %cumulative, "milestone covered by cash on hand");
            continue;
        }

        let days = working_days_until(work_days, today, bill.due_date);
        let rate = Rate {
            needed: needed.cents(),
            days,
        };
        tracing::debug!(
            bill = %bill.id,
            due = %bill.due_date,
            %needed,
            days,
            "evaluated milestone"
        );

        if rate > max_rate {
            max_rate = rate;
            binding = Some(bill);
        }
    }

    let daily_goal = max_rate.to_money();

    let result = match binding {
        Some(bill) => DailyGoal {
            daily_goal,
            explanation: focus_message(&bill.description, max_rate.days),
            binding_bill: Some(bill.id),
            working_days: Some(max_rate.days),
            amount_needed: Some(Money::from_cents(max_rate.needed)),
        },
        None if daily_goal.is_positive() => DailyGoal {
            daily_goal,
            explanation: COVERS_ALL_BILLS.to_string(),
            binding_bill: None,
            working_days: None,
            amount_needed: None,
        },
        None => DailyGoal::zero(CASH_COVERS_BILLS),
    };

    tracing::debug!(
        goal = %result.daily_goal,
        %starting_cash,
        "computed daily goal"
    );

    result
}

fn focus_message(description: &str, days: u32) -> String {
    let label = if days == 1 { "day" } else { "days" };
    format!("Focus: pay off {} in {} {}.", description, days, label)
}
