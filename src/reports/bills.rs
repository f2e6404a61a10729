//! Upcoming bills schedule

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{Bill, Money, WorkDaySet};

/// One unpaid bill with timing relative to today
#[derive(Debug, Clone, Serialize)]
pub struct ScheduledBill {
    pub bill: Bill,
    /// Calendar days until due (negative when overdue)
    pub days_until_due: i64,
    /// Working days left in `[today, due_date]`
    pub working_days_left: u32,
    pub overdue: bool,
}

/// Unpaid bills in due-date order
#[derive(Debug, Clone, Serialize)]
pub struct BillSchedule {
    pub entries: Vec<ScheduledBill>,
    pub pending_total: Money,
    pub overdue_total: Money,
}

impl BillSchedule {
    pub fn generate(bills: &[Bill], work_days: WorkDaySet, today: NaiveDate) -> Self {
        let mut unpaid: Vec<&Bill> = bills.iter().filter(|b| !b.is_paid).collect();
        unpaid.sort_by_key(|b| b.due_date);

        let entries: Vec<ScheduledBill> = unpaid
            .into_iter()
            .map(|bill| ScheduledBill {
                days_until_due: bill.days_until_due(today),
                working_days_left: work_days.count_between(today, bill.due_date),
                overdue: bill.is_overdue(today),
                bill: bill.clone(),
            })
            .collect();

        let pending_total = entries.iter().map(|e| e.bill.amount).sum();
        let overdue_total = entries
            .iter()
            .filter(|e| e.overdue)
            .map(|e| e.bill.amount)
            .sum();

        Self {
            entries,
            pending_total,
            overdue_total,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
