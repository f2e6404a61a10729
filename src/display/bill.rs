//! Bill display formatting

use chrono::NaiveDate;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{Bill, Money};
use crate::reports::BillSchedule;

#[derive(Tabled)]
struct BillRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Due")]
    due: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Status")]
    status: String,
}

/// "paid", "overdue by N days", "due today" or "in N days"
pub fn bill_status(bill: &Bill, today: NaiveDate) -> String {
    if bill.is_paid {
        return "paid".to_string();
    }
    match bill.days_until_due(today) {
        0 => "due today".to_string(),
        1 => "in 1 day".to_string(),
        -1 => "overdue by 1 day".to_string(),
        n if n < 0 => format!("overdue by {} days", -n),
        n => format!("in {} days", n),
    }
}

/// Format bills as a table
pub fn format_bill_table(bills: &[Bill], today: NaiveDate, symbol: &str) -> String {
    if bills.is_empty() {
        return "No bills found.\n".to_string();
    }

    let rows = bills.iter().map(|bill| BillRow {
        id: bill.id.to_string(),
        due: bill.due_date.format("%Y-%m-%d").to_string(),
        description: bill.description.clone(),
        amount: bill.amount.format_with_symbol(symbol),
        status: bill_status(bill, today),
    });

    let mut table = Table::new(rows);
    table.with(Style::psql());

    let unpaid: Money = bills.iter().filter(|b| !b.is_paid).map(|b| b.amount).sum();
    format!(
        "{}\n\nUnpaid total: {}\n",
        table,
        unpaid.format_with_symbol(symbol)
    )
}

/// Format the unpaid-bill schedule with the working days left for each
pub fn format_bill_schedule(schedule: &BillSchedule, symbol: &str) -> String {
    if schedule.is_empty() {
        return "No pending bills.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:10} {:24} {:>12} {:>10}\n",
        "Due", "Description", "Amount", "Work days"
    ));
    output.push_str(&"-".repeat(59));
    output.push('\n');

    for entry in &schedule.entries {
        let marker = if entry.overdue { " !" } else { "" };
        output.push_str(&format!(
            "{:10} {:24} {:>12} {:>10}{}\n",
            entry.bill.due_date.format("%Y-%m-%d"),
            entry.bill.description,
            entry.bill.amount.format_with_symbol(symbol),
            entry.working_days_left,
            marker
        ));
    }

    output.push_str(&"-".repeat(59));
    output.push('\n');
    output.push_str(&format!(
        "Pending: {}",
        schedule.pending_total.format_with_symbol(symbol)
    ));
    if schedule.overdue_total.is_positive() {
        output.push_str(&format!(
            " (overdue: {})",
            schedule.overdue_total.format_with_symbol(symbol)
        ));
    }
    output.push('\n');

    output
}
