//! Transaction display formatting
//!
//! Table view for history listings and a detail view for single entries.

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};

use crate::models::{Money, Transaction, TransactionKind};

#[derive(Tabled)]
struct TransactionRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Type")]
    kind: &'static str,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Km")]
    km: String,
    #[tabled(rename = "Hours")]
    hours: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

impl TransactionRow {
    fn new(txn: &Transaction, symbol: &str) -> Self {
        Self {
            id: txn.id.to_string(),
            date: txn.date.format("%Y-%m-%d").to_string(),
            kind: kind_label(txn.kind),
            description: truncate(&txn.description, 30),
            category: txn.category.clone().unwrap_or_default(),
            km: optional_quantity(txn.mileage),
            hours: optional_quantity(txn.duration_hours),
            amount: txn.signed_amount().format_with_symbol(symbol),
        }
    }
}

fn kind_label(kind: TransactionKind) -> &'static str {
    match kind {
        TransactionKind::Income => "income",
        TransactionKind::Expense => "expense",
    }
}

fn optional_quantity(value: Option<f64>) -> String {
    value.map(|v| format!("{:.1}", v)).unwrap_or_default()
}

/// Format transactions as a table with a balance footer
pub fn format_transaction_table(transactions: &[Transaction], symbol: &str) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let rows: Vec<TransactionRow> = transactions
        .iter()
        .map(|t| TransactionRow::new(t, symbol))
        .collect();

    let mut table = Table::new(rows);
    table
        .with(Style::psql())
        .modify(Columns::last(), Alignment::right());

    let balance: Money = transactions.iter().map(Transaction::signed_amount).sum();
    format!(
        "{}\n\n{} transaction(s), balance {}\n",
        table,
        transactions.len(),
        balance.format_with_symbol(symbol)
    )
}

/// Format transaction details for display
pub fn format_transaction_details(txn: &Transaction, symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transaction: {}\n", txn.id));
    output.push_str(&format!("Type:        {}\n", kind_label(txn.kind)));
    output.push_str(&format!("Date:        {}\n", txn.date.format("%Y-%m-%d")));
    output.push_str(&format!(
        "Amount:      {}\n",
        txn.amount.format_with_symbol(symbol)
    ));
    output.push_str(&format!("Description: {}\n", txn.description));

    if let Some(category) = &txn.category {
        output.push_str(&format!("Category:    {}\n", category));
    }
    if let Some(km) = txn.mileage {
        output.push_str(&format!("Distance:    {:.1} km\n", km));
    }
    if let Some(hours) = txn.duration_hours {
        output.push_str(&format!("Duration:    {:.1} h\n", hours));
    }

    output
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
