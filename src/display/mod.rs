//! Display formatting for terminal output
//!
//! Tables and detail views for transactions, bills and the daily goal.
//! Reports carry their own `format_terminal`.

pub mod bill;
pub mod goal;
pub mod transaction;

pub use bill::{bill_status, format_bill_schedule, format_bill_table};
pub use goal::format_daily_goal;
pub use transaction::{format_transaction_details, format_transaction_table};
