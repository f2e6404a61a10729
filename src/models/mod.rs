//! Core data models for Driverbook
//!
//! Transactions (income and expenses), bills, the weekly work schedule and
//! the supporting money, ID and date types.

pub mod bill;
pub mod date;
pub mod ids;
pub mod money;
pub mod transaction;
pub mod work_days;

pub use bill::Bill;
pub use date::parse_date;
pub use ids::{BillId, TransactionId};
pub use money::Money;
pub use transaction::{Transaction, TransactionKind};
pub use work_days::WorkDaySet;
