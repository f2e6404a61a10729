//! Transaction model
//!
//! An entry in the driver's log: either income from a ride/delivery platform
//! or an expense (fuel, maintenance, food...). Transactions are immutable
//! once recorded; the only lifecycle operation is deletion.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::TransactionId;
use super::money::Money;

/// Direction of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "Income"),
            Self::Expense => write!(f, "Expense"),
        }
    }
}

/// A recorded income or expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,

    pub kind: TransactionKind,

    /// Always non-negative; the kind carries the direction
    pub amount: Money,

    #[serde(default)]
    pub description: String,

    pub date: NaiveDate,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Distance driven for this income, in kilometres
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mileage: Option<f64>,

    /// Time spent earning this income, in hours
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_hours: Option<f64>,

    pub created_at: DateTime<Utc>,
}

impl Transaction {
    /// Create a new transaction
    pub fn new(
        kind: TransactionKind,
        amount: Money,
        description: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: TransactionId::new(),
            kind,
            amount,
            description: description.into(),
            date,
            category: None,
            mileage: None,
            duration_hours: None,
            created_at: Utc::now(),
        }
    }

    pub fn income(amount: Money, description: impl Into<String>, date: NaiveDate) -> Self {
        Self::new(TransactionKind::Income, amount, description, date)
    }

    pub fn expense(amount: Money, description: impl Into<String>, date: NaiveDate) -> Self {
        Self::new(TransactionKind::Expense, amount, description, date)
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_mileage(mut self, km: f64) -> Self {
        self.mileage = Some(km);
        self
    }

    pub fn with_duration_hours(mut self, hours: f64) -> Self {
        self.duration_hours = Some(hours);
        self
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    /// Amount with sign applied: positive for income, negative for expenses
    pub fn signed_amount(&self) -> Money {
        match self.kind {
            TransactionKind::Income => self.amount,
            TransactionKind::Expense => -self.amount,
        }
    }

    /// Validate the transaction
    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        if self.amount.is_negative() {
            return Err(TransactionValidationError::NegativeAmount);
        }

        if self.description.trim().is_empty() {
            return Err(TransactionValidationError::MissingDescription);
        }

        if let Some(km) = self.mileage {
            if !km.is_finite() || km < 0.0 {
                return Err(TransactionValidationError::InvalidMileage(km));
            }
        }

        if let Some(hours) = self.duration_hours {
            if !hours.is_finite() || hours < 0.0 {
                return Err(TransactionValidationError::InvalidDuration(hours));
            }
        }

        Ok(())
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.date.format("%Y-%m-%d"),
            self.kind,
            self.amount,
            self.description
        )
    }
}

/// Validation errors for transactions
#[derive(Debug, Clone, PartialEq)]
pub enum TransactionValidationError {
    NegativeAmount,
    MissingDescription,
    InvalidMileage(f64),
    InvalidDuration(f64),
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeAmount => write!(f, "Amount cannot be negative"),
            Self::MissingDescription => write!(f, "Description cannot be empty"),
            Self::InvalidMileage(km) => write!(f, "Invalid mileage: {}", km),
            Self::InvalidDuration(h) => write!(f, "Invalid duration: {} hours", h),
        }
    }
}

impl std::error::Error for TransactionValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
    }

    #[test]
    fn test_income_builder() {
        let txn = Transaction::income(Money::from_units(180), "Uber", today())
            .with_mileage(120.5)
            .with_duration_hours(8.0);

        assert!(txn.is_income());
        assert_eq!(txn.mileage, Some(120.5));
        assert_eq!(txn.duration_hours, Some(8.0));
        assert_eq!(txn.signed_amount().cents(), 18000);
        assert!(txn.validate().is_ok());
    }

    #[test]
    fn test_expense_signed_amount() {
        let txn = Transaction::expense(Money::from_units(50), "Fuel", today()).with_category("Fuel");
        assert!(txn.is_expense());
        assert_eq!(txn.signed_amount().cents(), -5000);
    }

    #[test]
    fn test_validation() {
        let txn = Transaction::expense(Money::from_cents(-1), "Fuel", today());
        assert_eq!(txn.validate(), Err(TransactionValidationError::NegativeAmount));

        let txn = Transaction::income(Money::from_units(1), "  ", today());
        assert_eq!(
            txn.validate(),
            Err(TransactionValidationError::MissingDescription)
        );

        let txn = Transaction::income(Money::from_units(1), "Ride", today()).with_mileage(-3.0);
        assert!(matches!(
            txn.validate(),
            Err(TransactionValidationError::InvalidMileage(_))
        ));

        let txn =
            Transaction::income(Money::from_units(1), "Ride", today()).with_duration_hours(f64::NAN);
        assert!(matches!(
            txn.validate(),
            Err(TransactionValidationError::InvalidDuration(_))
        ));
    }

    #[test]
    fn test_serialization_skips_missing_optionals() {
        let txn = Transaction::income(Money::from_units(10), "Ride", today());
        let json = serde_json::to_string(&txn).unwrap();
        assert!(json.contains("\"kind\":\"income\""));
        assert!(json.contains("\"date\":\"2025-01-15\""));
        assert!(!json.contains("mileage"));

        let back: Transaction = serde_json::from_str(&json).unwrap();
        assert_eq!(back, txn);
    }
}
