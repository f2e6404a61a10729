//! Bill model
//!
//! A bill is an upcoming obligation with a due date. Its paid flag is
//! toggled by the user; unpaid bills drive the daily earnings goal.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::BillId;
use super::money::Money;

/// An upcoming bill
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bill {
    pub id: BillId,

    pub description: String,

    pub amount: Money,

    pub due_date: NaiveDate,

    #[serde(default)]
    pub is_paid: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Bill {
    /// Create a new unpaid bill
    pub fn new(description: impl Into<String>, amount: Money, due_date: NaiveDate) -> Self {
        let now = Utc::now();
        Self {
            id: BillId::new(),
            description: description.into(),
            amount,
            due_date,
            is_paid: false,
            category: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Flip the paid flag
    pub fn toggle_paid(&mut self) {
        self.set_paid(!self.is_paid);
    }

    pub fn set_paid(&mut self, paid: bool) {
        self.is_paid = paid;
        self.updated_at = Utc::now();
    }

    /// An unpaid bill whose due date is before `today`
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.is_paid && self.due_date < today
    }

    /// Calendar days from `today` until the due date (negative when overdue)
    pub fn days_until_due(&self, today: NaiveDate) -> i64 {
        (self.due_date - today).num_days()
    }

    pub fn validate(&self) -> Result<(), BillValidationError> {
        if self.description.trim().is_empty() {
            return Err(BillValidationError::MissingDescription);
        }

        if self.amount.is_negative() {
            return Err(BillValidationError::NegativeAmount);
        }

        Ok(())
    }
}

impl fmt::Display for Bill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} due {}",
            self.description,
            self.amount,
            self.due_date.format("%Y-%m-%d")
        )
    }
}

/// Validation errors for bills
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BillValidationError {
    MissingDescription,
    NegativeAmount,
}

impl fmt::Display for BillValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingDescription => write!(f, "Bill description cannot be empty"),
            Self::NegativeAmount => write!(f, "Bill amount cannot be negative"),
        }
    }
}

impl std::error::Error for BillValidationError {}
