//! Transaction service
//!
//! Recording income and expenses, listing history by date range and
//! removing entries, with validation and audit logging.

use chrono::NaiveDate;

use crate::error::{DriverbookError, DriverbookResult};
use crate::models::{Money, Transaction, TransactionId, TransactionKind};
use crate::reports::ReportRange;
use crate::storage::Storage;

/// Appended to expenses recorded as part of a shift
pub const SHIFT_SUFFIX: &str = "(shift)";

/// Service for transaction management
pub struct TransactionService<'a> {
    storage: &'a Storage,
}

/// Input for recording a new transaction
#[derive(Debug, Clone)]
pub struct CreateTransactionInput {
    pub amount: Money,
    pub description: String,
    pub date: NaiveDate,
    pub category: Option<String>,
    /// Kilometres driven, income only
    pub mileage: Option<f64>,
    /// Hours worked, income only
    pub duration_hours: Option<f64>,
}

impl CreateTransactionInput {
    pub fn new(amount: Money, description: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            amount,
            description: description.into(),
            date,
            category: None,
            mileage: None,
            duration_hours: None,
        }
    }
}

impl<'a> TransactionService<'a> {
    /// Create a new transaction service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Record earnings
    pub fn add_income(&self, input: CreateTransactionInput) -> DriverbookResult<Transaction> {
        self.create(TransactionKind::Income, input)
    }

    /// Record a cost. Mileage and hours are ignored for expenses.
    pub fn add_expense(&self, input: CreateTransactionInput) -> DriverbookResult<Transaction> {
        self.create(
            TransactionKind::Expense,
            CreateTransactionInput {
                mileage: None,
                duration_hours: None,
                ..input
            },
        )
    }

    /// Record one shift: the income earned plus the costs it ran up
    ///
    /// Expense descriptions get a ` (shift)` suffix. Every entry is
    /// validated before anything is written, so a bad expense records
    /// nothing.
    pub fn close_shift(
        &self,
        income: CreateTransactionInput,
        expenses: Vec<CreateTransactionInput>,
    ) -> DriverbookResult<(Transaction, Vec<Transaction>)> {
        let income = build(TransactionKind::Income, income)?;
        let expenses = expenses
            .into_iter()
            .map(|input| {
                let base = input.description.trim();
                let description = if base.is_empty() {
                    String::new()
                } else {
                    format!("{} {}", base, SHIFT_SUFFIX)
                };
                build(
                    TransactionKind::Expense,
                    CreateTransactionInput {
                        description,
                        date: income.date,
                        mileage: None,
                        duration_hours: None,
                        ..input
                    },
                )
            })
            .collect::<DriverbookResult<Vec<_>>>()?;

        for txn in std::iter::once(&income).chain(&expenses) {
            self.storage.transactions.upsert(txn.clone())?;
        }
        self.storage.transactions.save()?;
        for txn in std::iter::once(&income).chain(&expenses) {
            self.storage.log_create(txn)?;
        }

        tracing::debug!(
            income = income.amount.cents(),
            expenses = expenses.len(),
            "shift recorded"
        );
        Ok((income, expenses))
    }

    fn create(
        &self,
        kind: TransactionKind,
        input: CreateTransactionInput,
    ) -> DriverbookResult<Transaction> {
        let txn = build(kind, input)?;

        self.storage.transactions.upsert(txn.clone())?;
        self.storage.transactions.save()?;
        self.storage.log_create(&txn)?;

        tracing::debug!(id = %txn.id, kind = ?txn.kind, amount = txn.amount.cents(), "transaction recorded");
        Ok(txn)
    }

    /// Get a transaction by ID
    pub fn get(&self, id: TransactionId) -> DriverbookResult<Option<Transaction>> {
        self.storage.transactions.get(id)
    }

    /// Find a transaction by full or short ID
    ///
    /// A short reference matching more than one transaction is an error.
    pub fn find(&self, reference: &str) -> DriverbookResult<Option<Transaction>> {
        let mut matches = self.storage.transactions.find_by_reference(reference)?;
        match matches.len() {
            0 => Ok(None),
            1 => Ok(matches.pop()),
            n => Err(DriverbookError::Validation(format!(
                "Reference '{}' is ambiguous ({} transactions match)",
                reference, n
            ))),
        }
    }

    /// Transactions dated inside `range`, newest first
    pub fn list(&self, range: ReportRange, today: NaiveDate) -> DriverbookResult<Vec<Transaction>> {
        let mut transactions = self.storage.transactions.get_all()?;
        transactions.retain(|t| range.contains(t.date, today));
        Ok(transactions)
    }

    /// Delete a transaction
    pub fn delete(&self, id: TransactionId) -> DriverbookResult<Transaction> {
        let txn = self
            .storage
            .transactions
            .delete(id)?
            .ok_or_else(|| DriverbookError::transaction_not_found(id.to_string()))?;
        self.storage.transactions.save()?;

        self.storage.log_delete(&txn)?;

        Ok(txn)
    }
}

fn build(kind: TransactionKind, input: CreateTransactionInput) -> DriverbookResult<Transaction> {
    let mut txn = Transaction::new(kind, input.amount, input.description.trim(), input.date);
    txn.category = input
        .category
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty());
    txn.mileage = input.mileage;
    txn.duration_hours = input.duration_hours;

    txn.validate()
        .map_err(|e| DriverbookError::Validation(e.to_string()))?;
    Ok(txn)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::{Change, EntityType};
    use crate::config::paths::DriverbookPaths;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = DriverbookPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, d).unwrap()
    }

    #[test]
    fn test_add_income_persists_and_audits() {
        let (_temp, storage) = create_test_storage();
        let service = TransactionService::new(&storage);

        let mut input = CreateTransactionInput::new(Money::from_units(150), "Evening shift", date(2));
        input.mileage = Some(120.0);
        input.duration_hours = Some(6.5);
        let txn = service.add_income(input).unwrap();

        assert!(txn.is_income());
        assert_eq!(txn.mileage, Some(120.0));

        storage.transactions.load().unwrap();
        assert_eq!(storage.transactions.count().unwrap(), 1);

        let entries = storage.audit().read_recent(10).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].entity, EntityType::Transaction);
        assert_eq!(entries[0].reference, txn.id.to_string());
        assert!(matches!(entries[0].change, Change::Created { .. }));
    }

    #[test]
    fn test_add_expense_drops_trip_data() {
        let (_temp, storage) = create_test_storage();
        let service = TransactionService::new(&storage);

        let mut input = CreateTransactionInput::new(Money::from_units(40), "Gas", date(2));
        input.category = Some("Fuel".into());
        input.mileage = Some(10.0);
        let txn = service.add_expense(input).unwrap();

        assert!(txn.is_expense());
        assert_eq!(txn.mileage, None);
        assert_eq!(txn.category.as_deref(), Some("Fuel"));
    }

    #[test]
    fn test_add_rejects_invalid_input() {
        let (_temp, storage) = create_test_storage();
        let service = TransactionService::new(&storage);

        let err = service
            .add_income(CreateTransactionInput::new(Money::from_units(10), "  ", date(1)))
            .unwrap_err();
        assert!(err.is_validation());

        let err = service
            .add_expense(CreateTransactionInput::new(Money::from_cents(-5), "Oil", date(1)))
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(storage.transactions.count().unwrap(), 0);
    }

    #[test]
    fn test_list_by_range() {
        let (_temp, storage) = create_test_storage();
        let service = TransactionService::new(&storage);
        for d in [1, 9, 10] {
            service
                .add_income(CreateTransactionInput::new(Money::from_units(10), "Ride", date(d)))
                .unwrap();
        }

        // 2025-06-10 is a Tuesday; the week began on Monday the 9th
        let week = service.list(ReportRange::Week, date(10)).unwrap();
        assert_eq!(week.len(), 2);
        assert_eq!(week[0].date, date(10));

        let all = service.list(ReportRange::All, date(10)).unwrap();
        assert_eq!(all.len(), 3);
    }

    #[test]
    fn test_find_and_delete() {
        let (_temp, storage) = create_test_storage();
        let service = TransactionService::new(&storage);
        let txn = service
            .add_income(CreateTransactionInput::new(Money::from_units(10), "Ride", date(1)))
            .unwrap();

        let found = service.find(&txn.id.to_string()).unwrap().unwrap();
        assert_eq!(found.id, txn.id);

        let deleted = service.delete(txn.id).unwrap();
        assert_eq!(deleted.id, txn.id);
        assert!(service.get(txn.id).unwrap().is_none());

        let err = service.delete(txn.id).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_close_shift_records_income_and_tagged_expenses() {
        let (_temp, storage) = create_test_storage();
        let service = TransactionService::new(&storage);

        let mut income = CreateTransactionInput::new(Money::from_units(220), "Friday night", date(6));
        income.mileage = Some(180.0);
        income.duration_hours = Some(9.0);
        let mut gas = CreateTransactionInput::new(Money::from_units(55), "Gas", date(1));
        gas.category = Some("Fuel".into());
        let tolls = CreateTransactionInput::new(Money::from_units(8), "Tolls", date(6));

        let (income, expenses) = service.close_shift(income, vec![gas, tolls]).unwrap();

        assert_eq!(income.mileage, Some(180.0));
        assert_eq!(income.duration_hours, Some(9.0));
        assert_eq!(expenses.len(), 2);
        assert_eq!(expenses[0].description, "Gas (shift)");
        assert_eq!(expenses[0].category.as_deref(), Some("Fuel"));
        // expenses land on the shift's date
        assert_eq!(expenses[0].date, date(6));
        assert_eq!(expenses[1].description, "Tolls (shift)");

        storage.transactions.load().unwrap();
        assert_eq!(storage.transactions.count().unwrap(), 3);
        assert_eq!(storage.audit().read_recent(10).unwrap().len(), 3);
    }

    #[test]
    fn test_close_shift_with_bad_expense_records_nothing() {
        let (_temp, storage) = create_test_storage();
        let service = TransactionService::new(&storage);

        let income = CreateTransactionInput::new(Money::from_units(100), "Lunch rush", date(3));
        let bad = CreateTransactionInput::new(Money::from_cents(-100), "Parking", date(3));

        let err = service.close_shift(income, vec![bad]).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(storage.transactions.count().unwrap(), 0);
        assert!(storage.audit().read_recent(10).unwrap().is_empty());
    }
}
