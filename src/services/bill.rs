//! Bill service
//!
//! Upcoming obligations: creation, edits, paid-state changes and removal.

use chrono::{NaiveDate, Utc};

use crate::error::{DriverbookError, DriverbookResult};
use crate::models::{Bill, BillId, Money};
use crate::storage::Storage;

/// Service for bill management
pub struct BillService<'a> {
    storage: &'a Storage,
}

/// Input for creating a new bill
#[derive(Debug, Clone)]
pub struct CreateBillInput {
    pub description: String,
    pub amount: Money,
    pub due_date: NaiveDate,
    pub category: Option<String>,
}

/// Changes to an existing bill; `None` leaves a field as it is
#[derive(Debug, Clone, Default)]
pub struct UpdateBillInput {
    pub description: Option<String>,
    pub amount: Option<Money>,
    pub due_date: Option<NaiveDate>,
    /// `Some("")` clears the category
    pub category: Option<String>,
}

impl UpdateBillInput {
    pub fn is_empty(&self) -> bool {
        self.description.is_none()
            && self.amount.is_none()
            && self.due_date.is_none()
            && self.category.is_none()
    }
}

impl<'a> BillService<'a> {
    /// Create a new bill service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a new unpaid bill
    pub fn create(&self, input: CreateBillInput) -> DriverbookResult<Bill> {
        let mut bill = Bill::new(input.description.trim(), input.amount, input.due_date);
        bill.category = input
            .category
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());

        bill.validate()
            .map_err(|e| DriverbookError::Validation(e.to_string()))?;

        self.storage.bills.upsert(bill.clone())?;
        self.storage.bills.save()?;

        self.storage.log_create(&bill)?;

        Ok(bill)
    }

    /// Edit a bill's description, amount, due date or category
    ///
    /// The paid flag is left alone. Nothing is saved or audited when the
    /// edit changes no field.
    pub fn update(&self, id: BillId, input: UpdateBillInput) -> DriverbookResult<Bill> {
        let before = self
            .storage
            .bills
            .get(id)?
            .ok_or_else(|| DriverbookError::bill_not_found(id.to_string()))?;

        let mut bill = before.clone();
        if let Some(description) = input.description {
            bill.description = description.trim().to_string();
        }
        if let Some(amount) = input.amount {
            bill.amount = amount;
        }
        if let Some(due_date) = input.due_date {
            bill.due_date = due_date;
        }
        if let Some(category) = input.category {
            let category = category.trim();
            bill.category = (!category.is_empty()).then(|| category.to_string());
        }

        bill.validate()
            .map_err(|e| DriverbookError::Validation(e.to_string()))?;
        if bill == before {
            return Ok(before);
        }
        bill.updated_at = Utc::now();

        self.storage.bills.upsert(bill.clone())?;
        self.storage.bills.save()?;
        self.storage.log_update(&before, &bill)?;

        tracing::debug!(id = %bill.id, due = %bill.due_date, amount = bill.amount.cents(), "bill updated");
        Ok(bill)
    }

    /// Get a bill by ID
    pub fn get(&self, id: BillId) -> DriverbookResult<Option<Bill>> {
        self.storage.bills.get(id)
    }

    /// Find a bill by ID or description
    ///
    /// A reference matching more than one bill is an error.
    pub fn find(&self, reference: &str) -> DriverbookResult<Option<Bill>> {
        let mut matches = self.storage.bills.find_by_reference(reference)?;
        match matches.len() {
            0 => Ok(None),
            1 => Ok(matches.pop()),
            n => Err(DriverbookError::Validation(format!(
                "Reference '{}' is ambiguous ({} bills match); use the bill ID",
                reference, n
            ))),
        }
    }

    /// Bills by due date, optionally including those already paid
    pub fn list(&self, include_paid: bool) -> DriverbookResult<Vec<Bill>> {
        if include_paid {
            self.storage.bills.get_all()
        } else {
            self.storage.bills.get_unpaid()
        }
    }

    /// Flip a bill between paid and unpaid
    pub fn toggle_paid(&self, id: BillId) -> DriverbookResult<Bill> {
        self.update_paid(id, |bill| bill.toggle_paid())
    }

    /// Mark a bill paid or unpaid; a no-op when already in that state
    pub fn set_paid(&self, id: BillId, paid: bool) -> DriverbookResult<Bill> {
        self.update_paid(id, |bill| bill.set_paid(paid))
    }

    fn update_paid(&self, id: BillId, change: impl FnOnce(&mut Bill)) -> DriverbookResult<Bill> {
        let before = self
            .storage
            .bills
            .get(id)?
            .ok_or_else(|| DriverbookError::bill_not_found(id.to_string()))?;

        let mut bill = before.clone();
        change(&mut bill);
        if bill.is_paid == before.is_paid {
            return Ok(before);
        }

        self.storage.bills.upsert(bill.clone())?;
        self.storage.bills.save()?;

        self.storage.log_update(&before, &bill)?;

        Ok(bill)
    }

    /// Delete a bill
    pub fn delete(&self, id: BillId) -> DriverbookResult<Bill> {
        let bill = self
            .storage
            .bills
            .delete(id)?
            .ok_or_else(|| DriverbookError::bill_not_found(id.to_string()))?;
        self.storage.bills.save()?;

        self.storage.log_delete(&bill)?;

        Ok(bill)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Change;
    use crate::models::WorkDaySet;
    use crate::reports::compute_daily_goal;
    use crate::config::paths::DriverbookPaths;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = DriverbookPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn input(description: &str, units: i64, day: u32) -> CreateBillInput {
        CreateBillInput {
            description: description.into(),
            amount: Money::from_units(units),
            due_date: NaiveDate::from_ymd_opt(2025, 7, day).unwrap(),
            category: None,
        }
    }

    #[test]
    fn test_create_bill() {
        let (_temp, storage) = create_test_storage();
        let service = BillService::new(&storage);

        let bill = service.create(input("Car rental", 600, 15)).unwrap();
        assert!(!bill.is_paid);

        storage.bills.load().unwrap();
        assert_eq!(storage.bills.count().unwrap(), 1);
    }

    #[test]
    fn test_create_rejects_empty_description() {
        let (_temp, storage) = create_test_storage();
        let service = BillService::new(&storage);

        let err = service.create(input("   ", 10, 1)).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_toggle_and_list() {
        let (_temp, storage) = create_test_storage();
        let service = BillService::new(&storage);
        let rent = service.create(input("Rent", 900, 1)).unwrap();
        service.create(input("Phone", 40, 3)).unwrap();

        let toggled = service.toggle_paid(rent.id).unwrap();
        assert!(toggled.is_paid);

        assert_eq!(service.list(false).unwrap().len(), 1);
        assert_eq!(service.list(true).unwrap().len(), 2);

        let toggled = service.toggle_paid(rent.id).unwrap();
        assert!(!toggled.is_paid);
        assert_eq!(service.list(false).unwrap().len(), 2);
    }

    #[test]
    fn test_set_paid_is_idempotent() {
        let (_temp, storage) = create_test_storage();
        let service = BillService::new(&storage);
        let bill = service.create(input("Insurance", 120, 20)).unwrap();

        service.set_paid(bill.id, true).unwrap();
        service.set_paid(bill.id, true).unwrap();

        let entries = storage.audit().read_recent(10).unwrap();
        let updates = entries
            .iter()
            .filter(|e| matches!(e.change, Change::Updated { .. }))
            .count();
        assert_eq!(updates, 1);
    }

    #[test]
    fn test_find_by_description() {
        let (_temp, storage) = create_test_storage();
        let service = BillService::new(&storage);
        let bill = service.create(input("Rent", 900, 1)).unwrap();

        assert_eq!(service.find("RENT").unwrap().unwrap().id, bill.id);
        assert!(service.find("water").unwrap().is_none());

        service.create(input("Rent", 900, 28)).unwrap();
        assert!(service.find("rent").unwrap_err().is_validation());
    }

    #[test]
    fn test_delete() {
        let (_temp, storage) = create_test_storage();
        let service = BillService::new(&storage);
        let bill = service.create(input("Rent", 900, 1)).unwrap();

        service.delete(bill.id).unwrap();
        assert!(service.get(bill.id).unwrap().is_none());
        assert!(service.delete(bill.id).unwrap_err().is_not_found());
    }

    #[test]
    fn test_update_changes_only_given_fields() {
        let (_temp, storage) = create_test_storage();
        let service = BillService::new(&storage);
        let bill = service.create(input("Rent", 900, 10)).unwrap();
        service.set_paid(bill.id, true).unwrap();

        let edited = service
            .update(
                bill.id,
                UpdateBillInput {
                    amount: Some(Money::from_units(950)),
                    category: Some("Housing".into()),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(edited.description, "Rent");
        assert_eq!(edited.amount, Money::from_units(950));
        assert_eq!(edited.due_date, bill.due_date);
        assert_eq!(edited.category.as_deref(), Some("Housing"));
        assert!(edited.is_paid);

        storage.bills.load().unwrap();
        assert_eq!(storage.bills.get(bill.id).unwrap().unwrap().amount, Money::from_units(950));

        let last = storage.audit().read_recent(1).unwrap().pop().unwrap();
        match last.change {
            Change::Updated { summary, .. } => {
                let summary = summary.unwrap();
                assert!(summary.contains("amount: 90000 -> 95000"));
                assert!(summary.contains("category: (added) -> \"Housing\""));
            }
            other => panic!("unexpected change {:?}", other),
        }
    }

    #[test]
    fn test_update_validates_and_skips_no_ops() {
        let (_temp, storage) = create_test_storage();
        let service = BillService::new(&storage);
        let bill = service.create(input("Rent", 900, 10)).unwrap();

        let err = service
            .update(
                bill.id,
                UpdateBillInput {
                    amount: Some(Money::from_cents(-1)),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(service.get(bill.id).unwrap().unwrap().amount, Money::from_units(900));

        service
            .update(
                bill.id,
                UpdateBillInput {
                    description: Some(" Rent ".into()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(storage.audit().read_recent(10).unwrap().len(), 1);

        let missing = service.update(BillId::new(), UpdateBillInput::default());
        assert!(missing.unwrap_err().is_not_found());
    }

    #[test]
    fn test_moving_due_date_changes_goal() {
        let (_temp, storage) = create_test_storage();
        let service = BillService::new(&storage);
        let bill = service.create(input("Car rental", 600, 12)).unwrap();
        // Monday; Mon..Sat schedule gives 6 working days up to Saturday the 12th
        let today = NaiveDate::from_ymd_opt(2025, 7, 7).unwrap();
        let goal = |storage: &Storage| {
            let (transactions, bills) = storage.snapshot().unwrap();
            compute_daily_goal(&transactions, &bills, WorkDaySet::default(), today).daily_goal
        };
        assert_eq!(goal(&storage), Money::from_units(100));

        service
            .update(
                bill.id,
                UpdateBillInput {
                    due_date: NaiveDate::from_ymd_opt(2025, 7, 9),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(goal(&storage), Money::from_units(200));
    }
}
