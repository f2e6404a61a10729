//! Goal service
//!
//! Feeds the stored transactions and bills, the configured work schedule
//! and the clock's date into the report calculators.

use chrono::NaiveDate;

use crate::clock::Clock;
use crate::error::DriverbookResult;
use crate::models::WorkDaySet;
use crate::reports::{
    compute_daily_goal, BillSchedule, DailyGoal, DashboardStats, PeriodReport, ReportRange,
};
use crate::storage::Storage;

/// Service computing the daily goal and the derived reports
pub struct GoalService<'a> {
    storage: &'a Storage,
    work_days: WorkDaySet,
    clock: &'a dyn Clock,
}

impl<'a> GoalService<'a> {
    pub fn new(storage: &'a Storage, work_days: WorkDaySet, clock: &'a dyn Clock) -> Self {
        Self {
            storage,
            work_days,
            clock,
        }
    }

    /// The date every calculation is evaluated against
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn work_days(&self) -> WorkDaySet {
        self.work_days
    }

    /// Today's earnings target
    pub fn daily_goal(&self) -> DriverbookResult<DailyGoal> {
        let (transactions, bills) = self.storage.snapshot()?;
        Ok(compute_daily_goal(
            &transactions,
            &bills,
            self.work_days,
            self.today(),
        ))
    }

    pub fn dashboard(&self) -> DriverbookResult<DashboardStats> {
        let (transactions, bills) = self.storage.snapshot()?;
        Ok(DashboardStats::compute(
            &transactions,
            &bills,
            self.work_days,
            self.today(),
        ))
    }

    pub fn period_report(&self, range: ReportRange) -> DriverbookResult<PeriodReport> {
        let transactions = self.storage.transactions.get_all()?;
        Ok(PeriodReport::generate(&transactions, range, self.today()))
    }

    /// Unpaid bills with days and working days left
    pub fn bill_schedule(&self) -> DriverbookResult<BillSchedule> {
        let bills = self.storage.bills.get_all()?;
        Ok(BillSchedule::generate(&bills, self.work_days, self.today()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::config::paths::DriverbookPaths;
    use crate::models::{Bill, Money, Transaction};
    use crate::reports::daily_goal::NO_PENDING_BILLS;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = DriverbookPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, m, d).unwrap()
    }

    #[test]
    fn test_goal_without_bills() {
        let (_temp, storage) = create_test_storage();
        let clock = FixedClock(date(1, 6));
        let service = GoalService::new(&storage, WorkDaySet::default(), &clock);

        let goal = service.daily_goal().unwrap();
        assert!(goal.daily_goal.is_zero());
        assert_eq!(goal.explanation, NO_PENDING_BILLS);
    }

    #[test]
    fn test_goal_uses_stored_data_and_clock() {
        let (_temp, storage) = create_test_storage();
        storage
            .transactions
            .upsert(Transaction::income(Money::from_units(100), "Ride", date(1, 5)))
            .unwrap();
        let bill = Bill::new("Rent", Money::from_units(1000), date(1, 10));
        let bill_id = bill.id;
        storage.bills.upsert(bill).unwrap();

        // Monday 2025-01-06 through Friday the 10th, Mon..Sat schedule
        let clock = FixedClock(date(1, 6));
        let service = GoalService::new(&storage, WorkDaySet::default(), &clock);

        let goal = service.daily_goal().unwrap();
        assert_eq!(goal.daily_goal, Money::from_units(180));
        assert_eq!(goal.binding_bill, Some(bill_id));
        assert_eq!(goal.working_days, Some(5));
    }

    #[test]
    fn test_dashboard_and_schedule() {
        let (_temp, storage) = create_test_storage();
        storage
            .transactions
            .upsert(Transaction::income(Money::from_units(80), "Ride", date(1, 6)))
            .unwrap();
        storage
            .bills
            .upsert(Bill::new("Phone", Money::from_units(40), date(1, 3)))
            .unwrap();

        let clock = FixedClock(date(1, 6));
        let service = GoalService::new(&storage, WorkDaySet::default(), &clock);

        let stats = service.dashboard().unwrap();
        assert_eq!(stats.earnings_today, Money::from_units(80));
        assert_eq!(stats.pending_bills_count, 1);

        let schedule = service.bill_schedule().unwrap();
        assert_eq!(schedule.entries.len(), 1);
        assert!(schedule.entries[0].overdue);

        let report = service.period_report(ReportRange::Today).unwrap();
        assert_eq!(report.total_income, Money::from_units(80));
    }
}
