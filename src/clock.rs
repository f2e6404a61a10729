use chrono::{Local, NaiveDate};

/// Clock abstracts access to the current calendar date so services remain deterministic in tests.
pub trait Clock: Send + Sync {
    /// Returns today's date in the host's local calendar.
    fn today(&self) -> NaiveDate;
}

/// Reads the local date from the system.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Always reports the same date. Used by tests and the `--today` override.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
