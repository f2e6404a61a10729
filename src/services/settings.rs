//! Settings service
//!
//! Persisted changes to user settings, recorded in the audit log like any
//! other mutation.

use crate::config::settings::Settings;
use crate::error::{DriverbookError, DriverbookResult};
use crate::models::WorkDaySet;
use crate::storage::Storage;

/// Service for updating settings
pub struct SettingsService<'a> {
    storage: &'a Storage,
}

impl<'a> SettingsService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Replace the working-day schedule
    ///
    /// An empty schedule is allowed; every bill then counts as a single
    /// working day away.
    pub fn set_work_days(
        &self,
        settings: &mut Settings,
        work_days: WorkDaySet,
    ) -> DriverbookResult<()> {
        self.update(settings, |s| s.work_days = work_days)
    }

    /// Change the symbol printed in front of amounts
    pub fn set_currency_symbol(&self, settings: &mut Settings, symbol: &str) -> DriverbookResult<()> {
        let symbol = symbol.trim();
        if symbol.is_empty() {
            return Err(DriverbookError::Validation(
                "Currency symbol cannot be empty".into(),
            ));
        }
        self.update(settings, |s| {
            s.currency_symbol = symbol.to_string()
        })
    }

    fn update(
        &self,
        settings: &mut Settings,
        change: impl FnOnce(&mut Settings),
    ) -> DriverbookResult<()> {
        let before = settings.clone();
        change(settings);
        settings.save(self.storage.paths())?;

        self.storage.log_update(&before, &*settings)
    }
}
