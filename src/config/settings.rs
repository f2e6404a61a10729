//! User settings for Driverbook
//!
//! The work schedule, display preferences and the expense category list.

use serde::{Deserialize, Serialize};

use super::paths::DriverbookPaths;
use crate::error::DriverbookError;
use crate::models::WorkDaySet;

/// Default expense categories offered to new installs
pub const DEFAULT_EXPENSE_CATEGORIES: [&str; 6] = [
    "Fuel",
    "Maintenance",
    "Food",
    "Insurance/Taxes",
    "Vehicle Rental",
    "Other",
];

/// User settings for Driverbook
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Weekdays the driver plans to work
    #[serde(default)]
    pub work_days: WorkDaySet,

    /// Currency symbol used in terminal output
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Categories suggested for expenses and bills
    #[serde(default = "default_expense_categories")]
    pub expense_categories: Vec<String>,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_expense_categories() -> Vec<String> {
    DEFAULT_EXPENSE_CATEGORIES
        .iter()
        .map(|c| c.to_string())
        .collect()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            work_days: WorkDaySet::default(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            expense_categories: default_expense_categories(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or fall back to defaults if the file doesn't exist
    pub fn load_or_create(paths: &DriverbookPaths) -> Result<Self, DriverbookError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Don't save yet - let caller decide when to persist
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| DriverbookError::Io(format!("Failed to read settings file: {}", e)))?;

        serde_json::from_str(&contents)
            .map_err(|e| DriverbookError::Config(format!("Failed to parse settings file: {}", e)))
    }

    /// Save settings to disk
    pub fn save(&self, paths: &DriverbookPaths) -> Result<(), DriverbookError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| DriverbookError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| DriverbookError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Case-insensitive lookup returning the canonical category name
    pub fn find_category(&self, name: &str) -> Option<&str> {
        self.expense_categories
            .iter()
            .find(|c| c.eq_ignore_ascii_case(name.trim()))
            .map(String::as_str)
    }
}
