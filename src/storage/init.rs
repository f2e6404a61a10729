//! Storage initialization
//!
//! First-run setup: directories, default settings and empty data files.

use crate::config::paths::DriverbookPaths;
use crate::config::settings::Settings;
use crate::error::DriverbookError;
use crate::models::{Bill, Transaction};

use super::file_io::write_json_atomic;

#[derive(serde::Serialize)]
struct EmptyTransactions {
    transactions: Vec<Transaction>,
}

#[derive(serde::Serialize)]
struct EmptyBills {
    bills: Vec<Bill>,
}

/// Initialize storage for a fresh installation
///
/// Existing files are left untouched, so running this twice is harmless.
/// Returns the settings now in effect.
pub fn initialize_storage(paths: &DriverbookPaths) -> Result<Settings, DriverbookError> {
    paths.ensure_directories()?;

    let settings = Settings::load_or_create(paths)?;
    if !paths.settings_file().exists() {
        settings.save(paths)?;
    }

    if !paths.transactions_file().exists() {
        write_json_atomic(
            paths.transactions_file(),
            &EmptyTransactions {
                transactions: Vec::new(),
            },
        )?;
    }

    if !paths.bills_file().exists() {
        write_json_atomic(paths.bills_file(), &EmptyBills { bills: Vec::new() })?;
    }

    tracing::info!(path = %paths.base_dir().display(), "storage initialized");
    Ok(settings)
}
