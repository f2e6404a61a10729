//! Path management for Driverbook
//!
//! ## Path Resolution Order
//!
//! 1. `DRIVERBOOK_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/driverbook` or `~/.config/driverbook`
//! 3. Windows: `%APPDATA%\driverbook`

use std::path::PathBuf;

use crate::error::DriverbookError;

/// Environment variable overriding the base directory
pub const DATA_DIR_ENV: &str = "DRIVERBOOK_DATA_DIR";

/// Manages all paths used by Driverbook
#[derive(Debug, Clone)]
pub struct DriverbookPaths {
    base_dir: PathBuf,
}

impl DriverbookPaths {
    /// Resolve paths from the environment
    ///
    /// # Errors
    ///
    /// Returns an error if no home or config directory can be determined.
    pub fn new() -> Result<Self, DriverbookError> {
        let base_dir = match std::env::var(DATA_DIR_ENV) {
            Ok(custom) if !custom.is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create paths rooted at a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (`<base>/data/`)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    pub fn transactions_file(&self) -> PathBuf {
        self.data_dir().join("transactions.json")
    }

    pub fn bills_file(&self) -> PathBuf {
        self.data_dir().join("bills.json")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), DriverbookError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| DriverbookError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| DriverbookError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }

    /// Check if Driverbook has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

/// Resolve the default base directory for the platform
#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, DriverbookError> {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        if !xdg.is_empty() {
            return Ok(PathBuf::from(xdg).join("driverbook"));
        }
    }

    let dirs = directories::BaseDirs::new()
        .ok_or_else(|| DriverbookError::Config("Could not determine home directory".into()))?;
    Ok(dirs.home_dir().join(".config").join("driverbook"))
}

/// Resolve the default base directory for the platform
#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, DriverbookError> {
    let dirs = directories::BaseDirs::new()
        .ok_or_else(|| DriverbookError::Config("Could not determine APPDATA directory".into()))?;
    Ok(dirs.config_dir().join("driverbook"))
}
