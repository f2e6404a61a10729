//! Storage layer for Driverbook
//!
//! JSON file storage with atomic writes for the transaction log and bills,
//! plus the audit log every mutation is recorded in.

pub mod bills;
pub mod file_io;
pub mod init;
pub mod transactions;

pub use bills::BillRepository;
pub use file_io::{read_json, write_json_atomic};
pub use init::initialize_storage;
pub use transactions::TransactionRepository;

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::audit::{AuditEntry, AuditLogger, Audited};
use crate::config::paths::DriverbookPaths;
use crate::error::{DriverbookError, DriverbookResult};
use crate::models::{Bill, Transaction};

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: DriverbookPaths,
    pub transactions: TransactionRepository,
    pub bills: BillRepository,
    audit: AuditLogger,
}

impl Storage {
    /// Create a new Storage instance, creating directories as needed
    pub fn new(paths: DriverbookPaths) -> Result<Self, DriverbookError> {
        paths.ensure_directories()?;

        Ok(Self {
            transactions: TransactionRepository::new(paths.transactions_file()),
            bills: BillRepository::new(paths.bills_file()),
            audit: AuditLogger::new(paths.audit_log()),
            paths,
        })
    }

    pub fn paths(&self) -> &DriverbookPaths {
        &self.paths
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> Result<(), DriverbookError> {
        self.transactions.load()?;
        self.bills.load()?;
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), DriverbookError> {
        self.transactions.save()?;
        self.bills.save()?;
        Ok(())
    }

    /// Current contents of both collections, as handed to the calculators
    pub fn snapshot(&self) -> DriverbookResult<(Vec<Transaction>, Vec<Bill>)> {
        Ok((self.transactions.get_all()?, self.bills.get_all()?))
    }

    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }

    /// Record a newly created record in the audit log
    pub fn log_create<T: Audited>(&self, created: &T) -> DriverbookResult<()> {
        self.audit.log(&AuditEntry::created(created))
    }

    /// Record an edit with the fields that changed
    pub fn log_update<T: Audited>(&self, before: &T, after: &T) -> DriverbookResult<()> {
        self.audit.log(&AuditEntry::updated(before, after))
    }

    /// Record a removed record in the audit log
    pub fn log_delete<T: Audited>(&self, deleted: &T) -> DriverbookResult<()> {
        self.audit.log(&AuditEntry::deleted(deleted))
    }
}

pub(crate) fn read_lock<T>(lock: &RwLock<T>) -> DriverbookResult<RwLockReadGuard<'_, T>> {
    lock.read()
        .map_err(|e| DriverbookError::Storage(format!("Failed to acquire read lock: {}", e)))
}

pub(crate) fn write_lock<T>(lock: &RwLock<T>) -> DriverbookResult<RwLockWriteGuard<'_, T>> {
    lock.write()
        .map_err(|e| DriverbookError::Storage(format!("Failed to acquire write lock: {}", e)))
}
