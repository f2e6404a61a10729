//! Transaction repository for JSON storage
//!
//! Manages loading and saving the transaction log to transactions.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::DriverbookError;
use crate::models::{Transaction, TransactionId};

use super::file_io::{read_json, write_json_atomic};
use super::{read_lock, write_lock};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct TransactionData {
    transactions: Vec<Transaction>,
}

/// Repository for the transaction log
pub struct TransactionRepository {
    path: PathBuf,
    data: RwLock<HashMap<TransactionId, Transaction>>,
}

impl TransactionRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load transactions from disk, replacing anything in memory
    pub fn load(&self) -> Result<(), DriverbookError> {
        let file_data: TransactionData = read_json(&self.path)?;

        let mut data = write_lock(&self.data)?;
        data.clear();
        for txn in file_data.transactions {
            data.insert(txn.id, txn);
        }

        tracing::debug!(count = data.len(), path = %self.path.display(), "loaded transactions");
        Ok(())
    }

    /// Save transactions to disk, newest first
    pub fn save(&self) -> Result<(), DriverbookError> {
        let transactions = self.get_all()?;
        write_json_atomic(&self.path, &TransactionData { transactions })
    }

    pub fn get(&self, id: TransactionId) -> Result<Option<Transaction>, DriverbookError> {
        Ok(read_lock(&self.data)?.get(&id).cloned())
    }

    /// All transactions, newest first
    pub fn get_all(&self) -> Result<Vec<Transaction>, DriverbookError> {
        let data = read_lock(&self.data)?;
        let mut transactions: Vec<_> = data.values().cloned().collect();
        transactions.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));
        Ok(transactions)
    }

    /// Find a transaction by full or short ID
    pub fn find_by_reference(&self, reference: &str) -> Result<Vec<Transaction>, DriverbookError> {
        let data = read_lock(&self.data)?;
        Ok(data
            .values()
            .filter(|t| t.id.matches_reference(reference))
            .cloned()
            .collect())
    }

    /// Insert or replace a transaction
    pub fn upsert(&self, txn: Transaction) -> Result<(), DriverbookError> {
        write_lock(&self.data)?.insert(txn.id, txn);
        Ok(())
    }

    /// Delete a transaction, returning it if it existed
    pub fn delete(&self, id: TransactionId) -> Result<Option<Transaction>, DriverbookError> {
        Ok(write_lock(&self.data)?.remove(&id))
    }

    pub fn count(&self) -> Result<usize, DriverbookError> {
        Ok(read_lock(&self.data)?.len())
    }
}
