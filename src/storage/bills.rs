//! Bill repository for JSON storage
//!
//! Manages loading and saving bills to bills.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::DriverbookError;
use crate::models::{Bill, BillId};

use super::file_io::{read_json, write_json_atomic};
use super::{read_lock, write_lock};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct BillData {
    bills: Vec<Bill>,
}

/// Repository for bills
pub struct BillRepository {
    path: PathBuf,
    data: RwLock<HashMap<BillId, Bill>>,
}

impl BillRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    pub fn load(&self) -> Result<(), DriverbookError> {
        let file_data: BillData = read_json(&self.path)?;

        let mut data = write_lock(&self.data)?;
        data.clear();
        for bill in file_data.bills {
            data.insert(bill.id, bill);
        }

        tracing::debug!(count = data.len(), path = %self.path.display(), "loaded bills");
        Ok(())
    }

    pub fn save(&self) -> Result<(), DriverbookError> {
        let bills = self.get_all()?;
        write_json_atomic(&self.path, &BillData { bills })
    }

    pub fn get(&self, id: BillId) -> Result<Option<Bill>, DriverbookError> {
        Ok(read_lock(&self.data)?.get(&id).cloned())
    }

    /// All bills, earliest due date first
    pub fn get_all(&self) -> Result<Vec<Bill>, DriverbookError> {
        let data = read_lock(&self.data)?;
        let mut bills: Vec<_> = data.values().cloned().collect();
        bills.sort_by(|a, b| {
            a.due_date
                .cmp(&b.due_date)
                .then(a.created_at.cmp(&b.created_at))
        });
        Ok(bills)
    }

    pub fn get_unpaid(&self) -> Result<Vec<Bill>, DriverbookError> {
        Ok(self.get_all()?.into_iter().filter(|b| !b.is_paid).collect())
    }

    /// Bills whose ID matches a full or short reference, or whose
    /// description matches case-insensitively
    pub fn find_by_reference(&self, reference: &str) -> Result<Vec<Bill>, DriverbookError> {
        let data = read_lock(&self.data)?;
        let reference = reference.trim();
        Ok(data
            .values()
            .filter(|b| {
                b.id.matches_reference(reference) || b.description.eq_ignore_ascii_case(reference)
            })
            .cloned()
            .collect())
    }

    pub fn upsert(&self, bill: Bill) -> Result<(), DriverbookError> {
        write_lock(&self.data)?.insert(bill.id, bill);
        Ok(())
    }

    pub fn delete(&self, id: BillId) -> Result<Option<Bill>, DriverbookError> {
        Ok(write_lock(&self.data)?.remove(&id))
    }

    pub fn count(&self) -> Result<usize, DriverbookError> {
        Ok(read_lock(&self.data)?.len())
    }
}
