//! Append-only JSONL audit log

use std::fs::{File, OpenOptions};
use std::io::{BufReader, Write};
use std::path::PathBuf;

use crate::error::{DriverbookError, DriverbookResult};

use super::entry::AuditEntry;

pub struct AuditLogger {
    log_path: PathBuf,
}

impl AuditLogger {
    pub fn new(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    /// Append one entry as a single JSON line
    pub fn log(&self, entry: &AuditEntry) -> DriverbookResult<()> {
        let mut line = serde_json::to_string(entry)?;
        line.push('\n');

        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .and_then(|mut file| file.write_all(line.as_bytes()))
            .map_err(|e| DriverbookError::Io(format!("Failed to append to audit log: {}", e)))?;

        tracing::trace!(entity = %entry.entity, reference = %entry.reference, "audit entry written");
        Ok(())
    }

    /// The last `count` entries, oldest first
    pub fn read_recent(&self, count: usize) -> DriverbookResult<Vec<AuditEntry>> {
        let file = match File::open(&self.log_path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(DriverbookError::Io(format!("Failed to open audit log: {}", e))),
        };

        let mut entries = Vec::new();
        let stream = serde_json::Deserializer::from_reader(BufReader::new(file)).into_iter::<AuditEntry>();
        for entry in stream {
            let entry = entry.map_err(|e| {
                DriverbookError::Json(format!("Corrupt audit log at line {}: {}", e.line(), e))
            })?;
            entries.push(entry);
        }

        let start = entries.len().saturating_sub(count);
        Ok(entries.split_off(start))
    }
}
