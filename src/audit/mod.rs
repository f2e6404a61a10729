//! Audit logging for Driverbook
//!
//! Every create, update and delete of a transaction, bill or the settings
//! is appended to `audit.log` as one JSON line, with before/after snapshots
//! and a short change summary for updates.
//!
//! Bills, transactions and settings implement [`Audited`], so entries are
//! built straight from the records they describe.

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, Audited, Change, EntityType};
pub use logger::AuditLogger;
