//! Service layer for Driverbook
//!
//! The service layer provides business logic on top of the storage layer,
//! handling validation, audit logging, and wiring stored data into the
//! report calculators.

pub mod bill;
pub mod goal;
pub mod settings;
pub mod transaction;

pub use bill::{BillService, CreateBillInput, UpdateBillInput};
pub use goal::GoalService;
pub use settings::SettingsService;
pub use transaction::{CreateTransactionInput, TransactionService, SHIFT_SUFFIX};
