//! Configuration module for Driverbook
//!
//! - XDG-compliant path resolution
//! - User settings persistence (work schedule, currency symbol, categories)

pub mod paths;
pub mod settings;

pub use paths::DriverbookPaths;
pub use settings::Settings;
