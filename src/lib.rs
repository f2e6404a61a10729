//! Driverbook - earnings, expense and bill tracking for drivers
//!
//! This library provides the core functionality for the Driverbook CLI.
//! Drivers record what they earn and spend, list the bills coming due, and
//! get a daily earnings goal: the smallest amount to earn on each working
//! day so that every upcoming bill can be paid on time.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (transactions, bills, money, work days)
//! - `reports`: Daily goal calculator, dashboard, period reports
//! - `storage`: JSON file storage layer
//! - `services`: Business logic layer
//! - `audit`: Audit logging system
//! - `clock`: Source of "today"
//! - `logging`: Diagnostic tracing setup
//! - `display`: Terminal formatting
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use driverbook::models::{Bill, Money, Transaction, WorkDaySet};
//! use driverbook::reports::compute_daily_goal;
//!
//! let today = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
//! let earned = Transaction::income(Money::from_units(100), "Shift", today);
//! let rent = Bill::new("Rent", Money::from_units(1000), today + chrono::Duration::days(4));
//!
//! let goal = compute_daily_goal(&[earned], &[rent], WorkDaySet::default(), today);
//! assert_eq!(goal.daily_goal, Money::from_units(180));
//! ```

pub mod audit;
pub mod cli;
pub mod clock;
pub mod config;
pub mod display;
pub mod error;
pub mod logging;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::DriverbookError;
