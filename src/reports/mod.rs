//! Reports module for Driverbook
//!
//! Derived views over the transaction log and bills: the daily earnings
//! goal, the dashboard summary, period reports and the bill schedule.
//! Everything here is computed from plain slices and never touches storage.

pub mod bills;
pub mod daily_goal;
pub mod dashboard;
pub mod period;

pub use bills::{BillSchedule, ScheduledBill};
pub use daily_goal::{compute_daily_goal, net_profit, working_days_until, DailyGoal};
pub use dashboard::DashboardStats;
pub use period::{DailyBreakdown, PeriodReport, ReportRange};
