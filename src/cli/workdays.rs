//! Working-day schedule CLI commands

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::error::DriverbookResult;
use crate::models::WorkDaySet;
use crate::services::SettingsService;
use crate::storage::Storage;

/// Work-day subcommands
#[derive(Subcommand)]
pub enum WorkdaysCommands {
    /// Show the days of the week you drive
    Show,
    /// Replace the working-day schedule
    Set {
        /// Comma-separated days: indices 0=Sun..6=Sat or names
        /// (e.g., "1,2,3,4,5" or "mon,tue,wed"). Use "none" to clear.
        days: String,
    },
}

/// Handle a work-day command
pub fn handle_workdays_command(
    storage: &Storage,
    settings: &mut Settings,
    cmd: WorkdaysCommands,
) -> DriverbookResult<()> {
    match cmd {
        WorkdaysCommands::Show => {
            println!("Working days: {}", settings.work_days);
        }

        WorkdaysCommands::Set { days } => {
            let work_days = if days.trim().eq_ignore_ascii_case("none") {
                WorkDaySet::empty()
            } else {
                WorkDaySet::parse(&days)?
            };

            SettingsService::new(storage).set_work_days(settings, work_days)?;
            println!("Working days set to: {}", settings.work_days);
            if work_days.is_empty() {
                println!("With no working days, every bill counts as due in one day.");
            }
        }
    }

    Ok(())
}
