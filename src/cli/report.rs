//! CLI commands for the daily goal, dashboard and period reports

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use clap::Args;

use crate::config::settings::Settings;
use crate::display::format_daily_goal;
use crate::error::{DriverbookError, DriverbookResult};
use crate::reports::ReportRange;
use crate::services::GoalService;

use super::range::RangeArgs;

/// Options for `goal`
#[derive(Args, Debug, Default)]
pub struct GoalArgs {
    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Options for `report`
#[derive(Args, Debug)]
pub struct ReportArgs {
    #[command(flatten)]
    pub range: RangeArgs,

    /// Export to CSV file
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Handle `goal`
pub fn handle_goal_command(
    service: &GoalService,
    settings: &Settings,
    args: GoalArgs,
) -> DriverbookResult<()> {
    let goal = service.daily_goal()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&goal)?);
    } else {
        print!(
            "{}",
            format_daily_goal(
                &goal,
                service.today(),
                service.work_days(),
                &settings.currency_symbol
            )
        );
    }

    Ok(())
}

/// Handle `dashboard`
pub fn handle_dashboard_command(service: &GoalService, settings: &Settings) -> DriverbookResult<()> {
    let stats = service.dashboard()?;
    print!("{}", stats.format_terminal(&settings.currency_symbol));
    Ok(())
}

/// Handle `report`
pub fn handle_report_command(
    service: &GoalService,
    settings: &Settings,
    args: ReportArgs,
) -> DriverbookResult<()> {
    let range = args.range.to_range(ReportRange::Month)?;
    let report = service.period_report(range)?;

    if let Some(path) = args.output {
        let file = File::create(&path).map_err(|e| {
            DriverbookError::Export(format!("Failed to create file {}: {}", path.display(), e))
        })?;
        report.export_csv(BufWriter::new(file))?;
        println!("Report exported to: {}", path.display());
    } else {
        print!("{}", report.format_terminal(&settings.currency_symbol));
    }

    Ok(())
}
