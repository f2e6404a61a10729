//! Shared date-range arguments for listings and reports

use clap::{Args, ValueEnum};

use crate::error::{DriverbookError, DriverbookResult};
use crate::models::parse_date;
use crate::reports::ReportRange;

/// Named ranges accepted by `--range`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RangeArg {
    Today,
    Week,
    Month,
    All,
}

/// `--range` or an explicit `--from`/`--to` pair
#[derive(Args, Debug, Clone)]
pub struct RangeArgs {
    /// Named date range
    #[arg(short, long, value_enum, conflicts_with_all = ["from", "to"])]
    pub range: Option<RangeArg>,

    /// Start date (YYYY-MM-DD), inclusive
    #[arg(long, requires = "to")]
    pub from: Option<String>,

    /// End date (YYYY-MM-DD), inclusive
    #[arg(long, requires = "from")]
    pub to: Option<String>,
}

impl RangeArgs {
    /// Resolve to a report range, falling back to `default` when no
    /// option was given
    pub fn to_range(&self, default: ReportRange) -> DriverbookResult<ReportRange> {
        if let (Some(from), Some(to)) = (&self.from, &self.to) {
            let start = parse_date(from)?;
            let end = parse_date(to)?;
            if end < start {
                return Err(DriverbookError::Validation(format!(
                    "End date {} is before start date {}",
                    end, start
                )));
            }
            return Ok(ReportRange::Custom { start, end });
        }

        Ok(match self.range {
            Some(RangeArg::Today) => ReportRange::Today,
            Some(RangeArg::Week) => ReportRange::Week,
            Some(RangeArg::Month) => ReportRange::Month,
            Some(RangeArg::All) => ReportRange::All,
            None => default,
        })
    }
}
