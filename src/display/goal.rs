//! Daily goal display formatting

use chrono::NaiveDate;

use crate::models::WorkDaySet;
use crate::reports::DailyGoal;

/// Format the daily goal with its explanation
pub fn format_daily_goal(
    goal: &DailyGoal,
    today: NaiveDate,
    work_days: WorkDaySet,
    symbol: &str,
) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "Daily goal for {}: {}\n",
        today.format("%Y-%m-%d"),
        goal.daily_goal.format_with_symbol(symbol)
    ));
    output.push_str(&goal.explanation);
    output.push('\n');

    if let (Some(needed), Some(days)) = (goal.amount_needed, goal.working_days) {
        if needed.cents() % i64::from(days) != 0 {
            output.push_str(&format!(
                "Rounded up from {} over {} working days.\n",
                needed.format_with_symbol(symbol),
                days
            ));
        }
    }

    if !work_days.is_work_day(today) && goal.daily_goal.is_positive() {
        output.push_str("Today is not one of your working days.\n");
    }

    output
}
