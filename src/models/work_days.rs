//! Weekly work schedule
//!
//! A `WorkDaySet` is the set of weekdays the driver intends to work. Weekday
//! indices follow the 0 = Sunday .. 6 = Saturday convention and are stored
//! on disk as a sorted list of those indices.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{DriverbookError, DriverbookResult};

const WEEKDAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Set of working weekdays, one bit per weekday index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct WorkDaySet(u8);

impl WorkDaySet {
    /// A set with no working days
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Every day of the week
    pub const fn all() -> Self {
        Self(0b0111_1111)
    }

    /// Monday through Friday
    pub const fn weekdays() -> Self {
        Self(0b0011_1110)
    }

    /// Build a set from weekday indices (0 = Sunday .. 6 = Saturday)
    pub fn from_indices<I>(indices: I) -> DriverbookResult<Self>
    where
        I: IntoIterator<Item = u8>,
    {
        let mut set = Self::empty();
        for index in indices {
            if index > 6 {
                return Err(DriverbookError::Validation(format!(
                    "Weekday index must be between 0 (Sunday) and 6 (Saturday), got {}",
                    index
                )));
            }
            set.0 |= 1 << index;
        }
        Ok(set)
    }

    /// Parse a comma-separated list of indices or weekday names
    ///
    /// Accepts `"1,2,3,4,5"`, `"mon,tue,wed"`, `"Monday, Friday"` and mixes.
    pub fn parse(s: &str) -> DriverbookResult<Self> {
        let mut set = Self::empty();
        for token in s.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            match token.parse::<u8>() {
                Ok(index) => set.0 |= Self::from_indices([index])?.0,
                Err(_) => {
                    let weekday = token.parse::<Weekday>().map_err(|_| {
                        DriverbookError::Parse(format!("Unknown weekday: '{}'", token))
                    })?;
                    set.insert(weekday);
                }
            }
        }
        Ok(set)
    }

    pub fn insert(&mut self, weekday: Weekday) {
        self.0 |= Self::bit(weekday);
    }

    pub fn remove(&mut self, weekday: Weekday) {
        self.0 &= !Self::bit(weekday);
    }

    pub fn contains(&self, weekday: Weekday) -> bool {
        self.0 & Self::bit(weekday) != 0
    }

    /// Whether the given calendar date falls on a working day
    pub fn is_work_day(&self, date: NaiveDate) -> bool {
        self.contains(date.weekday())
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Number of working weekdays per week
    pub fn len(&self) -> u32 {
        self.0.count_ones()
    }

    /// Sorted weekday indices in the set
    pub fn indices(&self) -> Vec<u8> {
        (0..7).filter(|i| self.0 & (1 << i) != 0).collect()
    }

    /// Count working days in the inclusive range `[start, end]`
    ///
    /// Returns 0 when `end` is before `start`.
    pub fn count_between(&self, start: NaiveDate, end: NaiveDate) -> u32 {
        if end < start || self.is_empty() {
            return 0;
        }

        let total_days = (end - start).num_days() + 1;
        let full_weeks = total_days / 7;
        let mut count = full_weeks as u32 * self.len();

        let mut day = start + chrono::Duration::days(full_weeks * 7);
        while day <= end {
            if self.is_work_day(day) {
                count += 1;
            }
            day = match day.succ_opt() {
                Some(next) => next,
                None => break,
            };
        }

        count
    }

    fn bit(weekday: Weekday) -> u8 {
        1 << weekday.num_days_from_sunday()
    }
}

impl Default for WorkDaySet {
    /// Monday through Saturday
    fn default() -> Self {
        Self(0b0111_1110)
    }
}

impl TryFrom<Vec<u8>> for WorkDaySet {
    type Error = DriverbookError;

    fn try_from(indices: Vec<u8>) -> Result<Self, Self::Error> {
        Self::from_indices(indices)
    }
}

impl From<WorkDaySet> for Vec<u8> {
    fn from(set: WorkDaySet) -> Self {
        set.indices()
    }
}

impl fmt::Display for WorkDaySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "(none)");
        }
        let names: Vec<&str> = self
            .indices()
            .into_iter()
            .map(|i| WEEKDAY_NAMES[i as usize])
            .collect();
        write!(f, "{}", names.join(", "))
    }
}
