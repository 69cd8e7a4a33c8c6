//! Game calendar: fixed-length weeks grouped into fixed-length seasons.
//!
//! One known date pins the cycle. That date is the last day of
//! `(anchor_season, anchor_week)`; every other date is an offset in days from
//! it, folded into the cycle with Euclidean division so earlier dates work too.

use std::fmt;

use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalendarError {
    #[error("days_per_week and weeks_per_season must both be at least 1")]
    EmptyCycle,
    #[error("anchor_week {week} is outside 1..={weeks_per_season}")]
    AnchorWeekOutOfRange { week: u32, weeks_per_season: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarCoordinate {
    pub season: i64,
    /// 1-based week within the season.
    pub week: u32,
    /// 0-based day within the week.
    pub day: u32,
}

impl fmt::Display for CalendarCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "season {} week {} (day {})", self.season, self.week, self.day + 1)
    }
}

/// Raw calendar settings as they appear in configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CalendarSettings {
    pub anchor_date: NaiveDate,
    pub anchor_season: i64,
    pub anchor_week: u32,
    pub days_per_week: u32,
    pub weeks_per_season: u32,
}

impl Default for CalendarSettings {
    fn default() -> Self {
        CalendarSettings {
            anchor_date: NaiveDate::from_ymd_opt(2025, 1, 5).unwrap_or_default(),
            anchor_season: 89,
            anchor_week: 9,
            days_per_week: 7,
            weeks_per_season: 16,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "CalendarSettings")]
pub struct Calendar {
    anchor_date: NaiveDate,
    anchor_season: i64,
    anchor_week: u32,
    days_per_week: u32,
    weeks_per_season: u32,
}

impl TryFrom<CalendarSettings> for Calendar {
    type Error = CalendarError;

    fn try_from(s: CalendarSettings) -> Result<Self, Self::Error> {
        if s.days_per_week == 0 || s.weeks_per_season == 0 {
            return Err(CalendarError::EmptyCycle);
        }
        if s.anchor_week == 0 || s.anchor_week > s.weeks_per_season {
            return Err(CalendarError::AnchorWeekOutOfRange {
                week: s.anchor_week,
                weeks_per_season: s.weeks_per_season,
            });
        }
        Ok(Calendar {
            anchor_date: s.anchor_date,
            anchor_season: s.anchor_season,
            anchor_week: s.anchor_week,
            days_per_week: s.days_per_week,
            weeks_per_season: s.weeks_per_season,
        })
    }
}

impl Default for Calendar {
    fn default() -> Self {
        let s = CalendarSettings::default();
        Calendar {
            anchor_date: s.anchor_date,
            anchor_season: s.anchor_season,
            anchor_week: s.anchor_week,
            days_per_week: s.days_per_week,
            weeks_per_season: s.weeks_per_season,
        }
    }
}

impl Calendar {
    pub fn coordinate(&self, date: NaiveDate) -> CalendarCoordinate {
        let days_per_week = i64::from(self.days_per_week);
        let days_per_season = days_per_week * i64::from(self.weeks_per_season);

        let offset = (date - self.anchor_date).num_days();
        // 1-based position of the anchor inside its season: its week's last day.
        let position = i64::from(self.anchor_week) * days_per_week + offset;
        let zero_based = position - 1;

        let in_season = zero_based.rem_euclid(days_per_season);
        CalendarCoordinate {
            season: self.anchor_season + zero_based.div_euclid(days_per_season),
            week: (in_season / days_per_week) as u32 + 1,
            day: (in_season % days_per_week) as u32,
        }
    }

    /// Whole weeks from `(season, week)` to `to`; negative when `to` is earlier.
    pub fn weeks_between(&self, season: i64, week: u32, to: CalendarCoordinate) -> i64 {
        let per_season = i64::from(self.weeks_per_season);
        (to.season - season) * per_season + i64::from(to.week) - i64::from(week)
    }
}
