//! Streak statistics for the year in review.

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::types::ContributionSeries;

/// Runs of consecutive active calendar days.
///
/// A date missing from the series breaks a run just like a zero day does.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakStats {
    /// Run of active days ending on the last day of the series
    pub current_streak_days: u32,
    /// Longest run in the series
    pub longest_streak_days: u32,
    /// When the longest streak started
    pub longest_streak_start: Option<NaiveDate>,
    /// When the longest streak ended
    pub longest_streak_end: Option<NaiveDate>,
    /// Total days with activity
    pub active_days: usize,
    /// Total days in the series
    pub total_days: usize,
}

impl StreakStats {
    pub fn from_series(series: &ContributionSeries) -> Self {
        let mut stats = StreakStats {
            total_days: series.len(),
            ..Default::default()
        };

        let mut run = 0u32;
        let mut run_start: Option<NaiveDate> = None;
        let mut previous: Option<NaiveDate> = None;

        for day in series {
            let adjacent = previous.is_some_and(|p| p + Duration::days(1) == day.date);
            previous = Some(day.date);

            if day.count == 0 {
                run = 0;
                continue;
            }

            stats.active_days += 1;
            if run == 0 || !adjacent {
                run = 1;
                run_start = Some(day.date);
            } else {
                run += 1;
            }

            if run > stats.longest_streak_days {
                stats.longest_streak_days = run;
                stats.longest_streak_start = run_start;
                stats.longest_streak_end = Some(day.date);
            }
        }

        stats.current_streak_days = run;
        stats
    }

    /// Calculate activity percentage.
    pub fn activity_percentage(&self) -> f64 {
        if self.total_days == 0 {
            0.0
        } else {
            (self.active_days as f64 / self.total_days as f64) * 100.0
        }
    }
}
