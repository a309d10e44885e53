//! Calendar normalization: flatten week groups into a date-keyed map.

use chrono::NaiveDate;

use crate::error::{Error, Result};
use crate::types::{ContributionCalendar, ContributionMap, ContributionSummary, DATE_FORMAT};

/// Flatten every day entry of every week into a [`ContributionSummary`].
///
/// Entries are applied in feed order, so when the provider repeats a date the
/// later entry overwrites the earlier one. Dates the feed never mentions are
/// left out of the map rather than filled with zero.
///
/// Fails with [`Error::MalformedFeed`] when the header total is missing or
/// negative, or when a day entry is missing its date or count, has a date
/// that is not `YYYY-MM-DD`, or has a negative count.
pub fn normalize_calendar(calendar: &ContributionCalendar) -> Result<ContributionSummary> {
    let total = calendar
        .total_contributions
        .ok_or_else(|| Error::MalformedFeed("missing totalContributions".to_string()))?;
    let total = u64::try_from(total)
        .map_err(|_| Error::MalformedFeed(format!("negative totalContributions: {total}")))?;

    let mut contribution_map = ContributionMap::with_capacity(calendar.day_entries());
    let mut overwritten = 0usize;

    for (week_idx, week) in calendar.weeks.iter().enumerate() {
        for (day_idx, day) in week.contribution_days.iter().enumerate() {
            let at = || format!("week {week_idx}, day {day_idx}");

            let date = day
                .date
                .as_deref()
                .ok_or_else(|| Error::MalformedFeed(format!("missing date at {}", at())))?;
            NaiveDate::parse_from_str(date, DATE_FORMAT).map_err(|e| {
                Error::MalformedFeed(format!("invalid date {date:?} at {}: {e}", at()))
            })?;

            let count = day.contribution_count.ok_or_else(|| {
                Error::MalformedFeed(format!("missing contributionCount for {date}"))
            })?;
            let count = u32::try_from(count).map_err(|_| {
                Error::MalformedFeed(format!("invalid contributionCount {count} for {date}"))
            })?;

            if let Some(previous) = contribution_map.insert(date.to_string(), count) {
                overwritten += 1;
                tracing::warn!(
                    date,
                    previous,
                    count,
                    "duplicate date in feed, later entry wins"
                );
            }
        }
    }

    let summary = ContributionSummary {
        total_contributions: total,
        contribution_map,
    };

    if let Some(drift) = summary.header_drift() {
        tracing::warn!(
            header = summary.total_contributions,
            day_sum = summary.map_total(),
            drift,
            "feed header total disagrees with per-day counts"
        );
    }

    tracing::debug!(
        days = summary.contribution_map.len(),
        overwritten,
        total = summary.total_contributions,
        "Normalized contribution calendar"
    );

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ContributionWeek, FeedDay};

    fn day(date: &str, count: i64) -> FeedDay {
        FeedDay {
            contribution_count: Some(count),
            date: Some(date.to_string()),
        }
    }

    fn calendar(total: i64, weeks: Vec<Vec<FeedDay>>) -> ContributionCalendar {
        ContributionCalendar {
            total_contributions: Some(total),
            weeks: weeks
                .into_iter()
                .map(|contribution_days| ContributionWeek { contribution_days })
                .collect(),
        }
    }

    #[test]
    fn test_flattens_all_weeks() {
        let cal = calendar(
            6,
            vec![
                vec![day("2024-01-06", 1), day("2024-01-07", 2)],
                vec![day("2024-01-08", 3)],
            ],
        );
        let summary = normalize_calendar(&cal).unwrap();
        assert_eq!(summary.total_contributions, 6);
        assert_eq!(summary.contribution_map.len(), 3);
        assert_eq!(summary.contribution_map["2024-01-08"], 3);
        assert_eq!(summary.header_drift(), None);
    }

    #[test]
    fn test_duplicate_date_later_entry_wins() {
        let cal = calendar(
            9,
            vec![
                vec![day("2024-01-01", 4)],
                vec![day("2024-01-01", 9)],
            ],
        );
        let summary = normalize_calendar(&cal).unwrap();
        assert_eq!(summary.contribution_map.len(), 1);
        assert_eq!(summary.contribution_map["2024-01-01"], 9);
    }

    #[test]
    fn test_missing_days_stay_absent() {
        let cal = calendar(3, vec![vec![day("2024-01-01", 1), day("2024-01-03", 2)]]);
        let summary = normalize_calendar(&cal).unwrap();
        assert!(!summary.contribution_map.contains_key("2024-01-02"));
    }

    #[test]
    fn test_rejects_negative_count() {
        let cal = calendar(0, vec![vec![day("2024-01-01", -1)]]);
        let err = normalize_calendar(&cal).unwrap_err();
        assert!(matches!(err, Error::MalformedFeed(_)));
        assert!(err.to_string().contains("2024-01-01"));
    }

    #[test]
    fn test_rejects_missing_date() {
        let cal = calendar(
            1,
            vec![vec![FeedDay {
                contribution_count: Some(1),
                date: None,
            }]],
        );
        let err = normalize_calendar(&cal).unwrap_err();
        assert!(err.to_string().contains("missing date at week 0, day 0"));
    }

    #[test]
    fn test_rejects_bad_date_and_missing_count() {
        let cal = calendar(1, vec![vec![day("01/02/2024", 1)]]);
        assert!(matches!(
            normalize_calendar(&cal),
            Err(Error::MalformedFeed(_))
        ));

        let cal = calendar(
            1,
            vec![vec![FeedDay {
                contribution_count: None,
                date: Some("2024-01-01".to_string()),
            }]],
        );
        assert!(matches!(
            normalize_calendar(&cal),
            Err(Error::MalformedFeed(_))
        ));
    }

    #[test]
    fn test_rejects_bad_header() {
        let mut cal = calendar(-3, vec![]);
        assert!(normalize_calendar(&cal).is_err());

        cal.total_contributions = None;
        assert!(normalize_calendar(&cal).is_err());
    }

    #[test]
    fn test_drift_is_reported_not_fatal() {
        let cal = calendar(10, vec![vec![day("2024-01-01", 4)]]);
        let summary = normalize_calendar(&cal).unwrap();
        assert_eq!(summary.header_drift(), Some(6));
    }
}
