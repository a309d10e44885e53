//! Core domain types for gitwrapped
//!
//! These types represent the three layers of the contribution pipeline:
//! the provider feed (Layer 0), the canonical date-keyed map and ordered
//! series (Layer 1), and the derived values handed to presentation (Layer 2).
//!
//! ## Terminology
//!
//! | Term | Definition |
//! |------|------------|
//! | **Contribution** | A single unit of recorded activity attributed to a calendar day |
//! | **Feed** | The raw week-grouped day/count structure returned by the provider |
//! | **Series** | The canonical ordered, deduplicated daily representation |
//! | **Density unit** | One glyph representing one contribution in the calendar graph |
//! | **Drift** | Disagreement between the feed header total and the per-day sum |
//!
//! A date that is missing from the feed is "no data", not "zero contributions".
//! Only days the provider reported (including explicit zero days) enter the series.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

use crate::error::{Error, Result};

/// Date format used for every date key in the pipeline.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse an ISO calendar date (`YYYY-MM-DD`).
pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map_err(|e| Error::MalformedFeed(format!("invalid date {raw:?}: {e}")))
}

// ============================================
// Feed (Layer 0)
// ============================================

/// Contribution calendar as returned by the provider.
///
/// Day fields are optional on the wire so that the normalizer can report
/// exactly which entry is incomplete instead of failing the whole decode.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionCalendar {
    /// Header total reported by the provider
    pub total_contributions: Option<i64>,
    /// Week groups in provider order
    pub weeks: Vec<ContributionWeek>,
}

/// One week group of the calendar.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionWeek {
    pub contribution_days: Vec<FeedDay>,
}

/// One day entry of a week group.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedDay {
    pub contribution_count: Option<i64>,
    pub date: Option<String>,
}

impl ContributionCalendar {
    /// Decode a bare calendar document.
    ///
    /// Any decode failure is a [`Error::MalformedFeed`].
    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).map_err(|e| Error::MalformedFeed(e.to_string()))
    }

    /// Number of day entries across all weeks, duplicates included.
    pub fn day_entries(&self) -> usize {
        self.weeks.iter().map(|w| w.contribution_days.len()).sum()
    }
}

// ============================================
// Canonical (Layer 1)
// ============================================

/// Date string to contribution count. Keys are unique; iteration order is
/// meaningless and must not be relied upon.
pub type ContributionMap = HashMap<String, u32>;

/// Pipeline output shape handed to presentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionSummary {
    /// Authoritative total from the feed header
    pub total_contributions: u64,
    /// Flattened day counts
    pub contribution_map: ContributionMap,
}

impl ContributionSummary {
    /// Sum of all per-day counts in the map.
    pub fn map_total(&self) -> u64 {
        self.contribution_map.values().map(|&c| u64::from(c)).sum()
    }

    /// Signed difference `header - per-day sum`, or `None` when they agree.
    ///
    /// A non-zero drift means the provider's header and its own day entries
    /// disagree, which usually signals upstream changes.
    pub fn header_drift(&self) -> Option<i64> {
        let drift = self.total_contributions as i64 - self.map_total() as i64;
        (drift != 0).then_some(drift)
    }
}

/// A single day of activity. Immutable once produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContributionDay {
    pub date: NaiveDate,
    pub count: u32,
}

impl ContributionDay {
    pub fn new(date: NaiveDate, count: u32) -> Self {
        Self { date, count }
    }

    pub fn is_active(&self) -> bool {
        self.count > 0
    }
}

/// Days ordered by strictly increasing date.
///
/// This is the single source of truth for every derived value. The inner
/// vector is private so the ordering invariant cannot be broken after
/// construction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ContributionSeries {
    days: Vec<ContributionDay>,
}

impl ContributionSeries {
    /// Build a series from days that are already in order.
    ///
    /// Fails if any date is not strictly after its predecessor.
    pub fn new(days: Vec<ContributionDay>) -> Result<Self> {
        if let Some(pair) = days.windows(2).find(|pair| pair[0].date >= pair[1].date) {
            return Err(Error::MalformedFeed(format!(
                "series dates must be strictly increasing: {} then {}",
                pair[0].date, pair[1].date
            )));
        }
        Ok(Self { days })
    }

    /// Caller guarantees strictly increasing dates.
    pub(crate) fn from_sorted_unchecked(days: Vec<ContributionDay>) -> Self {
        debug_assert!(days.windows(2).all(|pair| pair[0].date < pair[1].date));
        Self { days }
    }

    pub fn days(&self) -> &[ContributionDay] {
        &self.days
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ContributionDay> {
        self.days.iter()
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn first(&self) -> Option<&ContributionDay> {
        self.days.first()
    }

    pub fn last(&self) -> Option<&ContributionDay> {
        self.days.last()
    }

    /// Counts in series order.
    pub fn counts(&self) -> impl Iterator<Item = u32> + '_ {
        self.days.iter().map(|d| d.count)
    }

    /// Calendar dates between the first and last day that the feed never
    /// reported. These are "no data" days, not zero days.
    pub fn missing_dates(&self) -> Vec<NaiveDate> {
        let mut missing = Vec::new();
        for pair in self.days.windows(2) {
            let mut date = pair[0].date + Duration::days(1);
            while date < pair[1].date {
                missing.push(date);
                date += Duration::days(1);
            }
        }
        missing
    }
}

impl<'a> IntoIterator for &'a ContributionSeries {
    type Item = &'a ContributionDay;
    type IntoIter = std::slice::Iter<'a, ContributionDay>;

    fn into_iter(self) -> Self::IntoIter {
        self.days.iter()
    }
}

// ============================================
// Derived (Layer 2)
// ============================================

/// Non-negative value with exactly two decimal places.
///
/// Stored as whole hundredths so rounding happens once, in integer
/// arithmetic, and every consumer sees the same digits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Fixed2 {
    hundredths: u64,
}

impl Fixed2 {
    pub const ZERO: Fixed2 = Fixed2 { hundredths: 0 };

    pub fn from_hundredths(hundredths: u64) -> Self {
        Self { hundredths }
    }

    pub fn from_integer(value: u64) -> Self {
        Self {
            hundredths: value * 100,
        }
    }

    /// `numerator / denominator` rounded half-up to two places.
    ///
    /// Returns `None` when `denominator` is zero or the result does not fit
    /// in `u64` hundredths.
    pub fn from_ratio(numerator: u64, denominator: u64) -> Option<Self> {
        if denominator == 0 {
            return None;
        }
        let num = u128::from(numerator) * 200 + u128::from(denominator);
        let hundredths = u64::try_from(num / (u128::from(denominator) * 2)).ok()?;
        Some(Self { hundredths })
    }

    pub fn hundredths(&self) -> u64 {
        self.hundredths
    }

    pub fn as_f64(&self) -> f64 {
        self.hundredths as f64 / 100.0
    }
}

impl fmt::Display for Fixed2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&format!("{}.{:02}", self.hundredths / 100, self.hundredths % 100))
    }
}

impl Serialize for Fixed2 {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_f64())
    }
}

/// Running total at a given day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CumulativePoint {
    pub date: NaiveDate,
    pub cumulative_count: u64,
}

/// Prefix sums aligned index-for-index with a [`ContributionSeries`].
pub type CumulativeSeries = Vec<CumulativePoint>;

// ============================================
// Provider profile
// ============================================

/// Public profile of a GitHub user, as returned by `GET /users/{login}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub login: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub avatar_url: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub followers: u64,
    #[serde(default)]
    pub following: u64,
    #[serde(default)]
    pub public_repos: u64,
}

impl UserProfile {
    /// Display name, falling back to the login.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&self.login)
    }
}
