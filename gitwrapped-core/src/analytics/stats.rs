//! Summary statistics over a contribution series.
//!
//! Each scalar is its own function so presentation can ask for one value
//! without building the whole record. Mean and median are rounded to two
//! decimal places here and nowhere else.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::types::{ContributionSeries, Fixed2};

/// Aggregate metrics for one series.
///
/// Built all-or-nothing: an empty series yields
/// [`Error::DivisionByEmptySeries`], never a partially filled record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub total: u64,
    pub mean: Fixed2,
    pub median: Fixed2,
    pub max: u32,
    pub min: u32,
    pub active_days: usize,
    pub zero_days: usize,
}

impl Statistics {
    /// Compute statistics with the total derived from the series itself.
    pub fn compute(series: &ContributionSeries) -> Result<Self> {
        Self::with_total(series, total(series))
    }

    /// Compute statistics with an authoritative total, usually the feed header.
    ///
    /// The header stays the ground truth even if the series was filtered for
    /// display, so `mean` is `total / days` rather than a re-summation.
    pub fn with_total(series: &ContributionSeries, total: u64) -> Result<Self> {
        Ok(Self {
            total,
            mean: mean_of_total(total, series.len())?,
            median: median(series)?,
            max: max(series)?,
            min: min(series)?,
            active_days: active_days(series),
            zero_days: zero_days(series),
        })
    }

    /// Number of days the statistics cover.
    pub fn days(&self) -> usize {
        self.active_days + self.zero_days
    }
}

/// Sum of all counts.
pub fn total(series: &ContributionSeries) -> u64 {
    series.counts().map(u64::from).sum()
}

/// Sum of counts divided by the number of days.
pub fn mean(series: &ContributionSeries) -> Result<Fixed2> {
    mean_of_total(total(series), series.len())
}

/// `total / days`, rounded to two places.
///
/// A total too large to express in hundredths is [`Error::MalformedFeed`].
pub fn mean_of_total(total: u64, days: usize) -> Result<Fixed2> {
    if days == 0 {
        return Err(Error::DivisionByEmptySeries);
    }
    Fixed2::from_ratio(total, days as u64).ok_or_else(|| {
        Error::MalformedFeed(format!("total {total} out of range over {days} days"))
    })
}

/// Middle count, or the average of the two middle counts for even lengths.
pub fn median(series: &ContributionSeries) -> Result<Fixed2> {
    let mut counts: Vec<u64> = series.counts().map(u64::from).collect();
    if counts.is_empty() {
        return Err(Error::DivisionByEmptySeries);
    }
    counts.sort_unstable();

    let mid = counts.len() / 2;
    if counts.len() % 2 == 1 {
        Ok(Fixed2::from_integer(counts[mid]))
    } else {
        // (a + b) / 2 in hundredths is exactly (a + b) * 50
        Ok(Fixed2::from_hundredths((counts[mid - 1] + counts[mid]) * 50))
    }
}

pub fn max(series: &ContributionSeries) -> Result<u32> {
    series.counts().max().ok_or(Error::DivisionByEmptySeries)
}

pub fn min(series: &ContributionSeries) -> Result<u32> {
    series.counts().min().ok_or(Error::DivisionByEmptySeries)
}

/// Days with at least one contribution.
pub fn active_days(series: &ContributionSeries) -> usize {
    series.iter().filter(|d| d.count > 0).count()
}

/// Days reported with exactly zero contributions.
pub fn zero_days(series: &ContributionSeries) -> usize {
    series.iter().filter(|d| d.count == 0).count()
}
