//! Cumulative growth series.

use crate::types::{ContributionSeries, CumulativePoint, CumulativeSeries};

/// Running sum of counts, one point per series day, in series order.
///
/// The last point always equals the series total.
pub fn cumulative(series: &ContributionSeries) -> CumulativeSeries {
    let mut running = 0u64;
    series
        .iter()
        .map(|day| {
            running += u64::from(day.count);
            CumulativePoint {
                date: day.date,
                cumulative_count: running,
            }
        })
        .collect()
}
