//! Series building: date-keyed map to a date-ordered series.

use crate::error::Result;
use crate::types::{parse_date, ContributionDay, ContributionMap, ContributionSeries};

/// Convert every map entry to a [`ContributionDay`] and order by date.
///
/// Map keys are unique, so after parsing no two days share a date and the
/// sort is a total order: the same map always yields the same series,
/// whatever order the map iterates in.
pub fn build_series(map: &ContributionMap) -> Result<ContributionSeries> {
    let mut days = map
        .iter()
        .map(|(date, &count)| Ok(ContributionDay::new(parse_date(date)?, count)))
        .collect::<Result<Vec<_>>>()?;

    days.sort_by_key(|day| day.date);

    Ok(ContributionSeries::from_sorted_unchecked(days))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn map(entries: &[(&str, u32)]) -> ContributionMap {
        entries.iter().map(|(d, c)| (d.to_string(), *c)).collect()
    }

    #[test]
    fn test_orders_by_date() {
        let series = build_series(&map(&[
            ("2024-03-01", 1),
            ("2023-12-31", 5),
            ("2024-01-15", 0),
        ]))
        .unwrap();

        let dates: Vec<String> = series.iter().map(|d| d.date.to_string()).collect();
        assert_eq!(dates, vec!["2023-12-31", "2024-01-15", "2024-03-01"]);
        assert_eq!(series.counts().collect::<Vec<_>>(), vec![5, 0, 1]);
    }

    #[test]
    fn test_is_deterministic() {
        let m = map(&[
            ("2024-05-02", 2),
            ("2024-05-01", 1),
            ("2024-05-04", 4),
            ("2024-05-03", 3),
        ]);
        let first = build_series(&m).unwrap();
        let second = build_series(&m).unwrap();
        assert_eq!(first, second);

        // Rebuilding from the series' own entries gives the same series
        let roundtrip: ContributionMap = first
            .iter()
            .map(|d| (d.date.to_string(), d.count))
            .collect();
        assert_eq!(build_series(&roundtrip).unwrap(), first);
    }

    #[test]
    fn test_empty_map_gives_empty_series() {
        assert!(build_series(&ContributionMap::new()).unwrap().is_empty());
    }

    #[test]
    fn test_rejects_unparsable_key() {
        assert!(matches!(
            build_series(&map(&[("yesterday", 1)])),
            Err(Error::MalformedFeed(_))
        ));
    }
}
