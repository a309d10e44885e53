//! Density columns for the glyph calendar graph.
//!
//! One glyph stands for one contribution. A single very busy day would
//! otherwise cost one glyph per contribution, so each column is capped at
//! `max_units_per_day` and the remainder is reported as overflow.

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::types::ContributionSeries;

/// Default per-day glyph ceiling.
pub const DEFAULT_MAX_UNITS_PER_DAY: u32 = 50;

/// Default glyph for one density unit.
pub const DEFAULT_GLYPH: char = '▓';

/// Render units for one active day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DensityColumn {
    pub date: NaiveDate,
    /// Actual contributions that day
    pub count: u32,
    /// Glyphs to draw, `min(count, cap)`
    pub units: u32,
    /// Contributions beyond the cap, `count - units`
    pub overflow: u32,
}

impl DensityColumn {
    /// Label for capped columns (e.g., "+950 more").
    pub fn overflow_label(&self) -> Option<String> {
        (self.overflow > 0).then(|| format!("+{} more", self.overflow))
    }

    /// Tooltip text in the style of the dashboard ("2024-01-01: 3 contributions").
    pub fn title(&self) -> String {
        format!("{}: {} contributions", self.date, self.count)
    }
}

/// Columns for every day with a positive count, in date order.
///
/// Days with no contributions produce no column at all, not an empty one.
pub fn density_columns(
    series: &ContributionSeries,
    max_units_per_day: u32,
) -> Result<Vec<DensityColumn>> {
    if max_units_per_day == 0 {
        return Err(Error::Config(
            "render.max_units_per_day must be at least 1".to_string(),
        ));
    }

    let columns: Vec<DensityColumn> = series
        .iter()
        .filter(|day| day.count > 0)
        .map(|day| {
            let units = day.count.min(max_units_per_day);
            DensityColumn {
                date: day.date,
                count: day.count,
                units,
                overflow: day.count - units,
            }
        })
        .collect();

    let capped = columns.iter().filter(|c| c.overflow > 0).count();
    if capped > 0 {
        tracing::debug!(capped, max_units_per_day, "Capped density columns");
    }

    Ok(columns)
}

/// Draw columns as text rows, top row first, bars growing from the bottom.
///
/// Each column is one character wide. Returns no rows when there are no
/// columns.
pub fn render_graph(columns: &[DensityColumn], glyph: char) -> Vec<String> {
    let height = columns.iter().map(|c| c.units).max().unwrap_or(0);

    (1..=height)
        .rev()
        .map(|level| {
            let row: String = columns
                .iter()
                .map(|c| if c.units >= level { glyph } else { ' ' })
                .collect();
            row.trim_end().to_string()
        })
        .collect()
}
