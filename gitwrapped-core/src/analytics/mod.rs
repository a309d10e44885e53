//! Analytics module for gitwrapped
//!
//! Every value here is a pure function of a [`ContributionSeries`](crate::ContributionSeries):
//! - Summary statistics (total, mean, median, extrema, active/zero days)
//! - Cumulative growth series
//! - Density columns for the glyph calendar graph
//! - Streaks (year in review)
//!
//! Nothing is cached or stored. When the series changes, recompute.

pub mod cumulative;
pub mod density;
pub mod stats;
pub mod streaks;

pub use cumulative::cumulative;
pub use density::{
    density_columns, render_graph, DensityColumn, DEFAULT_GLYPH, DEFAULT_MAX_UNITS_PER_DAY,
};
pub use stats::Statistics;
pub use streaks::StreakStats;
