//! Ingestion layer: provider feed to canonical series
//!
//! This module turns the week-grouped calendar (Layer 0) into the
//! date-ordered [`ContributionSeries`](crate::ContributionSeries) (Layer 1).
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────┐     ┌─────────────────────┐     ┌────────────────────┐
//! │ ContributionCalendar │ ──► │ normalize_calendar  │ ──► │ ContributionSummary│
//! │ (weeks → days)       │     │ (flatten, validate) │     │ (total + map)      │
//! └──────────────────────┘     └─────────────────────┘     └─────────┬──────────┘
//!                                                                    │
//!                                                                    ▼
//!                                                         ┌────────────────────┐
//!                                                         │   build_series     │
//!                                                         │ (parse, sort)      │
//!                                                         └────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use gitwrapped_core::ingest::{build_series, normalize_calendar};
//!
//! let summary = normalize_calendar(&calendar)?;
//! let series = build_series(&summary.contribution_map)?;
//! println!("{} days reported", series.len());
//! ```

mod normalize;
mod series;

pub use normalize::normalize_calendar;
pub use series::build_series;
