//! # gitwrapped-core
//!
//! Core library for gitwrapped - a year-in-review dashboard of GitHub
//! contribution activity.
//!
//! This library provides:
//! - Domain types for contribution days, series, and statistics
//! - The contribution pipeline (normalize, order, aggregate, transform)
//! - A GitHub data source for the contribution calendar
//! - Configuration management
//! - Logging infrastructure
//!
//! ## Architecture
//!
//! Data flows one way through three layers:
//! - **Layer 0 (Feed):** The week-grouped calendar returned by the provider
//! - **Layer 1 (Canonical):** A date-keyed map, then the date-ordered [`ContributionSeries`]
//! - **Layer 2 (Derived):** Statistics, cumulative series, density columns (recomputed, never stored)
//!
//! ## Example
//!
//! ```rust,no_run
//! use gitwrapped_core::{ingest, analytics::Statistics, ContributionCalendar};
//!
//! let raw = std::fs::read_to_string("calendar.json").expect("failed to read feed");
//! let calendar = ContributionCalendar::from_json(&raw).expect("malformed feed");
//! let summary = ingest::normalize_calendar(&calendar).expect("malformed feed");
//! let series = ingest::build_series(&summary.contribution_map).expect("malformed feed");
//! let stats = Statistics::compute(&series).expect("empty series");
//! println!("{} contributions, {} per day", stats.total, stats.mean);
//! ```

// Re-export commonly used items at the crate root
pub use config::Config;
pub use dashboard::{Dashboard, DashboardRequest, DashboardService};
pub use error::{Error, Result};
pub use github::{ContributionSource, GitHubClient};
pub use types::*;

// Public modules
pub mod analytics;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod export;
pub mod github;
pub mod ingest;
pub mod logging;
pub mod types;
