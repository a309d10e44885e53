//! Dashboard assembly: one request in, one fully derived dashboard out.
//!
//! There is no process-wide state. The username, year, and any failure
//! travel in plain values through [`DashboardService::handle`].

use std::sync::Mutex;

use chrono::NaiveDate;
use serde::Serialize;

use crate::analytics::{cumulative, density_columns, DensityColumn, Statistics, StreakStats};
use crate::config::RenderConfig;
use crate::error::{Error, Result};
use crate::github::ContributionSource;
use crate::ingest::{build_series, normalize_calendar};
use crate::types::{ContributionSeries, ContributionSummary, CumulativeSeries, UserProfile};

/// A single user query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardRequest {
    pub username: String,
    pub year: i32,
}

impl DashboardRequest {
    pub fn new(username: impl Into<String>, year: i32) -> Self {
        Self {
            username: username.into(),
            year,
        }
    }

    /// Trimmed username, or [`Error::InvalidRequest`] when blank.
    pub fn validated_username(&self) -> Result<&str> {
        let username = self.username.trim();
        if username.is_empty() {
            return Err(Error::InvalidRequest(
                "Please enter a GitHub username".to_string(),
            ));
        }
        Ok(username)
    }
}

/// Everything presentation needs for one user and year.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub username: String,
    pub year: i32,
    pub profile: Option<UserProfile>,
    /// Pipeline output shape (header total + date map)
    pub summary: ContributionSummary,
    pub series: ContributionSeries,
    /// `None` when the feed reported no days at all
    pub statistics: Option<Statistics>,
    pub cumulative: CumulativeSeries,
    pub density: Vec<DensityColumn>,
    pub streaks: StreakStats,
    /// Dates inside the reported range that the feed never mentioned
    pub missing_days: Vec<NaiveDate>,
    /// `header - per-day sum` when the feed disagrees with itself
    pub header_drift: Option<i64>,
}

impl Dashboard {
    /// Derive every dashboard value from a normalized summary.
    ///
    /// The feed header stays the authoritative total. An empty series is not
    /// an error here: statistics become `None` and presentation shows "no
    /// data". Every other failure propagates.
    pub fn build(
        username: impl Into<String>,
        year: i32,
        profile: Option<UserProfile>,
        summary: ContributionSummary,
        render: &RenderConfig,
    ) -> Result<Self> {
        let series = build_series(&summary.contribution_map)?;

        let statistics = match Statistics::with_total(&series, summary.total_contributions) {
            Ok(stats) => Some(stats),
            Err(Error::DivisionByEmptySeries) => None,
            Err(e) => return Err(e),
        };

        let dashboard = Self {
            username: username.into(),
            year,
            profile,
            cumulative: cumulative(&series),
            density: density_columns(&series, render.max_units_per_day)?,
            streaks: StreakStats::from_series(&series),
            missing_days: series.missing_dates(),
            header_drift: summary.header_drift(),
            statistics,
            series,
            summary,
        };

        tracing::info!(
            username = %dashboard.username,
            year,
            days = dashboard.series.len(),
            total = dashboard.summary.total_contributions,
            "Built contribution dashboard"
        );

        Ok(dashboard)
    }

    pub fn has_data(&self) -> bool {
        self.statistics.is_some()
    }

    /// Final running total, or zero for an empty series.
    pub fn cumulative_total(&self) -> u64 {
        self.cumulative
            .last()
            .map(|p| p.cumulative_count)
            .unwrap_or(0)
    }
}

/// Runs dashboard requests against a [`ContributionSource`].
///
/// Requests are handled one at a time: a second caller waits until the
/// request in flight has finished, so fetches never interleave.
pub struct DashboardService<S> {
    source: S,
    render: RenderConfig,
    in_flight: Mutex<()>,
}

impl<S: ContributionSource> DashboardService<S> {
    pub fn new(source: S, render: RenderConfig) -> Self {
        Self {
            source,
            render,
            in_flight: Mutex::new(()),
        }
    }

    /// Fetch, normalize, and derive the dashboard for one request.
    pub fn handle(&self, request: &DashboardRequest) -> Result<Dashboard> {
        let username = request.validated_username()?;

        let _guard = self
            .in_flight
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let profile = self.source.fetch_profile(username)?;
        let calendar = self.source.fetch_calendar(username, request.year)?;
        let summary = normalize_calendar(&calendar)?;

        Dashboard::build(username, request.year, Some(profile), summary, &self.render)
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}
