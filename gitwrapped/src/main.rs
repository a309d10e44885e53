//! gitwrapped - GitHub Contributions Year in Review CLI
//!
//! Summarize a year of GitHub contributions: totals, averages, streaks,
//! a running total, and a glyph density graph.

mod report;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Datelike, Local};
use clap::Parser;
use gitwrapped_core::config::RenderConfig;
use gitwrapped_core::github::calendar_from_document;
use gitwrapped_core::ingest::normalize_calendar;
use gitwrapped_core::{Config, Dashboard, DashboardRequest, DashboardService, GitHubClient};

#[derive(Parser, Debug)]
#[command(name = "gitwrapped")]
#[command(about = "GitHub Wrapped - Your Contributions Year in Review")]
#[command(version)]
struct Args {
    /// GitHub username
    username: String,

    /// Year to summarize (default: current year)
    #[arg(long)]
    year: Option<i32>,

    /// Read a saved contribution calendar (bare or GraphQL response) instead of calling GitHub
    #[arg(long)]
    feed: Option<PathBuf>,

    /// Export format (md = markdown, json = JSON)
    #[arg(long)]
    export: Option<String>,

    /// Glyph ceiling per day in the density graph
    #[arg(long)]
    max_units: Option<u32>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = Config::load().context("failed to load configuration")?;
    let _log_guard = gitwrapped_core::logging::init(&config.logging).ok();

    let year = args.year.unwrap_or_else(|| Local::now().year());
    let mut render = config.render;
    if let Some(max_units) = args.max_units {
        render.max_units_per_day = max_units;
    }

    let request = DashboardRequest::new(args.username.as_str(), year);

    let dashboard = match &args.feed {
        Some(path) => dashboard_from_feed(&request, path, &render)?,
        None => {
            let client =
                GitHubClient::new(&config.github).context("failed to create GitHub client")?;
            DashboardService::new(client, render)
                .handle(&request)
                .context("failed to build contribution dashboard")?
        }
    };

    let mut out = std::io::stdout().lock();
    match args.export.as_deref() {
        Some("json") => report::write_json(&mut out, &dashboard)?,
        Some("md") => report::write_markdown(&mut out, &dashboard)?,
        Some(other) => anyhow::bail!("Unknown export format: {}. Use 'md' or 'json'", other),
        None => report::write_terminal(&mut out, &dashboard, render.glyph)?,
    }

    Ok(())
}

/// Build a dashboard from a calendar saved on disk.
fn dashboard_from_feed(
    request: &DashboardRequest,
    path: &Path,
    render: &RenderConfig,
) -> Result<Dashboard> {
    let username = request.validated_username()?;

    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read feed {}", path.display()))?;
    let calendar = calendar_from_document(&raw).context("failed to parse feed")?;
    let summary = normalize_calendar(&calendar).context("failed to normalize feed")?;

    tracing::info!(path = %path.display(), username, "Loaded saved contribution feed");

    Dashboard::build(username, request.year, None, summary, render)
        .context("failed to build contribution dashboard")
}
