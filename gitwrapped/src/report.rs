//! Report writers: terminal, Markdown, and JSON.

use std::collections::BTreeMap;
use std::io::Write;

use anyhow::Result;
use gitwrapped_core::analytics::render_graph;
use gitwrapped_core::{Dashboard, UserProfile};

pub fn write_terminal<W: Write>(out: &mut W, dashboard: &Dashboard, glyph: char) -> Result<()> {
    let title = format!("{}'s {} on GitHub", display_name(dashboard), dashboard.year);

    // Header
    writeln!(out)?;
    writeln!(out, "╭{}╮", "─".repeat(60))?;
    writeln!(out, "│{:^60}│", title)?;
    writeln!(out, "╰{}╯", "─".repeat(60))?;
    writeln!(out)?;

    if let Some(profile) = &dashboard.profile {
        write_terminal_profile(out, profile)?;
    }

    let Some(stats) = &dashboard.statistics else {
        writeln!(out, "  No contribution data for this period.")?;
        writeln!(out)?;
        return Ok(());
    };

    writeln!(out, "SUMMARY")?;
    writeln!(
        out,
        "   Total:    {:<12} Active days: {}",
        stats.total, stats.active_days
    )?;
    writeln!(out, "   Mean:     {:<12} Median: {}", stats.mean, stats.median)?;
    writeln!(out, "   Max:      {:<12} Min: {}", stats.max, stats.min)?;
    writeln!(out, "   Zero days: {}", stats.zero_days)?;
    writeln!(out)?;

    // Streaks
    let streaks = &dashboard.streaks;
    writeln!(out, "STREAKS")?;
    writeln!(
        out,
        "   Current:  {} day{}",
        streaks.current_streak_days,
        plural(streaks.current_streak_days)
    )?;
    if streaks.longest_streak_days > 0 {
        let streak_dates = match (streaks.longest_streak_start, streaks.longest_streak_end) {
            (Some(start), Some(end)) => {
                format!(" ({} - {})", start.format("%b %d"), end.format("%b %d"))
            }
            _ => String::new(),
        };
        writeln!(
            out,
            "   Longest:  {} day{}{}",
            streaks.longest_streak_days,
            plural(streaks.longest_streak_days),
            streak_dates
        )?;
    }
    writeln!(
        out,
        "   Active:   {} of {} days ({:.0}%)",
        streaks.active_days,
        streaks.total_days,
        streaks.activity_percentage()
    )?;
    writeln!(out)?;

    // Density graph
    if !dashboard.density.is_empty() {
        writeln!(out, "CONTRIBUTION GRAPH")?;
        for row in render_graph(&dashboard.density, glyph) {
            writeln!(out, "   {}", row)?;
        }
        for column in &dashboard.density {
            if let Some(label) = column.overflow_label() {
                writeln!(out, "   {} {}", column.date, label)?;
            }
        }
        writeln!(out)?;
    }

    // Gaps and header drift, when the feed has them
    if !dashboard.missing_days.is_empty() {
        writeln!(
            out,
            "   Note: {} day{} missing from the feed (no data)",
            dashboard.missing_days.len(),
            plural(dashboard.missing_days.len() as u32)
        )?;
    }
    if let Some(drift) = dashboard.header_drift {
        writeln!(
            out,
            "   Note: reported total differs from the daily sum by {}",
            drift
        )?;
    }

    Ok(())
}

fn write_terminal_profile<W: Write>(out: &mut W, profile: &UserProfile) -> Result<()> {
    writeln!(out, "PROFILE")?;
    writeln!(out, "   {} (@{})", profile.display_name(), profile.login)?;
    if let Some(bio) = profile.bio.as_deref().filter(|b| !b.trim().is_empty()) {
        writeln!(out, "   {}", bio.trim())?;
    }
    writeln!(
        out,
        "   {} followers | {} following | {} repos",
        profile.followers, profile.following, profile.public_repos
    )?;
    writeln!(out)?;
    Ok(())
}

pub fn write_markdown<W: Write>(out: &mut W, dashboard: &Dashboard) -> Result<()> {
    writeln!(
        out,
        "# {}'s {} GitHub Wrapped",
        display_name(dashboard),
        dashboard.year
    )?;
    writeln!(out)?;

    if let Some(profile) = &dashboard.profile {
        writeln!(out, "**{}** (@{})", profile.display_name(), profile.login)?;
        writeln!(out)?;
        if let Some(bio) = profile.bio.as_deref().filter(|b| !b.trim().is_empty()) {
            writeln!(out, "> {}", bio.trim())?;
            writeln!(out)?;
        }
        writeln!(
            out,
            "{} followers | {} following | {} repos",
            profile.followers, profile.following, profile.public_repos
        )?;
        writeln!(out)?;
    }

    let Some(stats) = &dashboard.statistics else {
        writeln!(out, "*No contribution data for this period.*")?;
        return Ok(());
    };

    // Summary table
    writeln!(out, "## Summary")?;
    writeln!(out)?;
    writeln!(out, "| Metric | Value |")?;
    writeln!(out, "|--------|-------|")?;
    writeln!(out, "| Total Contributions | {} |", stats.total)?;
    writeln!(out, "| Mean per Day | {} |", stats.mean)?;
    writeln!(out, "| Median per Day | {} |", stats.median)?;
    writeln!(out, "| Busiest Day | {} |", stats.max)?;
    writeln!(out, "| Quietest Day | {} |", stats.min)?;
    writeln!(out, "| Active Days | {} |", stats.active_days)?;
    writeln!(out, "| Zero Days | {} |", stats.zero_days)?;
    writeln!(out)?;

    // Streaks
    writeln!(out, "## Streaks")?;
    writeln!(out)?;
    writeln!(
        out,
        "- **Current streak:** {} days",
        dashboard.streaks.current_streak_days
    )?;
    writeln!(
        out,
        "- **Longest streak:** {} days",
        dashboard.streaks.longest_streak_days
    )?;
    writeln!(
        out,
        "- **Active days:** {} of {} ({:.0}%)",
        dashboard.streaks.active_days,
        dashboard.streaks.total_days,
        dashboard.streaks.activity_percentage()
    )?;
    writeln!(out)?;

    // Busiest days
    let mut busiest: Vec<_> = dashboard.density.iter().collect();
    busiest.sort_by(|a, b| b.count.cmp(&a.count).then(a.date.cmp(&b.date)));
    if !busiest.is_empty() {
        writeln!(out, "## Busiest Days")?;
        writeln!(out)?;
        for (i, column) in busiest.iter().take(5).enumerate() {
            writeln!(
                out,
                "{}. **{}** - {} contributions",
                i + 1,
                column.date,
                column.count
            )?;
        }
        writeln!(out)?;
    }

    writeln!(out, "---")?;
    writeln!(out, "*Generated by gitwrapped*")?;

    Ok(())
}

pub fn write_json<W: Write>(out: &mut W, dashboard: &Dashboard) -> Result<()> {
    // Keep the date map ordered so output is stable
    let contribution_map: BTreeMap<_, _> = dashboard.summary.contribution_map.iter().collect();

    let json = serde_json::json!({
        "username": dashboard.username,
        "year": dashboard.year,
        "profile": dashboard.profile,
        "summary": {
            "totalContributions": dashboard.summary.total_contributions,
            "contributionMap": contribution_map,
        },
        "statistics": dashboard.statistics,
        "cumulative": dashboard.cumulative,
        "density": dashboard.density,
        "streaks": dashboard.streaks,
        "missingDays": dashboard.missing_days,
        "headerDrift": dashboard.header_drift,
    });

    writeln!(out, "{}", serde_json::to_string_pretty(&json)?)?;
    Ok(())
}

fn display_name(dashboard: &Dashboard) -> &str {
    dashboard
        .profile
        .as_ref()
        .map(|p| p.display_name())
        .unwrap_or(dashboard.username.as_str())
}

fn plural(n: u32) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gitwrapped_core::config::RenderConfig;
    use gitwrapped_core::{ContributionMap, ContributionSummary};

    fn profile() -> UserProfile {
        UserProfile {
            login: "octocat".to_string(),
            name: Some("The Octocat".to_string()),
            avatar_url: "https://avatars.example.com/u/583231".to_string(),
            bio: Some("Mascot of a certain forge".to_string()),
            followers: 1200,
            following: 9,
            public_repos: 8,
        }
    }

    fn dashboard(profile: Option<UserProfile>, days: &[(&str, u32)]) -> Dashboard {
        let contribution_map: ContributionMap =
            days.iter().map(|(d, c)| (d.to_string(), *c)).collect();
        let summary = ContributionSummary {
            total_contributions: days.iter().map(|(_, c)| u64::from(*c)).sum(),
            contribution_map,
        };
        Dashboard::build("octocat", 2024, profile, summary, &RenderConfig::default()).unwrap()
    }

    fn render(write: impl Fn(&mut Vec<u8>) -> Result<()>) -> String {
        let mut buf = Vec::new();
        write(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_terminal_shows_profile() {
        let d = dashboard(Some(profile()), &[("2024-01-01", 2)]);
        let out = render(|w| write_terminal(w, &d, '#'));

        assert!(out.contains("The Octocat's 2024 on GitHub"));
        assert!(out.contains("   The Octocat (@octocat)"));
        assert!(out.contains("   Mascot of a certain forge"));
        assert!(out.contains("   1200 followers | 9 following | 8 repos"));
    }

    #[test]
    fn test_terminal_profile_without_data() {
        let d = dashboard(Some(profile()), &[]);
        let out = render(|w| write_terminal(w, &d, '#'));

        assert!(out.contains("(@octocat)"));
        assert!(out.contains("No contribution data for this period."));
        assert!(!out.contains("SUMMARY"));
    }

    #[test]
    fn test_terminal_without_profile_skips_section() {
        let d = dashboard(None, &[("2024-01-01", 2)]);
        let out = render(|w| write_terminal(w, &d, '#'));

        assert!(!out.contains("PROFILE"));
        assert!(out.contains("octocat's 2024 on GitHub"));
    }

    #[test]
    fn test_markdown_shows_profile() {
        let mut p = profile();
        p.bio = None;
        let d = dashboard(Some(p), &[("2024-01-01", 2), ("2024-01-02", 0)]);
        let out = render(|w| write_markdown(w, &d));

        assert!(out.starts_with("# The Octocat's 2024 GitHub Wrapped"));
        assert!(out.contains("**The Octocat** (@octocat)"));
        assert!(out.contains("1200 followers | 9 following | 8 repos"));
        assert!(!out.contains("> "));
        assert!(out.contains("| Mean per Day | 1.00 |"));
    }

    #[test]
    fn test_json_streaks_are_camel_case() {
        let d = dashboard(Some(profile()), &[("2024-01-01", 2), ("2024-01-02", 1)]);
        let json: serde_json::Value =
            serde_json::from_str(&render(|w| write_json(w, &d))).unwrap();

        assert_eq!(json["streaks"]["currentStreakDays"], 2);
        assert_eq!(json["streaks"]["totalDays"], 2);
        assert_eq!(json["profile"]["public_repos"], 8);
    }
}
