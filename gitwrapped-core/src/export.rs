//! Dashboard export.
//!
//! Rasterizing a dashboard depends on the host (a browser canvas, a native
//! renderer), so the core only defines the capability and the file naming.

use std::path::{Path, PathBuf};

use crate::dashboard::Dashboard;
use crate::error::Result;

/// Renders the current dashboard state to an encoded raster image.
pub trait ImageExporter {
    /// Encoded PNG bytes for `dashboard`.
    fn render_png(&self, dashboard: &Dashboard) -> Result<Vec<u8>>;
}

/// File name for an exported dashboard, e.g. `octocat-contributions.png`.
///
/// Characters that are not valid in a GitHub login are replaced with `_`.
pub fn export_file_name(username: &str) -> String {
    let safe: String = username
        .trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
        .collect();
    format!("{safe}-contributions.png")
}

/// Render `dashboard` with `exporter` and write it into `dir`.
///
/// Returns the path of the written file.
pub fn export_dashboard(
    exporter: &dyn ImageExporter,
    dashboard: &Dashboard,
    dir: &Path,
) -> Result<PathBuf> {
    let bytes = exporter.render_png(dashboard)?;
    let path = dir.join(export_file_name(&dashboard.username));
    std::fs::write(&path, &bytes)?;

    tracing::info!(path = %path.display(), bytes = bytes.len(), "Exported dashboard image");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RenderConfig;
    use crate::error::Error;
    use crate::types::{ContributionMap, ContributionSummary};

    struct StubExporter;

    impl ImageExporter for StubExporter {
        fn render_png(&self, dashboard: &Dashboard) -> Result<Vec<u8>> {
            Ok(format!("png:{}", dashboard.username).into_bytes())
        }
    }

    struct FailingExporter;

    impl ImageExporter for FailingExporter {
        fn render_png(&self, _dashboard: &Dashboard) -> Result<Vec<u8>> {
            Err(Error::Io(std::io::Error::other("canvas unavailable")))
        }
    }

    fn dashboard(username: &str) -> Dashboard {
        let summary = ContributionSummary {
            total_contributions: 1,
            contribution_map: ContributionMap::from([("2024-01-01".to_string(), 1)]),
        };
        Dashboard::build(username, 2024, None, summary, &RenderConfig::default()).unwrap()
    }

    #[test]
    fn test_export_file_name() {
        assert_eq!(export_file_name("octocat"), "octocat-contributions.png");
        assert_eq!(export_file_name("../etc"), "___etc-contributions.png");
    }

    #[test]
    fn test_export_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = export_dashboard(&StubExporter, &dashboard("octocat"), dir.path()).unwrap();
        assert_eq!(path, dir.path().join("octocat-contributions.png"));
        assert_eq!(std::fs::read(&path).unwrap(), b"png:octocat");
    }

    #[test]
    fn test_exporter_failure_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        assert!(export_dashboard(&FailingExporter, &dashboard("octocat"), dir.path()).is_err());
        assert!(!dir.path().join("octocat-contributions.png").exists());
    }
}
