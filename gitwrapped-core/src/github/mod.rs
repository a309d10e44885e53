//! GitHub contribution data source
//!
//! The pipeline never talks to the network itself. It asks a
//! [`ContributionSource`] for the two documents it needs per query: the
//! user's public profile and the contribution calendar for one year.
//!
//! [`GitHubClient`] is the production source:
//! - `GET {api_url}/users/{login}` for the profile
//! - `POST {api_url}/graphql` for the contribution calendar
//!
//! Failures surface as [`Error::UserNotFound`](crate::Error::UserNotFound) or
//! [`Error::UpstreamUnavailable`](crate::Error::UpstreamUnavailable). Nothing
//! is retried here; a failed query is reported to the caller as-is.
//!
//! ## Usage
//!
//! Set a token in `~/.config/gitwrapped/config.toml` (or `GITHUB_TOKEN`):
//!
//! ```toml
//! [github]
//! token = "ghp_xxxxxxxxxxxx"
//! ```

mod client;
mod response;

pub use client::{calendar_window, GitHubClient};
pub use response::{calendar_from_document, parse_calendar_response};

use crate::error::Result;
use crate::types::{ContributionCalendar, UserProfile};

/// Where contribution data comes from.
///
/// Implementations block until the provider answers. One call is one
/// request; callers decide whether to retry.
pub trait ContributionSource {
    /// Public profile for `login`.
    fn fetch_profile(&self, login: &str) -> Result<UserProfile>;

    /// Contribution calendar for `login` covering the calendar year `year`.
    fn fetch_calendar(&self, login: &str, year: i32) -> Result<ContributionCalendar>;
}
