//! HTTP client for the GitHub REST and GraphQL APIs

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use serde::Serialize;

use crate::config::GitHubConfig;
use crate::error::{Error, Result};
use crate::types::{ContributionCalendar, UserProfile};

use super::response::parse_calendar_response;
use super::ContributionSource;

const CONTRIBUTION_QUERY: &str = r#"
query ContributionGraph($username: String!, $from: DateTime!, $to: DateTime!) {
  user(login: $username) {
    contributionsCollection(from: $from, to: $to) {
      contributionCalendar {
        totalContributions
        weeks {
          contributionDays {
            contributionCount
            date
          }
        }
      }
    }
  }
}
"#;

/// UTC bounds of a calendar year, as GraphQL `DateTime` strings.
pub fn calendar_window(year: i32) -> (String, String) {
    (
        format!("{year:04}-01-01T00:00:00Z"),
        format!("{year:04}-12-31T23:59:59Z"),
    )
}

/// Blocking GitHub client.
///
/// Owns a single-threaded runtime so callers stay synchronous.
pub struct GitHubClient {
    base_url: String,
    token: Option<String>,
    http_client: reqwest::Client,
    runtime: tokio::runtime::Runtime,
}

impl GitHubClient {
    /// Create a new client from configuration.
    ///
    /// A token is optional here; only the GraphQL calendar query needs one.
    pub fn new(config: &GitHubConfig) -> Result<Self> {
        let base_url = config.api_url.trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(Error::Config("github.api_url is required".to_string()));
        }

        let token = config.resolve_token();

        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static("gitwrapped"));
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        if let Some(token) = &token {
            let auth_value = format!("Bearer {}", token);
            headers.insert(
                AUTHORIZATION,
                HeaderValue::from_str(&auth_value)
                    .map_err(|e| Error::Config(format!("invalid github token: {}", e)))?,
            );
        }

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .default_headers(headers)
            .build()
            .map_err(|e| Error::Config(format!("failed to create HTTP client: {}", e)))?;

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;

        Ok(Self {
            base_url,
            token,
            http_client,
            runtime,
        })
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    async fn get_profile(&self, login: &str) -> Result<UserProfile> {
        let url = format!("{}/users/{}", self.base_url, urlencoding::encode(login));

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::UpstreamUnavailable(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        tracing::debug!(%status, login, "GitHub user lookup");

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(Error::UserNotFound(login.to_string()));
        }
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown".to_string());
            return Err(Error::UpstreamUnavailable(format!(
                "API error ({}): {}",
                status, error_text
            )));
        }

        response
            .json()
            .await
            .map_err(|e| Error::UpstreamUnavailable(format!("failed to parse response: {}", e)))
    }

    async fn post_calendar_query(&self, login: &str, year: i32) -> Result<ContributionCalendar> {
        if self.token.is_none() {
            return Err(Error::Config(
                "a GitHub token is required for contribution data (set github.token or GITHUB_TOKEN)"
                    .to_string(),
            ));
        }

        let url = format!("{}/graphql", self.base_url);
        let (from, to) = calendar_window(year);

        let request_body = GraphQlRequest {
            query: CONTRIBUTION_QUERY,
            variables: QueryVariables {
                username: login,
                from: &from,
                to: &to,
            },
        };

        let response = self
            .http_client
            .post(&url)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| Error::UpstreamUnavailable(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        tracing::debug!(%status, login, year, "GitHub contribution query");

        let body = response
            .text()
            .await
            .map_err(|e| Error::UpstreamUnavailable(format!("failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(Error::UpstreamUnavailable(format!(
                "API error ({}): {}",
                status, body
            )));
        }

        parse_calendar_response(&body, login)
    }
}

impl ContributionSource for GitHubClient {
    fn fetch_profile(&self, login: &str) -> Result<UserProfile> {
        tracing::info!(login, "Fetching GitHub profile");
        self.runtime.block_on(self.get_profile(login))
    }

    fn fetch_calendar(&self, login: &str, year: i32) -> Result<ContributionCalendar> {
        tracing::info!(login, year, "Fetching contribution calendar");
        self.runtime.block_on(self.post_calendar_query(login, year))
    }
}

/// Request body for POST /graphql
#[derive(Serialize)]
struct GraphQlRequest<'a> {
    query: &'a str,
    variables: QueryVariables<'a>,
}

#[derive(Serialize)]
struct QueryVariables<'a> {
    username: &'a str,
    from: &'a str,
    to: &'a str,
}
