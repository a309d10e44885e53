//! GraphQL response envelope handling

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::types::ContributionCalendar;

#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    data: Option<GraphQlData>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct GraphQlData {
    user: Option<GraphQlUser>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GraphQlUser {
    contributions_collection: ContributionsCollection,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ContributionsCollection {
    contribution_calendar: ContributionCalendar,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
    #[serde(rename = "type", default)]
    kind: Option<String>,
}

/// Extract the contribution calendar from a GraphQL response body.
///
/// - `NOT_FOUND` errors or `user: null` → [`Error::UserNotFound`]
/// - any other GraphQL error or a missing `data` → [`Error::UpstreamUnavailable`]
/// - a body that does not decode → [`Error::MalformedFeed`]
pub fn parse_calendar_response(body: &str, login: &str) -> Result<ContributionCalendar> {
    let response: GraphQlResponse =
        serde_json::from_str(body).map_err(|e| Error::MalformedFeed(e.to_string()))?;

    if !response.errors.is_empty() {
        if response
            .errors
            .iter()
            .any(|e| e.kind.as_deref() == Some("NOT_FOUND"))
        {
            return Err(Error::UserNotFound(login.to_string()));
        }
        let messages: Vec<&str> = response.errors.iter().map(|e| e.message.as_str()).collect();
        return Err(Error::UpstreamUnavailable(format!(
            "GraphQL error: {}",
            messages.join("; ")
        )));
    }

    let data = response.data.ok_or_else(|| {
        Error::UpstreamUnavailable("GraphQL response contained no data".to_string())
    })?;
    let user = data
        .user
        .ok_or_else(|| Error::UserNotFound(login.to_string()))?;

    Ok(user.contributions_collection.contribution_calendar)
}

/// Read a saved calendar: either the bare calendar object or a full GraphQL
/// response envelope.
pub fn calendar_from_document(raw: &str) -> Result<ContributionCalendar> {
    let value: serde_json::Value =
        serde_json::from_str(raw).map_err(|e| Error::MalformedFeed(e.to_string()))?;

    if value.get("data").is_some() || value.get("errors").is_some() {
        parse_calendar_response(raw, "<saved feed>")
    } else {
        serde_json::from_value(value).map_err(|e| Error::MalformedFeed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENVELOPE: &str = r#"{
        "data": {"user": {"contributionsCollection": {"contributionCalendar": {
            "totalContributions": 3,
            "weeks": [{"contributionDays": [
                {"contributionCount": 1, "date": "2024-01-01"},
                {"contributionCount": 2, "date": "2024-01-02"}
            ]}]
        }}}}
    }"#;

    #[test]
    fn test_parse_envelope() {
        let calendar = parse_calendar_response(ENVELOPE, "octocat").unwrap();
        assert_eq!(calendar.total_contributions, Some(3));
        assert_eq!(calendar.day_entries(), 2);
    }

    #[test]
    fn test_null_user_is_not_found() {
        let body = r#"{"data": {"user": null}}"#;
        assert!(matches!(
            parse_calendar_response(body, "ghost"),
            Err(Error::UserNotFound(login)) if login == "ghost"
        ));
    }

    #[test]
    fn test_graphql_errors() {
        let not_found = r#"{"data": {"user": null}, "errors": [{"type": "NOT_FOUND", "message": "Could not resolve to a User"}]}"#;
        assert!(matches!(
            parse_calendar_response(not_found, "ghost"),
            Err(Error::UserNotFound(_))
        ));

        let limited = r#"{"errors": [{"type": "RATE_LIMITED", "message": "API rate limit exceeded"}]}"#;
        let err = parse_calendar_response(limited, "octocat").unwrap_err();
        assert!(matches!(err, Error::UpstreamUnavailable(_)));
        assert!(err.to_string().contains("rate limit"));
    }

    #[test]
    fn test_missing_data_is_upstream_failure() {
        assert!(matches!(
            parse_calendar_response("{}", "octocat"),
            Err(Error::UpstreamUnavailable(_))
        ));
    }

    #[test]
    fn test_garbage_body_is_malformed() {
        assert!(matches!(
            parse_calendar_response("<html>", "octocat"),
            Err(Error::MalformedFeed(_))
        ));
    }

    #[test]
    fn test_calendar_from_either_document() {
        let bare = r#"{"totalContributions": 0, "weeks": []}"#;
        assert_eq!(calendar_from_document(bare).unwrap().day_entries(), 0);
        assert_eq!(calendar_from_document(ENVELOPE).unwrap().day_entries(), 2);
        assert!(calendar_from_document(r#"{"weeks": 3}"#).is_err());
    }
}
